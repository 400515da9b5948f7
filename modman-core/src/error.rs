//! Engine error types
//!
//! Every variant surfaces synchronously from the resolution call that
//! detects it. Nothing is retried internally and no partial state is left
//! behind: a failed resolution yields no plan and the external installer is
//! never invoked.

use thiserror::Error;

/// Errors produced by manifest loading and dependency resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest could not be fetched, read, or parsed.
    ///
    /// Fatal to any resolution: no partial registry is ever built from a
    /// manifest that failed to load.
    #[error("manifest unavailable: {reason}")]
    ManifestUnavailable { reason: String },

    /// A module declares a dependency that does not exist in the manifest.
    ///
    /// Never skipped silently: an install must not proceed with a dependency
    /// it cannot resolve.
    #[error("module '{module}' depends on '{dependency}', which is not in the manifest")]
    DanglingDependency { module: String, dependency: String },

    /// The requested module or package is not known to the registry or the
    /// installed set.
    #[error("unknown target '{target}'")]
    UnknownTarget { target: String },
}

pub type Result<T> = std::result::Result<T, Error>;
