//! Remote manifest source
//!
//! Fetches the module manifest over HTTP. Transport failures, non-success
//! statuses, and parse failures all surface as `ManifestUnavailable`; the
//! engine never retries - retry, if desired, is the caller's policy on top
//! of a fresh fetch.

use crate::error::Result;
use crate::manifest::Manifest;

/// Fetch and parse a manifest from a URL.
#[cfg(feature = "remote")]
pub async fn fetch_manifest(url: &str) -> Result<Manifest> {
    use crate::error::Error;

    let client = reqwest::Client::builder()
        .user_agent(concat!("modman/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| Error::ManifestUnavailable {
            reason: format!("failed to create HTTP client: {e}"),
        })?;

    tracing::info!("fetching manifest from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::ManifestUnavailable {
            reason: format!("failed to fetch {url}: {e}"),
        })?;

    if !response.status().is_success() {
        return Err(Error::ManifestUnavailable {
            reason: format!("HTTP {} from {url}", response.status()),
        });
    }

    let content = response
        .text()
        .await
        .map_err(|e| Error::ManifestUnavailable {
            reason: format!("failed to read response body: {e}"),
        })?;

    Manifest::from_json(&content)
}

/// Stub for when the remote feature is disabled.
#[cfg(not(feature = "remote"))]
pub async fn fetch_manifest(_url: &str) -> Result<Manifest> {
    Err(crate::error::Error::ManifestUnavailable {
        reason: "remote fetch is not enabled; rebuild with --features remote".to_string(),
    })
}
