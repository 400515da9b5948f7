//! modman CLI
//!
//! Thin driver over modman-core: lists manifest modules, resolves install
//! and uninstall plans, and emits the `{add, remove}` request for the
//! external installer. Logs go to stderr; stdout carries plan output only.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing_subscriber::EnvFilter;

use modman_core::installed::{InstalledPackage, InstalledSet};
use modman_core::manifest::Manifest;
use modman_core::planner::{PackageRequest, Planner, UninstallPlan};
use modman_core::registry::Registry;
use modman_core::remote;

#[derive(Parser, Debug)]
#[clap(
    name = "modman",
    about = "Manifest-driven module install/uninstall resolution",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// URL of the module manifest
    #[clap(long, env = "MODMAN_MANIFEST_URL", global = true)]
    manifest_url: Option<String>,

    /// Local manifest file (offline snapshot; takes precedence over the URL)
    #[clap(long, global = true)]
    manifest_file: Option<PathBuf>,

    /// JSON document enumerating currently installed packages
    #[clap(long, global = true)]
    installed_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List manifest modules and their installed state
    List {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Resolve an install plan for a module and its dependency closure
    Install {
        /// Module name
        name: String,

        /// Output the raw installer request as JSON
        #[clap(long)]
        json: bool,
    },

    /// Resolve an uninstall plan for a module
    Uninstall {
        /// Module name
        name: String,

        /// Also remove every installed module that depends on the target
        #[clap(long, conflicts_with = "keep_dependents")]
        cascade: bool,

        /// Remove only the target even if dependents would break
        #[clap(long)]
        keep_dependents: bool,

        /// Output the raw installer request as JSON
        #[clap(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // logs to stderr, stdout is for plan output
        .init();

    let cli = Cli::parse();

    let manifest = load_manifest(&cli).await?;
    let registry = Registry::from_manifest(manifest);
    let installed = load_installed(&cli)?;

    match cli.command {
        Command::List { json } => execute_list(&registry, &installed, json),
        Command::Install { ref name, json } => {
            let planner = Planner::new(&registry, &installed);
            let request = planner.plan_install(name)?;
            emit_request(&request, json)
        }
        Command::Uninstall {
            ref name,
            cascade,
            keep_dependents,
            json,
        } => execute_uninstall(&registry, &installed, name, cascade, keep_dependents, json),
    }
}

/// One resolution session reads exactly one manifest snapshot.
async fn load_manifest(cli: &Cli) -> Result<Manifest> {
    if let Some(path) = &cli.manifest_file {
        return Ok(Manifest::from_file(path)?);
    }
    if let Some(url) = &cli.manifest_url {
        return Ok(remote::fetch_manifest(url).await?);
    }
    bail!("no manifest source; pass --manifest-file or --manifest-url (or set MODMAN_MANIFEST_URL)");
}

fn load_installed(cli: &Cli) -> Result<InstalledSet> {
    let Some(path) = &cli.installed_file else {
        tracing::debug!("no installed-set document supplied; treating every module as absent");
        return Ok(InstalledSet::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read installed set: {}", path.display()))?;
    let packages: Vec<InstalledPackage> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse installed set: {}", path.display()))?;

    Ok(InstalledSet::new(packages))
}

/// Table row for module listings
#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Dependencies")]
    dependencies: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn execute_list(registry: &Registry, installed: &InstalledSet, json_output: bool) -> Result<()> {
    if json_output {
        let modules: Vec<serde_json::Value> = registry
            .all()
            .iter()
            .map(|module| {
                serde_json::json!({
                    "name": module.name,
                    "description": module.description,
                    "package_id": module.package_id,
                    "dependencies": module.dependencies,
                    "installed": installed.contains(&module.package_id),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("The manifest lists no modules.");
        return Ok(());
    }

    let rows: Vec<ModuleRow> = registry
        .all()
        .iter()
        .map(|module| ModuleRow {
            name: module.name.clone(),
            installed: if installed.contains(&module.package_id) {
                "yes".to_string()
            } else {
                "".to_string()
            },
            dependencies: module.dependencies.join(", "),
            description: module.description.clone(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn execute_uninstall(
    registry: &Registry,
    installed: &InstalledSet,
    name: &str,
    cascade: bool,
    keep_dependents: bool,
    json_output: bool,
) -> Result<()> {
    let planner = Planner::new(registry, installed);

    let request = match planner.plan_uninstall(name)? {
        UninstallPlan::Ready(request) => request,
        UninstallPlan::NeedsConfirmation(prompt) => {
            if cascade {
                prompt.cascade()
            } else if keep_dependents {
                prompt.target_only()
            } else {
                eprintln!(
                    "Uninstalling '{name}' would break {} installed package(s):",
                    prompt.dependents.len()
                );
                for dependent in &prompt.dependents {
                    eprintln!("  {dependent}");
                }
                eprintln!(
                    "Re-run with --cascade to remove them too, or --keep-dependents to remove only the target."
                );
                std::process::exit(2);
            }
        }
    };

    emit_request(&request, json_output)
}

fn emit_request(request: &PackageRequest, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(request)?);
        return Ok(());
    }

    for locator in &request.add {
        println!("add    {locator}");
    }
    for package_id in &request.remove {
        println!("remove {package_id}");
    }
    Ok(())
}
