//! # vend CLI Entry Point
//!
//! Parses arguments with clap and routes to the library.
//!
//! - `vend install [-- ARGS]` - fetch, pin and build every selected dependency
//! - `vend doctor` - check that the required tools are installed
//! - `vend completion <shell>` - print shell completions

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::{Path, PathBuf};

use vend::config::{MANIFEST_FILE, Manifest, WorkspaceConfig};
use vend::doctor;
use vend::filter::{GROUPS_ENV, Selection};
use vend::install;

#[derive(Parser)]
#[command(name = "vend")]
#[command(about = "Fetch, pin and build project dependencies", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, pin and build the dependencies listed in the manifest
    Install {
        /// Path to the manifest
        #[arg(long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
        /// Activate a dependency group (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<String>,
        /// Extra arguments passed to the fetch and build commands
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Check that fetch, build and VCS tools are available
    Doctor {
        /// Path to the manifest
        #[arg(long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Install {
            manifest,
            groups,
            args,
        } => {
            let env_groups = std::env::var(GROUPS_ENV).unwrap_or_default();
            let selection = Selection::new(groups.iter().cloned()).with_group_list(&env_groups);
            install::install_manifest(manifest, &selection, args).with_context(|| {
                format!("Failed to install dependencies from {}", manifest.display())
            })?;
            Ok(())
        }
        Commands::Doctor { manifest } => {
            let config = load_workspace_config(manifest)?;
            if !doctor::run_doctor(&config) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

// Doctor works without a manifest and falls back to the default tools.
fn load_workspace_config(path: &Path) -> Result<WorkspaceConfig> {
    if !path.exists() {
        return Ok(WorkspaceConfig::default());
    }
    let manifest =
        Manifest::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(manifest.workspace)
}
