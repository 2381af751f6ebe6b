//! The install pipeline.
//!
//! Runs in strictly sequential phases over the selected dependencies:
//!
//! 1. Fetch every dependency (custom, private or default fetch, then fork relocation)
//! 2. Pin every dependency to its branch/tag/commit
//! 3. Build every dependency
//!
//! The first error stops the run; dependencies already processed are left as they are.

use std::path::Path;

use crate::build;
use crate::config::{Dependency, Manifest, WorkspaceConfig};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::filter::Selection;
use crate::pin;
use crate::process::{Runner, SystemRunner};
use crate::ui;
use crate::workspace::Workspace;

/// Load the manifest at `manifest_path` and install it with real processes.
///
/// The workspace root is resolved against the manifest's directory and created
/// if missing; every command then sees the package-root variable pointing at it.
pub fn install_manifest(
    manifest_path: &Path,
    selection: &Selection,
    extra_args: &[String],
) -> Result<usize> {
    let manifest = Manifest::load(manifest_path)?;
    let base = manifest_path.parent().unwrap_or(Path::new(""));
    let workspace = Workspace::prepare(&base.join(&manifest.workspace.root))?;
    let runner = SystemRunner::new().with_env(&manifest.workspace.env, workspace.root());

    Installer::new(&workspace, &manifest.workspace, &runner).install(
        &manifest.dependencies,
        selection,
        extra_args,
    )
}

pub struct Installer<'a> {
    workspace: &'a Workspace,
    config: &'a WorkspaceConfig,
    runner: &'a dyn Runner,
}

impl<'a> Installer<'a> {
    /// `runner` must already export the package-root variable for `workspace`.
    pub fn new(
        workspace: &'a Workspace,
        config: &'a WorkspaceConfig,
        runner: &'a dyn Runner,
    ) -> Self {
        Self {
            workspace,
            config,
            runner,
        }
    }

    /// Install the dependencies `selection` includes. Returns how many were installed.
    pub fn install(
        &self,
        deps: &[Dependency],
        selection: &Selection,
        extra_args: &[String],
    ) -> Result<usize> {
        let deps = selection.apply(deps);
        if deps.is_empty() {
            ui::success("Nothing to install.");
            return Ok(0);
        }

        ui::header(&format!("Fetching {} dependencies...", deps.len()));
        let fetcher = Fetcher {
            workspace: self.workspace,
            config: self.config,
            runner: self.runner,
        };
        for dep in &deps {
            fetcher.fetch(dep, extra_args)?;
        }

        ui::header("Checking out revisions...");
        for dep in &deps {
            pin::pin(self.workspace, self.runner, dep)?;
        }

        ui::header("Building...");
        for dep in &deps {
            build::build(self.workspace, self.config, self.runner, dep, extra_args)?;
        }

        ui::success(&format!("Installed {} dependencies.", deps.len()));
        Ok(deps.len())
    }
}
