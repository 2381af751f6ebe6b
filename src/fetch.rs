//! Dependency fetching.
//!
//! A dependency is fetched in up to three ways, in order:
//!
//! - **Custom command**: the `command` option, with the destination directory appended
//! - **Private repository**: `git clone`/`git pull` over SSH or HTTPS when `private` is set
//! - **Default fetch**: the workspace fetch command, which always runs
//!
//! When a `fork` is declared the fetched tree is then moved to the target identity.

use std::path::Path;

use crate::config::{Dependency, WorkspaceConfig};
use crate::error::{Error, Result};
use crate::flag;
use crate::process::{CommandError, Invocation, Runner};
use crate::ui::{self, Step};
use crate::workspace::{self, Workspace};

pub struct Fetcher<'a> {
    pub workspace: &'a Workspace,
    pub config: &'a WorkspaceConfig,
    pub runner: &'a dyn Runner,
}

impl Fetcher<'_> {
    /// Fetch one dependency. `extra_args` go to the default fetch command verbatim.
    pub fn fetch(&self, dep: &Dependency, extra_args: &[String]) -> Result<()> {
        let identity = dep.fork();
        let srcdir = self.workspace.source_path(identity);

        if let Some(command) = &dep.options.command {
            let inv = custom_command(command, &srcdir);
            ui::step(Step::Fetch, &format!("fetching {} ({})", identity, inv));
            self.run(dep, &inv)?;
        } else if flag::is_set(dep.options.private.as_ref(), "private") {
            self.fetch_private(dep, &srcdir)?;
        }

        let inv = Invocation::new(self.config.fetch.iter().cloned())
            .args(extra_args.iter().cloned())
            .arg(identity);
        ui::step(Step::Fetch, &format!("downloading {}", identity));
        let result = self.run(dep, &inv);

        if dep.options.fork.is_some() {
            self.relocate(dep)?;
        }

        result
    }

    fn fetch_private(&self, dep: &Dependency, srcdir: &Path) -> Result<()> {
        let inv = if srcdir.exists() {
            ui::step(Step::Fetch, &format!("pulling private {}", dep.name()));
            private_pull(srcdir)
        } else {
            let https = flag::is_set(dep.options.https.as_ref(), "https");
            let url = private_url(dep.name(), https).ok_or_else(|| Error::PrivateUrl {
                name: dep.name().to_string(),
            })?;
            ui::step(Step::Fetch, &format!("cloning private {}", dep.name()));
            Invocation::new(["git", "clone"])
                .arg(url)
                .arg(srcdir.to_string_lossy())
        };
        self.run(dep, &inv)
    }

    fn relocate(&self, dep: &Dependency) -> Result<()> {
        let (fork, target) = (dep.fork(), dep.target());
        if fork == target {
            return Ok(());
        }
        let from = self.workspace.source_path(fork);
        let to = self.workspace.source_path(target);
        ui::step(Step::Fork, &format!("forking ({}, {})", fork, target));

        workspace::relocate(&from, &to).map_err(|source| Error::Relocation { from, to, source })
    }

    fn run(&self, dep: &Dependency, inv: &Invocation) -> Result<()> {
        self.runner.run(inv).map_err(|source| fetch_error(dep, source))
    }
}

fn fetch_error(dep: &Dependency, source: CommandError) -> Error {
    Error::Fetch {
        name: dep.name().to_string(),
        source,
    }
}

fn custom_command(command: &str, srcdir: &Path) -> Invocation {
    Invocation::new(command.split_whitespace()).arg(srcdir.to_string_lossy())
}

fn private_pull(srcdir: &Path) -> Invocation {
    let dir = srcdir.to_string_lossy();
    Invocation::new(["git".to_string(), format!("--work-tree={}", dir)])
        .arg(format!("--git-dir={}/.git", dir))
        .args(["pull", "origin"])
}

/// Clone URL for a private dependency: `https://<name>.git`, or
/// `git@<host>:<org>/<project>` when going over SSH.
pub fn private_url(name: &str, https: bool) -> Option<String> {
    if https {
        return Some(format!("https://{}.git", name));
    }
    let mut parts = name.splitn(3, '/');
    let host = parts.next().filter(|s| !s.is_empty())?;
    let org = parts.next().filter(|s| !s.is_empty())?;
    let project = parts.next().filter(|s| !s.is_empty())?;
    Some(format!("git@{}:{}/{}", host, org, project))
}
