//! Version-control adapters used to pin a dependency to a revision.
//!
//! Only three operations are needed: switch the working tree to a revision,
//! fetch new revisions, and [`Vcs::sync`], which tries the cheap local checkout
//! first and only goes to the network when the revision is unknown.

use std::fmt;
use std::path::Path;

use crate::process::{CommandError, Invocation, Runner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vcs {
    Git,
    Mercurial,
    Bazaar,
}

impl Vcs {
    /// Probe order when looking for control metadata.
    pub const ALL: [Vcs; 3] = [Vcs::Git, Vcs::Mercurial, Vcs::Bazaar];

    /// Hidden directory that marks a checkout of this kind.
    pub fn metadata_dir(self) -> &'static str {
        match self {
            Vcs::Git => ".git",
            Vcs::Mercurial => ".hg",
            Vcs::Bazaar => ".bzr",
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Vcs::Git => "git",
            Vcs::Mercurial => "hg",
            Vcs::Bazaar => "bzr",
        }
    }

    fn checkout_argv(self) -> &'static [&'static str] {
        match self {
            Vcs::Git => &["git", "checkout", "-q"],
            Vcs::Mercurial => &["hg", "update"],
            Vcs::Bazaar => &["bzr", "revert", "-r"],
        }
    }

    fn update_argv(self) -> &'static [&'static str] {
        match self {
            Vcs::Git => &["git", "fetch"],
            Vcs::Mercurial => &["hg", "pull"],
            Vcs::Bazaar => &["bzr", "pull"],
        }
    }

    /// First kind whose metadata directory exists directly inside `dir`.
    pub fn detect(dir: &Path) -> Option<Vcs> {
        Vcs::ALL
            .into_iter()
            .find(|vcs| dir.join(vcs.metadata_dir()).is_dir())
    }

    pub fn checkout(
        self,
        runner: &dyn Runner,
        dir: &Path,
        revision: &str,
    ) -> Result<(), CommandError> {
        let inv = Invocation::new(self.checkout_argv().iter().copied())
            .arg(revision)
            .in_dir(dir);
        runner.run(&inv)
    }

    pub fn update(self, runner: &dyn Runner, dir: &Path) -> Result<(), CommandError> {
        let inv = Invocation::new(self.update_argv().iter().copied()).in_dir(dir);
        runner.run(&inv)
    }

    /// Checkout, falling back to one update and one retried checkout.
    pub fn sync(self, runner: &dyn Runner, dir: &Path, revision: &str) -> Result<(), CommandError> {
        if self.checkout(runner, dir, revision).is_ok() {
            return Ok(());
        }
        self.update(runner, dir)?;
        self.checkout(runner, dir, revision)
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vcs::Git => "git",
            Vcs::Mercurial => "mercurial",
            Vcs::Bazaar => "bazaar",
        };
        f.write_str(name)
    }
}
