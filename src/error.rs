use std::path::PathBuf;

use crate::process::CommandError;
use crate::vcs::Vcs;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of one pipeline step. The first error stops the whole install.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch {name}")]
    Fetch {
        name: String,
        #[source]
        source: CommandError,
    },
    #[error("cannot build a private clone url for {name:?}: expected host/organization/project")]
    PrivateUrl { name: String },
    #[error("failed to relocate fork {from:?} to {to:?}")]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no git, mercurial or bazaar checkout found for {name}; only those can pin a branch, tag or commit")]
    UnsupportedVcs { name: String },
    #[error("failed to sync {name} to {revision} with {vcs}")]
    Sync {
        name: String,
        revision: String,
        vcs: Vcs,
        #[source]
        source: CommandError,
    },
    #[error("failed to build {name}")]
    Build {
        name: String,
        #[source]
        source: CommandError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems with the manifest or the workspace it describes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("dependency #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("dependency #{index}: {key} {value:?} {reason}")]
    InvalidIdentity {
        index: usize,
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("dependency #{index}: fork {fork:?} and target {target:?} are nested inside each other")]
    NestedFork {
        index: usize,
        fork: String,
        target: String,
    },
    #[error("dependency #{index} has a blank command")]
    BlankCommand { index: usize },
    #[error("workspace.{key} must name a program")]
    EmptyCommand { key: &'static str },
    #[error("cannot prepare workspace root {path:?}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
