//! # vend - dependency fetch, pin and build
//!
//! vend fetches a project's dependencies into a private workspace, pins each one
//! to a branch, tag or commit with whatever version control manages it, and then
//! runs the ecosystem's install command on it.
//!
//! ## Features
//!
//! - **Custom fetch commands**: per-dependency `command` with the destination appended
//! - **Private repositories**: SSH or HTTPS clones, pulls when already present
//! - **Forks**: fetch one identity, install it under another
//! - **Revision pinning**: git, mercurial and bazaar, with a single fetch-and-retry fallback
//! - **Selection**: `group` and `goos` filters
//!
//! ## Quick Start
//!
//! ```bash
//! # vend.toml
//! # [[dependency]]
//! # name = "github.com/org/project"
//! # tag = "v1.2.0"
//!
//! vend install
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Manifest parsing (`vend.toml`)
//! - [`fetch`] - Fetching and fork relocation
//! - [`pin`] - Revision pinning
//! - [`build`] - Build/install step
//! - [`install`] - The phased install pipeline

/// Build/install step for a fetched dependency.
pub mod build;

/// Manifest parsing (`vend.toml`).
pub mod config;

/// Tool availability report.
pub mod doctor;

/// Error types.
pub mod error;

/// Fetching, private repositories and fork relocation.
pub mod fetch;

/// Group and platform filtering.
pub mod filter;

/// Boolean option tokens.
pub mod flag;

/// Fetch, pin and build pipeline.
pub mod install;

/// Revision pinning.
pub mod pin;

/// External command execution.
pub mod process;

/// Console status output.
pub mod ui;

/// Version-control adapters.
pub mod vcs;

/// Workspace layout and relocation.
pub mod workspace;

pub use config::{Dependency, DependencyOptions, Manifest, WorkspaceConfig};
pub use error::{ConfigError, Error, Result};
pub use filter::Selection;
pub use install::{Installer, install_manifest};
