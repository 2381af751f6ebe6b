//! Manifest parsing (`vend.toml`).
//!
//! The manifest holds an optional `[workspace]` table and an ordered list of
//! `[[dependency]]` tables. Every dependency option is a typed field, so a typo
//! in a key is rejected when the file is loaded instead of being ignored later.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::flag::Flag;

pub const MANIFEST_FILE: &str = "vend.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<Dependency>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Workspace root, relative to the manifest's directory.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Package-root variable exported to every child process.
    #[serde(default = "default_env")]
    pub env: String,
    /// Default fetch command; extra args and the dependency identity are appended.
    #[serde(default = "default_fetch")]
    pub fetch: Vec<String>,
    /// Build/install command; extra args are appended.
    #[serde(default = "default_build")]
    pub build: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            env: default_env(),
            fetch: default_fetch(),
            build: default_build(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("_vendor")
}

fn default_env() -> String {
    "GOPATH".to_string()
}

fn default_fetch() -> Vec<String> {
    vec!["go".into(), "get".into(), "-d".into()]
}

fn default_build() -> Vec<String> {
    vec!["go".into(), "install".into()]
}

/// A string or a list of strings, as used by `group` and `goos`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            OneOrMany::One(s) => std::slice::from_ref(s),
            OneOrMany::Many(v) => v,
        };
        items.iter().map(String::as_str)
    }
}

/// Recognized per-dependency options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOptions {
    pub group: Option<OneOrMany>,
    pub goos: Option<OneOrMany>,
    pub fork: Option<String>,
    pub target: Option<String>,
    pub command: Option<String>,
    pub private: Option<Flag>,
    pub https: Option<Flag>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub commit: Option<String>,
}

/// One declared dependency. The name cannot change after construction.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "DependencyEntry")]
pub struct Dependency {
    name: String,
    pub options: DependencyOptions,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyEntry {
    name: String,
    group: Option<OneOrMany>,
    goos: Option<OneOrMany>,
    fork: Option<String>,
    target: Option<String>,
    command: Option<String>,
    private: Option<Flag>,
    https: Option<Flag>,
    branch: Option<String>,
    tag: Option<String>,
    commit: Option<String>,
}

impl From<DependencyEntry> for Dependency {
    fn from(e: DependencyEntry) -> Self {
        Self {
            name: e.name,
            options: DependencyOptions {
                group: e.group,
                goos: e.goos,
                fork: e.fork,
                target: e.target,
                command: e.command,
                private: e.private,
                https: e.https,
                branch: e.branch,
                tag: e.tag,
                commit: e.commit,
            },
        }
    }
}

impl Dependency {
    pub fn new(name: impl Into<String>, options: DependencyOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity the dependency is addressed by after fetching.
    pub fn target(&self) -> &str {
        self.options.target.as_deref().unwrap_or(&self.name)
    }

    /// Identity actually fetched from upstream.
    pub fn fork(&self) -> &str {
        self.options.fork.as_deref().unwrap_or_else(|| self.target())
    }

    /// Effective revision: commit over tag over branch. `None` means no pin.
    pub fn revision(&self) -> Option<&str> {
        let mut selected = None;
        for candidate in [
            &self.options.branch,
            &self.options.tag,
            &self.options.commit,
        ] {
            if let Some(rev) = candidate {
                selected = Some(rev.as_str());
            }
        }
        selected.filter(|rev| !rev.is_empty())
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse manifest text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.workspace.fetch.is_empty() {
            return Err(ConfigError::EmptyCommand { key: "fetch" });
        }
        if self.workspace.build.is_empty() {
            return Err(ConfigError::EmptyCommand { key: "build" });
        }
        for (i, dep) in self.dependencies.iter().enumerate() {
            dep.validate(i + 1)?;
        }
        Ok(())
    }
}

impl Dependency {
    /// Load-time checks for one dependency; `index` is 1-based.
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        let identities = [
            ("name", Some(&self.name)),
            ("fork", self.options.fork.as_ref()),
            ("target", self.options.target.as_ref()),
        ];
        for (key, value) in identities {
            if let Some(value) = value
                && let Some(reason) = identity_problem(value)
            {
                return Err(ConfigError::InvalidIdentity {
                    index,
                    key,
                    value: value.clone(),
                    reason,
                });
            }
        }
        if let Some(command) = &self.options.command
            && command.trim().is_empty()
        {
            return Err(ConfigError::BlankCommand { index });
        }
        let (fork, target) = (self.fork(), self.target());
        if is_nested(fork, target) {
            return Err(ConfigError::NestedFork {
                index,
                fork: fork.to_string(),
                target: target.to_string(),
            });
        }
        Ok(())
    }
}

// Identities become paths under `<root>/src`, so every segment must be a plain name.
fn identity_problem(identity: &str) -> Option<&'static str> {
    if identity.starts_with('/') {
        return Some("must be relative");
    }
    if identity.contains('\\') {
        return Some("must use '/' as separator");
    }
    for segment in identity.split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        let plain = matches!(
            (components.next(), components.next()),
            (Some(std::path::Component::Normal(_)), None)
        );
        if !plain {
            return Some("contains a '.', '..' or drive segment");
        }
    }
    if identity.split('/').all(str::is_empty) {
        return Some("is empty");
    }
    None
}

// True when one identity is a strict ancestor of the other.
fn is_nested(a: &str, b: &str) -> bool {
    let a: Vec<&str> = a.split('/').filter(|s| !s.is_empty()).collect();
    let b: Vec<&str> = b.split('/').filter(|s| !s.is_empty()).collect();
    a != b && (a.starts_with(&b) || b.starts_with(&a))
}
