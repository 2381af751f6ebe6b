//! Group and platform selection.
//!
//! A dependency tagged with `group` is only installed when one of its groups is
//! active; one tagged with `goos` only on a listed operating system.

use crate::config::Dependency;

/// Environment variable with extra comma-separated active groups.
pub const GROUPS_ENV: &str = "VEND_GROUPS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    groups: Vec<String>,
    os: String,
}

impl Selection {
    /// Select `groups` on the current operating system.
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::for_os(groups, std::env::consts::OS)
    }

    pub fn for_os<I, S>(groups: I, os: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            os: os.to_string(),
        }
    }

    /// Add the groups listed in `value` (comma separated, blanks ignored).
    pub fn with_group_list(mut self, value: &str) -> Self {
        self.groups.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(ToOwned::to_owned),
        );
        self
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn matches_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn matches_os(&self, goos: &str) -> bool {
        normalize_os(goos) == normalize_os(&self.os)
    }

    pub fn includes(&self, dep: &Dependency) -> bool {
        let opts = &dep.options;
        if let Some(groups) = &opts.group
            && !groups.iter().any(|g| self.matches_group(g))
        {
            return false;
        }
        if let Some(goos) = &opts.goos
            && !goos.iter().any(|os| self.matches_os(os))
        {
            return false;
        }
        true
    }

    /// Keep the dependencies this selection includes, in order.
    pub fn apply<'a>(&self, deps: &'a [Dependency]) -> Vec<&'a Dependency> {
        deps.iter().filter(|d| self.includes(d)).collect()
    }
}

fn normalize_os(os: &str) -> String {
    match os.to_lowercase().as_str() {
        "darwin" | "macos" | "osx" => "macos".to_string(),
        other => other.to_string(),
    }
}
