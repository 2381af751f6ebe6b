//! Workspace layout.
//!
//! Every dependency lives at `<root>/src/<identity>`, where the identity is the
//! slash-delimited dependency name (or its fork/target alias).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ConfigError;
use crate::vcs::Vcs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Resolve `root` to an absolute path, creating the directory if needed.
    pub fn prepare(root: &Path) -> Result<Self, ConfigError> {
        let err = |source| ConfigError::Workspace {
            path: root.to_path_buf(),
            source,
        };
        let absolute = std::path::absolute(root).map_err(err)?;
        fs::create_dir_all(&absolute).map_err(err)?;
        Ok(Self { root: absolute })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Directory that holds the source tree for `identity`.
    pub fn source_path(&self, identity: &str) -> PathBuf {
        let mut path = self.src_dir();
        path.extend(segments(identity));
        path
    }

    /// Walk `identity` one segment at a time from the source root and return the
    /// first control system whose metadata appears along the way.
    pub fn find_vcs(&self, identity: &str) -> Option<Vcs> {
        let mut path = self.src_dir();
        for segment in segments(identity) {
            path.push(segment);
            if let Some(vcs) = Vcs::detect(&path) {
                return Some(vcs);
            }
        }
        None
    }
}

fn segments(identity: &str) -> impl Iterator<Item = &str> {
    identity.split('/').filter(|s| !s.is_empty())
}

/// Move a fetched tree by copying `from` into `to` and then deleting `from`.
///
/// Not atomic: if the delete fails both trees remain on disk. Paths nested
/// inside each other are rejected before anything is copied.
pub fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    if to.starts_with(from) || from.starts_with(to) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} and {} overlap", from.display(), to.display()),
        ));
    }
    copy_dir_all(from, to)?;
    fs::remove_dir_all(from)
}

/// Recursive copy. Existing files in `dst` are overwritten; others are kept.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", src.display()),
        ));
    }

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let out = dst.join(relative);
        let ty = entry.file_type();

        if ty.is_dir() {
            fs::create_dir_all(&out)?;
        } else if ty.is_symlink() {
            copy_symlink(entry.path(), &out)?;
        } else {
            fs::copy(entry.path(), &out)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link = fs::read_link(src)?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)?;
    }
    std::os::unix::fs::symlink(link, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        copy_dir_all(src, dst)
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}
