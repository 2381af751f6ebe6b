use crate::config::Dependency;
use crate::error::{Error, Result};
use crate::process::Runner;
use crate::ui::{self, Step};
use crate::workspace::Workspace;

/// Move a dependency's checkout to its requested branch, tag or commit.
///
/// Does nothing when no revision is requested. The control system is found by
/// walking the target identity from the source root; the sync itself always
/// runs in the full target directory.
pub fn pin(workspace: &Workspace, runner: &dyn Runner, dep: &Dependency) -> Result<()> {
    let Some(revision) = dep.revision() else {
        return Ok(());
    };
    let target = dep.target();

    let Some(vcs) = workspace.find_vcs(target) else {
        ui::warn(&format!("don't know how to checkout {}", target));
        return Err(Error::UnsupportedVcs {
            name: target.to_string(),
        });
    };

    ui::step(Step::Pin, &format!("{} @ {} ({})", target, revision, vcs));
    let dir = workspace.source_path(target);
    vcs.sync(runner, &dir, revision)
        .map_err(|source| Error::Sync {
            name: target.to_string(),
            revision: revision.to_string(),
            vcs,
            source,
        })
}
