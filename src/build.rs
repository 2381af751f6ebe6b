use crate::config::{Dependency, WorkspaceConfig};
use crate::error::{Error, Result};
use crate::process::{Invocation, Runner};
use crate::ui::{self, Step};
use crate::workspace::Workspace;

/// Run the workspace build command inside the dependency's target directory.
/// `extra_args` are appended verbatim. Failures are not retried.
pub fn build(
    workspace: &Workspace,
    config: &WorkspaceConfig,
    runner: &dyn Runner,
    dep: &Dependency,
    extra_args: &[String],
) -> Result<()> {
    let target = dep.target();
    let dir = workspace.source_path(target);
    let inv = Invocation::new(config.build.iter().cloned())
        .args(extra_args.iter().cloned())
        .in_dir(&dir);

    ui::step(Step::Build, &format!("building {}", target));
    runner.run(&inv).map_err(|source| Error::Build {
        name: target.to_string(),
        source,
    })
}
