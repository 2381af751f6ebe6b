//! External command execution.
//!
//! All version-control, fetch and build commands go through a [`Runner`]. The
//! system runner spawns the program with an explicit working directory instead
//! of changing the current directory of this process, so nothing needs to be
//! restored afterwards. It also exports the package-root variable to every child.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external command: argv plus an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            dir: None,
        }
    }

    /// Run the command inside `dir`.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}", exit_status(.code))]
    Failed { command: String, code: Option<i32> },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {}", c),
        None => "a signal".to_string(),
    }
}

impl CommandError {
    /// The command line that failed, if one was started.
    pub fn command(&self) -> Option<&str> {
        match self {
            CommandError::Empty => None,
            CommandError::Spawn { command, .. } | CommandError::Failed { command, .. } => {
                Some(command)
            }
        }
    }
}

/// Executes invocations and reports success or failure.
pub trait Runner {
    fn run(&self, invocation: &Invocation) -> Result<(), CommandError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        (**self).run(invocation)
    }
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    envs: Vec<(OsString, OsString)>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export `key=value` to every command this runner starts.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        let (program, rest) = invocation.argv.split_first().ok_or(CommandError::Empty)?;

        let mut cmd = Command::new(program);
        cmd.args(rest);
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &invocation.dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|source| CommandError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Check whether `program` can be started. Runs `<program> --version` and
/// ignores its exit status, so a program that starts but rejects the flag
/// still counts as available. This does not prove the tool is usable.
pub fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new(["git", "checkout"])
            .arg("-q")
            .args(["v1.0"])
            .in_dir(Path::new("/tmp/x"));
        assert_eq!(inv.argv, vec!["git", "checkout", "-q", "v1.0"]);
        assert_eq!(inv.dir.as_deref(), Some(Path::new("/tmp/x")));
        assert_eq!(inv.to_string(), "git checkout -q v1.0");
        assert_eq!(inv.program(), Some("git"));
    }

    #[test]
    fn test_empty_invocation_is_rejected() {
        let runner = SystemRunner::new();
        let err = runner.run(&Invocation::new(Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, CommandError::Empty));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&Invocation::new(["vend-test-no-such-program"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert_eq!(err.command(), Some("vend-test-no-such-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let runner = SystemRunner::new();
        assert!(runner.run(&Invocation::new(["true"])).is_ok());
        let err = runner.run(&Invocation::new(["false"])).unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_available_means_startable() {
        // `false --version` exits non-zero but still starts
        assert!(is_available("false"));
        assert!(!is_available("vend-test-no-such-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_directory_with_env() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new().with_env("VEND_TEST_ROOT", "marker");
        let inv = Invocation::new(["sh", "-c", "echo \"$VEND_TEST_ROOT\" > out.txt"])
            .in_dir(tmp.path());
        runner.run(&inv).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("out.txt")).unwrap();
        assert_eq!(written.trim(), "marker");
    }
}
