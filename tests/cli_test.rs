//! CLI tests for `vend install` and `vend completion`.
//!
//! The manifests use `true`/`false` as fetch and build programs, so these only
//! run on Unix-like systems.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn vend() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vend"))
}

fn project(manifest: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let path = tmp.path().join("vend.toml");
    fs::write(&path, manifest).expect("Failed to write vend.toml");
    (tmp, path)
}

fn install(manifest: &Path, extra: &[&str]) -> Output {
    vend()
        .arg("install")
        .arg("--manifest")
        .arg(manifest)
        .args(extra)
        .env_remove("VEND_GROUPS")
        .output()
        .expect("Failed to run vend")
}

#[test]
fn test_install_succeeds_and_creates_workspace() {
    let (tmp, manifest) = project(
        r#"
[workspace]
root = "deps"
fetch = ["true"]
build = ["true"]

[[dependency]]
name = "example.com/org/lib"
"#,
    );
    // the build step runs inside the dependency directory, so it must exist
    fs::create_dir_all(tmp.path().join("deps/src/example.com/org/lib")).unwrap();

    let out = install(&manifest, &[]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(tmp.path().join("deps").is_dir());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Installed 1 dependencies"));
}

#[test]
fn test_install_exports_package_root() {
    let (tmp, manifest) = project(
        r#"
[workspace]
root = "deps"
env = "VEND_TEST_ROOT"
fetch = ["sh", "-c", "mkdir -p \"$VEND_TEST_ROOT/src/$0\" && echo \"$VEND_TEST_ROOT\" > \"$VEND_TEST_ROOT/root.txt\""]
build = ["true"]

[[dependency]]
name = "example.com/org/lib"
"#,
    );

    let out = install(&manifest, &[]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let root = fs::read_to_string(tmp.path().join("deps/root.txt")).unwrap();
    let expected = fs::canonicalize(tmp.path().join("deps")).unwrap();
    assert_eq!(fs::canonicalize(root.trim()).unwrap(), expected);
    assert!(tmp.path().join("deps/src/example.com/org/lib").is_dir());
}

#[test]
fn test_install_fails_on_fetch_error() {
    let (_tmp, manifest) = project(
        r#"
[workspace]
fetch = ["false"]
build = ["true"]

[[dependency]]
name = "example.com/org/broken"
"#,
    );

    let out = install(&manifest, &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("example.com/org/broken"), "stderr: {stderr}");
}

#[test]
fn test_group_flag_selects_dependencies() {
    let (_tmp, manifest) = project(
        r#"
[workspace]
fetch = ["false"]
build = ["true"]

[[dependency]]
name = "example.com/org/test-only"
group = "test"
"#,
    );

    // without the group nothing is fetched, so the failing fetch never runs
    let out = install(&manifest, &[]);
    assert!(out.status.success());

    let out = install(&manifest, &["--group", "test"]);
    assert!(!out.status.success());
}

#[test]
fn test_missing_manifest_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let out = install(&tmp.path().join("vend.toml"), &[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("vend.toml"), "stderr: {stderr}");
}

#[test]
fn test_completion_generates_script() {
    let out = vend()
        .args(["completion", "bash"])
        .output()
        .expect("Failed to run vend");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("vend"));
}
