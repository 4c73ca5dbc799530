//! Version catalog lifecycle through the CLI
//!
//! Drives the `version` subcommands end to end against a temporary root.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn seeded_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.py"), "print('hello')").unwrap();
    fs::write(temp.path().join("requirements.txt"), "flask\n").unwrap();
    fs::create_dir_all(temp.path().join("templates")).unwrap();
    fs::write(temp.path().join("templates/index.html"), "<html/>").unwrap();
    temp
}

fn signalvault(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("signalvault").unwrap();
    cmd.env("SIGNALVAULT_ROOT", root);
    cmd
}

#[test]
fn version_lifecycle_create_list_delete() {
    let root = seeded_root();

    // create("v1", "initial")
    signalvault(root.path())
        .args(["version", "backup", "--version", "v1", "--description", "initial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version created: v1"));

    // list() returns exactly one descriptor named v1
    signalvault(root.path())
        .args(["version", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: v1"))
        .stdout(predicate::str::contains("initial"));

    // create("v1", "dup") fails
    signalvault(root.path())
        .args(["version", "backup", "--version", "v1", "--description", "dup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Still exactly one catalog entry for v1.
    let entries: Vec<_> = fs::read_dir(root.path().join("versions"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);

    // delete("v1") with confirmation removes it
    signalvault(root.path())
        .args(["version", "delete", "--version", "v1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version deleted: v1"));

    // Subsequent list() is empty.
    signalvault(root.path())
        .args(["version", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No versions cataloged."));
}

#[test]
fn restore_creates_safety_version_and_overwrites_live_state() {
    let root = seeded_root();

    signalvault(root.path())
        .args(["version", "backup", "--version", "v1", "--description", "first"])
        .assert()
        .success();

    // Mutate live state after cataloging v1.
    fs::write(root.path().join("app.py"), "print('changed')").unwrap();

    signalvault(root.path())
        .args(["version", "restore", "--version", "v1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-restore state saved as: backup_before_restore"));

    // Live state matches v1 again.
    assert_eq!(
        fs::read_to_string(root.path().join("app.py")).unwrap(),
        "print('hello')"
    );

    // The safety version holds the pre-restore state.
    let safety_dir = fs::read_dir(root.path().join("versions"))
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("backup_before_restore")
        })
        .expect("safety version directory");
    assert_eq!(
        fs::read_to_string(safety_dir.path().join("app.py")).unwrap(),
        "print('changed')"
    );
}

#[test]
fn restore_unknown_version_fails() {
    let root = seeded_root();

    signalvault(root.path())
        .args(["version", "restore", "--version", "ghost", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version not found: ghost"));
}

#[test]
fn decode_rejects_invalid_base64() {
    let root = seeded_root();
    let bad = root.path().join("bad.txt");
    fs::write(&bad, "!!!not-base64!!!").unwrap();

    signalvault(root.path())
        .arg("decode")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed encoding"));
}
