//! End-to-end tests for the patchscan binary.

mod common;

use assert_cmd::Command;
use common::{write_snapshot, MIXED_SNAPSHOT_JSON};
use std::fs;
use tempfile::TempDir;

fn patchscan() -> Command {
    let mut cmd = Command::cargo_bin("patchscan").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_all_writes_both_reports() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), "registry.json", MIXED_SNAPSHOT_JSON);
    let out_dir = temp.path().join("logs");

    let output = patchscan()
        .current_dir(temp.path())
        .args(["all", snapshot.to_str().unwrap(), "--output-dir"])
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Scan complete! Found 4 mods with 8 patches."));
    assert!(stdout.contains("Conflict scan complete! Found 3 conflicts (1 high risk)."));

    let inventory = fs::read_to_string(out_dir.join("AllHarmonyPatches.txt")).unwrap();
    let conflicts = fs::read_to_string(out_dir.join("DuplicateHarmonyPatches.txt")).unwrap();
    assert!(inventory.starts_with("=== Harmony Patch Scanner Results ==="));
    assert!(conflicts.contains("=== HIGH RISK CONFLICTS (1) ==="));
}

#[test]
fn test_conflicts_only_writes_conflict_report() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), "registry.json", MIXED_SNAPSHOT_JSON);

    patchscan()
        .current_dir(temp.path())
        .args(["conflicts", snapshot.to_str().unwrap(), "--include-lifecycle", "--plain"])
        .assert()
        .success();

    let logs = temp.path().join("logs");
    assert!(!logs.join("AllHarmonyPatches.txt").exists());
    let report = fs::read_to_string(logs.join("DuplicateHarmonyPatches.txt")).unwrap();
    assert!(report.contains("Target Method: Game.OnGameStart"));
}

#[test]
fn test_config_file_sets_output_names() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), "registry.json", MIXED_SNAPSHOT_JSON);
    fs::write(
        temp.path().join(".patchscan.toml"),
        "[output]\ndirectory = \"reports\"\ninventory_file = \"inventory.txt\"\n",
    )
    .unwrap();

    patchscan()
        .current_dir(temp.path())
        .args(["scan", snapshot.to_str().unwrap()])
        .assert()
        .success();

    assert!(temp.path().join("reports/inventory.txt").exists());
}

#[test]
fn test_missing_snapshot_fails_with_message() {
    let temp = TempDir::new().unwrap();

    let output = patchscan()
        .current_dir(temp.path())
        .args(["conflicts", "missing.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Conflict scan failed: I/O error: Failed to read snapshot"));
}

#[test]
fn test_explicit_bad_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path(), "registry.json", MIXED_SNAPSHOT_JSON);
    let config = temp.path().join("custom.toml");
    fs::write(&config, "[filters\n").unwrap();

    let output = patchscan()
        .current_dir(temp.path())
        .args(["scan", snapshot.to_str().unwrap(), "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Scan failed: Config error"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();

    patchscan()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success();
    assert!(temp.path().join(".patchscan.toml").exists());

    patchscan()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .failure();

    patchscan()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
