//! CLI integration tests for the apptmpl command-line interface.
//!
//! These tests verify:
//! - Help text is displayed correctly
//! - Argument parsing works as expected
//! - Context management reads and writes client.yaml
//!
//! Note: These tests do not require a running server.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the apptmpl binary with an isolated config directory.
fn apptmpl(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("apptmpl").unwrap();
    cmd.env("APPTMPL_CONFIG_DIR", config_dir)
        .env_remove("APPTMPL_SERVER_URL");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("console"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("context"));
}

#[test]
fn test_version_displays() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apptmpl"));
}

#[test]
fn test_global_flags_accepted() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .args([
            "--verbose",
            "--json",
            "--server",
            "http://localhost:9999",
            "--context",
            "staging",
            "--help",
        ])
        .assert()
        .success();
}

#[test]
fn test_unknown_subcommand_rejected() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .arg("launch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Context Management Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_context_set_list_use_remove() {
    let dir = tempfile::tempdir().unwrap();

    apptmpl(dir.path())
        .args(["context", "set", "local", "http://localhost:5050"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Context 'local' saved"));
    apptmpl(dir.path())
        .args(["context", "set", "staging", "https://staging.example.com", "--timeout", "60"])
        .assert()
        .success();

    apptmpl(dir.path())
        .args(["context", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* local"))
        .stdout(predicate::str::contains("staging"));

    apptmpl(dir.path())
        .args(["context", "use", "staging"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(dir.path().join("client.yaml")).unwrap();
    assert!(saved.contains("current-context: staging"));
    assert!(saved.contains("timeout: 60"));

    apptmpl(dir.path())
        .args(["context", "remove", "staging"])
        .assert()
        .success();
    apptmpl(dir.path())
        .args(["--json", "context", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current\":null"));
}

#[test]
fn test_use_unknown_context_fails() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .args(["context", "use", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'nowhere' not found"));
}

#[test]
fn test_status_with_unknown_context_fails() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .args(["--context", "nowhere", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'nowhere' not found"));
}

#[test]
fn test_status_reports_unreachable_server() {
    let dir = tempfile::tempdir().unwrap();
    apptmpl(dir.path())
        .args(["--json", "--server", "http://127.0.0.1:1", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"healthy\": false"));
}
