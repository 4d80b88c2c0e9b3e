//! Integration tests for the `stufa` CLI binary.
//!
//! These validate argument parsing, help output, the offline catalog
//! command, and error handling -- all without the Total Control portal.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `stufa` binary with env isolation.
///
/// Clears all `STUFA_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn stufa_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stufa").unwrap();
    cmd.env("HOME", "/tmp/stufa-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/stufa-test-nonexistent")
        .env_remove("STUFA_EMAIL")
        .env_remove("STUFA_PASSWORD")
        .env_remove("STUFA_UUID")
        .env_remove("STUFA_BASE_URL")
        .env_remove("STUFA_OUTPUT")
        .env_remove("STUFA_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = stufa_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    stufa_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("pellet stoves")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("registers"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    stufa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stufa"));
}

// ── Offline catalog ─────────────────────────────────────────────────

#[test]
fn test_registers_works_offline() {
    stufa_cmd().arg("registers").assert().success().stdout(
        predicate::str::contains("target-power")
            .and(predicate::str::contains("targetPower"))
            .and(predicate::str::contains("machine-state"))
            .and(predicate::str::contains("1=On")),
    );
}

#[test]
fn test_registers_json_output() {
    stufa_cmd()
        .args(["-o", "json", "registers"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"field\": \"targetPower\"")
                .and(predicate::str::contains("\"parameter_id\": 5")),
        );
}

#[test]
fn test_registers_plain_output_one_per_line() {
    let output = stufa_cmd().args(["-o", "plain", "registers"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 10, "one line per catalog register");
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_devices_without_credentials_is_auth_exit() {
    let output = stufa_cmd().arg("devices").output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("email"),
        "Expected missing-email message, got:\n{text}"
    );
}

#[test]
fn test_unknown_register_is_not_found_exit() {
    // Register parsing happens before any portal traffic.
    let output = stufa_cmd().args(["get", "afterburner"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected not-found exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("afterburner"),
        "Expected the bad key in the message, got:\n{text}"
    );
}

#[test]
fn test_non_numeric_set_value_is_usage_exit() {
    // Value parsing also happens before any portal traffic.
    let output = stufa_cmd()
        .args(["set", "target-power", "sideways"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("--label"),
        "Expected the --label hint, got:\n{text}"
    );
}

#[test]
fn test_unreachable_portal_is_connection_exit() {
    // Nothing listens on port 9; the connection is refused immediately.
    let output = stufa_cmd()
        .args(["devices"])
        .env("STUFA_EMAIL", "user@example.com")
        .env("STUFA_PASSWORD", "hunter2")
        .env("STUFA_UUID", "test-uuid")
        .env("STUFA_BASE_URL", "http://127.0.0.1:9")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "Expected connection exit code");
}

#[test]
fn test_unknown_subcommand() {
    stufa_cmd().arg("defrost").assert().failure().code(2);
}
