//! Integration tests for the `edgely` CLI binary.
//!
//! These validate argument parsing, help output, shell completions, and
//! local error handling -- all without a live router.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a `Command` for the `edgely` binary with env isolation.
///
/// Clears all `EDGELY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn edgely_cmd() -> assert_cmd::Command {
    edgely_cmd_at("/tmp/edgely-cli-test-nonexistent")
}

/// Same isolation, but with config directories rooted at `home`.
fn edgely_cmd_at(home: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("edgely");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("EDGELY_PROFILE")
        .env_remove("EDGELY_ROUTER")
        .env_remove("EDGELY_USERNAME")
        .env_remove("EDGELY_PASSWORD")
        .env_remove("EDGELY_INSECURE")
        .env_remove("EDGELY_TIMEOUT")
        .env_remove("EDGELY_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = edgely_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_command_groups() {
    edgely_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("op"))
        .stdout(predicate::str::contains("heartbeat"));
}

#[test]
fn test_version() {
    edgely_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgely"));
}

#[test]
fn test_config_help_lists_subcommands() {
    edgely_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("batch"));
}

// ── Local error handling ────────────────────────────────────────────

#[test]
fn test_missing_router_is_usage_error() {
    let output = edgely_cmd().args(["config", "show"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("router"), "expected router hint in:\n{text}");
}

#[test]
fn test_op_requires_router_too() {
    let output = edgely_cmd().args(["op", "reboot"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_factory_reset_requires_yes_flag_in_help() {
    edgely_cmd()
        .args(["op", "factory-reset", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
}

// ── Local commands ──────────────────────────────────────────────────

#[test]
fn test_profile_list_without_config() {
    edgely_cmd()
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no profiles configured"));
}

#[test]
fn test_profile_set_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap();

    edgely_cmd_at(home)
        .args([
            "profile",
            "set",
            "lab",
            "--router",
            "https://192.168.1.1",
            "--username",
            "ubnt",
            "--default",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile 'lab' saved"));

    edgely_cmd_at(home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* lab"));
}

#[test]
fn test_help_shows_output_format_flag() {
    edgely_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_completions_bash() {
    edgely_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edgely"));
}
