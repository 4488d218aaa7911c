//! Integration tests for the `podalert` CLI binary.
//!
//! Every test points `--config` and `--store` into a fresh temp directory so
//! the user's real configuration and pending alerts are never touched.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("pending-alerts.json")
    }

    /// Build a [`Command`] for the `podalert` binary with env isolation.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = bare_cmd(self.dir.path());
        cmd.arg("--config")
            .arg(self.config())
            .arg("--store")
            .arg(self.store());
        cmd
    }
}

/// Clears `PODALERT_*` env vars and points home directories at `home`.
fn bare_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("podalert");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("XDG_DATA_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PODALERT_CONFIG")
        .env_remove("PODALERT_STORE")
        .env_remove("PODALERT_LOCALE")
        .env_remove("PODALERT_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let sandbox = Sandbox::new();
    let output = bare_cmd(sandbox.dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    Sandbox::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("pump alert catalog")
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("pending"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("podalert"));
}

#[test]
fn test_completions_zsh() {
    Sandbox::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Alerts ──────────────────────────────────────────────────────────

#[test]
fn test_alerts_list_plain_names_every_kind() {
    let output = Sandbox::new()
        .cmd()
        .args(["alerts", "list", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        ids,
        [
            "multiCommand",
            "podExpireImminent",
            "userPodExpiration",
            "lowReservoir",
            "suspendInProgress",
            "suspendEnded",
            "podExpiring",
            "finishSetupReminder",
            "timeOffsetChangeDetected",
        ]
    );
}

#[test]
fn test_alerts_list_json_marks_only_suspend_ended_as_repeating() {
    let output = Sandbox::new()
        .cmd()
        .args(["alerts", "list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let kinds = stdout_json(&output);
    let repeating: Vec<&serde_json::Value> = kinds
        .as_array()
        .unwrap()
        .iter()
        .filter(|k| k.get("repeatIntervalSecs").is_some())
        .collect();
    assert_eq!(repeating.len(), 1);
    assert_eq!(repeating[0]["identifier"], "suspendEnded");
    assert_eq!(repeating[0]["repeatIntervalSecs"], 900);
}

#[test]
fn test_alerts_encode_low_reservoir() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "encode", "lowReservoir", "--value", "10", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(r#"{"identifier":"lowReservoir","value":10.0}"#.to_owned() + "\n");
}

#[test]
fn test_alerts_encode_accepts_negative_level() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "encode", "lowReservoir", "--value", "-1.5", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(r#"{"identifier":"lowReservoir","value":-1.5}"#.to_owned() + "\n");
}

#[test]
fn test_alerts_encode_time_offset_drops_slot() {
    let output = Sandbox::new()
        .cmd()
        .args(["alerts", "encode", "timeOffsetChangeDetected", "--slot", "3", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"identifier": "timeOffsetChangeDetected"})
    );
}

#[test]
fn test_alerts_encode_rejects_non_positive_offset() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "encode", "userPodExpiration", "--offset", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("offset"));
}

#[test]
fn test_alerts_show_unknown_kind() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "show", "podFault"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("podFault"));
}

#[test]
fn test_alerts_show_localized_title() {
    let output = Sandbox::new()
        .cmd()
        .args(["alerts", "show", "suspendEnded", "-L", "zh-Hans", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let view = stdout_json(&output);
    assert_eq!(view["content"]["title"], "恢复胰岛素");
    assert_eq!(view["repeatIdentifier"], "suspendEnded-repeating");
}

#[test]
fn test_alerts_decode_from_stdin() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "decode", "-o", "plain"])
        .write_stdin(r#"[{"identifier":"suspendEnded","slot":2},{"identifier":"nope"}]"#)
        .assert()
        .success()
        .stdout("suspendEnded\n")
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_alerts_decode_nothing_decodable() {
    Sandbox::new()
        .cmd()
        .args(["alerts", "decode"])
        .write_stdin(r#"{"identifier":"lowReservoir"}"#)
        .assert()
        .code(5);
}

#[test]
fn test_alerts_decode_file_with_malformed_slot() {
    let sandbox = Sandbox::new();
    let file = sandbox.dir.path().join("record.json");
    std::fs::write(&file, r#"{"identifier":"podExpiring","slot":"two"}"#).unwrap();

    let output = sandbox
        .cmd()
        .args(["alerts", "decode", "-o", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let views = stdout_json(&output);
    assert_eq!(views[0]["identifier"], "podExpiring");
    assert!(views[0].get("slot").is_none());
}

// ── Pending ─────────────────────────────────────────────────────────

#[test]
fn test_pending_issue_repeat_and_acknowledge() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["pending", "issue", "suspendEnded", "--slot", "6"])
        .args(["--at", "2024-05-01T08:00:00Z"])
        .assert()
        .success();
    assert!(sandbox.store().exists());

    sandbox
        .cmd()
        .args(["pending", "due", "--at", "2024-05-01T08:10:00Z", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sandbox
        .cmd()
        .args(["pending", "due", "--at", "2024-05-01T08:15:00Z", "--mark", "-o", "plain"])
        .assert()
        .success()
        .stdout("suspendEnded-repeating\n");

    // Marked, so the next reminder is 15 minutes later.
    sandbox
        .cmd()
        .args(["pending", "due", "--at", "2024-05-01T08:20:00Z", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sandbox
        .cmd()
        .args(["pending", "ack", "suspendEnded-repeating"])
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["pending", "list", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn test_pending_issue_uses_configured_reservoir_level() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "notifications.low_reservoir_units", "25"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["pending", "issue", "lowReservoir"])
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["pending", "list", "-o", "json"])
        .output()
        .unwrap();
    let pending = stdout_json(&output);
    assert_eq!(pending[0]["record"]["value"], 25.0);
}

#[test]
fn test_pending_ignored_alert_not_recorded() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["pending", "issue", "finishSetupReminder"])
        .assert()
        .success();
    assert!(!sandbox.store().exists());
}

#[test]
fn test_pending_ack_missing() {
    Sandbox::new()
        .cmd()
        .args(["pending", "ack", "podExpiring"])
        .assert()
        .code(4);
}

#[test]
fn test_pending_clear_requires_yes_when_not_interactive() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["pending", "issue", "podExpiring"])
        .assert()
        .success();

    sandbox.cmd().args(["pending", "clear"]).assert().code(2);
    sandbox
        .cmd()
        .args(["pending", "clear", "--yes"])
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["pending", "list", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_and_show() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "notifications.silence_pod", "enabled"])
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let view = stdout_json(&output);
    assert_eq!(view["config"]["notifications"]["silence_pod"], "enabled");
    assert_eq!(view["silencePod"]["title"], "Silenced");
}

#[test]
fn test_config_set_does_not_persist_env_overrides() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("PODALERT_NOTIFICATIONS__EXPIRATION_REMINDER_HOURS", "5")
        .args(["config", "set", "notifications.low_reservoir_units", "20"])
        .assert()
        .success();

    let written = std::fs::read_to_string(sandbox.config()).unwrap();
    assert!(written.contains("low_reservoir_units = 20"));
    assert!(written.contains("expiration_reminder_hours = 2"));
    assert!(!written.contains("expiration_reminder_hours = 5"));
}

#[test]
fn test_config_set_out_of_range() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "notifications.low_reservoir_units", "99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("low_reservoir_units"));
    assert!(!sandbox.config().exists());
}

#[test]
fn test_config_set_unknown_key() {
    Sandbox::new()
        .cmd()
        .args(["config", "set", "profiles.default", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_config_init_with_yes_writes_defaults() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["config", "init", "--yes"]).assert().success();
    let written = std::fs::read_to_string(sandbox.config()).unwrap();
    assert!(written.contains("expiration_reminder_hours = 2"));
    assert!(written.contains("low_reservoir_units = 10"));
}

#[test]
fn test_config_init_requires_yes_when_not_interactive() {
    Sandbox::new()
        .cmd()
        .args(["config", "init"])
        .assert()
        .code(2);
}
