//! Integration tests for the `secretary` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the free, propose,
//! intent, book and followup subcommands through the actual binary, including
//! stdin input, file output, configuration files and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn secretary() -> Command {
    let mut cmd = Command::cargo_bin("secretary").unwrap();
    for var in [
        "SECRETARY_API_KEY",
        "SECRETARY_TIMEZONE",
        "SECRETARY_FOLLOWUP_RECIPIENT",
        "SECRETARY_SENDER",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Parse stdout as a JSON array of strings.
fn json_strings(stdout: &[u8]) -> Vec<String> {
    serde_json::from_slice(stdout).expect("stdout must be a JSON string array")
}

// ─────────────────────────────────────────────────────────────────────────────
// propose
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn propose_from_busy_file() {
    let output = secretary()
        .args([
            "propose",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--busy",
            &fixture("busy.json"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    // Free: 09:15-10:00 and 10:30-12:00.
    assert_eq!(
        json_strings(&output.stdout),
        vec![
            "2026-03-17T09:15:00+03:00",
            "2026-03-17T09:30:00+03:00",
            "2026-03-17T10:30:00+03:00",
        ]
    );
}

#[test]
fn propose_reads_busy_from_stdin() {
    let busy = std::fs::read_to_string(fixture("busy.json")).unwrap();

    let output = secretary()
        .args([
            "propose",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--busy",
            "-",
            "--duration",
            "60",
            "--limit",
            "5",
        ])
        .write_stdin(busy)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        json_strings(&output.stdout),
        vec![
            "2026-03-17T10:30:00+03:00",
            "2026-03-17T10:45:00+03:00",
            "2026-03-17T11:00:00+03:00",
        ]
    );
}

#[test]
fn propose_without_busy_uses_whole_window() {
    let output = secretary()
        .args([
            "propose",
            "--timezone",
            "Africa/Addis_Ababa",
            "--start",
            "2026-03-17T09:00:00",
            "--end",
            "2026-03-17T12:00:00",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        json_strings(&output.stdout),
        vec![
            "2026-03-17T09:00:00+03:00",
            "2026-03-17T09:15:00+03:00",
            "2026-03-17T09:30:00+03:00",
        ]
    );
}

#[test]
fn propose_uses_config_file_policy_and_zone() {
    // Europe/Berlin is UTC+1 in mid-March; limit 2, stride 30 from the fixture.
    let output = secretary()
        .args([
            "--config",
            &fixture("config.toml"),
            "propose",
            "--start",
            "2026-03-17T09:00:00",
            "--end",
            "2026-03-17T12:00:00",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        json_strings(&output.stdout),
        vec!["2026-03-17T09:00:00+01:00", "2026-03-17T09:30:00+01:00"]
    );
}

#[test]
fn propose_rejects_zero_duration() {
    secretary()
        .args([
            "propose",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--duration",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn propose_rejects_zero_limit() {
    secretary()
        .args([
            "propose",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--limit",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid limit"));
}

#[test]
fn propose_rejects_malformed_busy_interval() {
    secretary()
        .args([
            "propose",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--busy",
            &fixture("bad_busy.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("busy[1]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_prints_available_intervals() {
    let output = secretary()
        .args([
            "free",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "--busy",
            &fixture("busy.json"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let intervals = value.as_array().unwrap();
    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0]["start"], "2026-03-17T09:15:00+03:00");
    assert_eq!(intervals[0]["end"], "2026-03-17T10:00:00+03:00");
    assert_eq!(intervals[1]["start"], "2026-03-17T10:30:00+03:00");
    assert_eq!(intervals[1]["end"], "2026-03-17T12:00:00+03:00");
}

#[test]
fn free_rejects_inverted_window() {
    secretary()
        .args([
            "free",
            "--start",
            "2026-03-17T12:00:00+03:00",
            "--end",
            "2026-03-17T09:00:00+03:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window"));
}

#[test]
fn free_rejects_unparseable_datetime() {
    secretary()
        .args(["free", "--start", "tomorrow", "--end", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window start"));
}

#[test]
fn free_writes_output_file() {
    let output_path = "/tmp/secretary-test-free-output.json";
    let _ = std::fs::remove_file(output_path);

    secretary()
        .args([
            "free",
            "--start",
            "2026-03-17T09:00:00+03:00",
            "--end",
            "2026-03-17T12:00:00+03:00",
            "-o",
            output_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("2026-03-17T09:00:00+03:00"));

    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// intent, book, followup
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn intent_extracts_entities_and_proposes() {
    let output = secretary()
        .args(["intent", "--text", "45 min with alice@example.com"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let res: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(res["intent"], "schedule_meeting");
    assert_eq!(res["status"], "slots_proposed");
    assert_eq!(res["entities"]["duration_min"], 45);
    assert_eq!(res["entities"]["participants"][0], "alice@example.com");
    assert_eq!(res["proposed_slots"].as_array().unwrap().len(), 3);
}

#[test]
fn intent_with_wrong_api_key_is_forbidden() {
    secretary()
        .args(["intent", "--text", "meet", "--api-key", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forbidden"));
}

#[test]
fn book_creates_event() {
    secretary()
        .args([
            "book",
            "--title",
            "Design Review",
            "--attendees",
            "alice@example.com, bob@example.com",
            "--start",
            "2026-03-17T09:00:00",
            "--end",
            "2026-03-17T09:30:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\""))
        .stdout(predicate::str::contains("evt-1"))
        .stdout(predicate::str::contains("design-review"));
}

#[test]
fn book_rejects_bad_attendee() {
    secretary()
        .args([
            "book",
            "--title",
            "Sync",
            "--attendees",
            "not-an-email",
            "--start",
            "2026-03-17T09:00:00",
            "--end",
            "2026-03-17T09:30:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email address"));
}

#[test]
fn followup_is_a_dry_run() {
    secretary()
        .args(["followup", "--hours", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sent\""))
        .stdout(predicate::str::contains("dry-run"))
        .stdout(predicate::str::contains("me@example.com"));
}

#[test]
fn missing_subcommand_fails() {
    secretary().assert().failure();
}
