//! Integration tests for the tickago binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn tickago() -> Command {
    let mut cmd = Command::cargo_bin("tickago").unwrap();
    cmd.env("TZ", "UTC").env_remove("RUST_LOG");
    cmd
}

fn write_labels(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tickago-cli-{}-{name}.json",
        std::process::id()
    ));
    fs::write(&path, contents).unwrap();
    path
}

// ── ago ─────────────────────────────────────────────────────────────────────

#[test]
fn test_ago_past() {
    tickago()
        .args(["ago", "2024-06-12T12:00:00", "--now", "2024-06-15T12:00:00"])
        .assert()
        .success()
        .stdout("3 days ago\n");
}

#[test]
fn test_ago_future() {
    tickago()
        .args(["ago", "2024-08-15T12:00:00", "--now", "2024-06-15T12:00:00"])
        .assert()
        .success()
        .stdout("in 2 months\n");
}

#[test]
fn test_ago_just_now() {
    tickago()
        .args(["ago", "2024-06-15T12:00:01", "--now", "2024-06-15T12:00:00"])
        .assert()
        .success()
        .stdout("just now\n");
}

#[test]
fn test_ago_epoch_millis() {
    tickago()
        .args(["ago", "0", "--now", "45000"])
        .assert()
        .success()
        .stdout("45 seconds ago\n");
}

#[test]
fn test_ago_with_format() {
    tickago()
        .args(["ago", "01/06/2023", "--now", "01/06/2024", "--format", "DD/MM/YYYY"])
        .assert()
        .success()
        .stdout("1 year ago\n");
}

#[test]
fn test_ago_with_labels_file() {
    let path = write_labels(
        "custom",
        r#"{ "past": "{value} {unit}{plural} back", "units": { "day": "jour" }, "plural": "s" }"#,
    );
    tickago()
        .args(["ago", "2024-06-12", "--now", "2024-06-15", "--labels"])
        .arg(&path)
        .assert()
        .success()
        .stdout("3 jours back\n");
    fs::remove_file(path).ok();
}

#[test]
fn test_ago_rejects_bad_labels() {
    let path = write_labels("bad-plural", r#"{ "plural": 5 }"#);
    tickago()
        .args(["ago", "2024-06-12", "--labels"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid config"));
    fs::remove_file(path).ok();
}

#[test]
fn test_ago_missing_labels_file() {
    tickago()
        .args(["ago", "2024-06-12", "--labels", "/nonexistent/tickago-labels.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read labels file"));
}

#[test]
fn test_ago_invalid_date() {
    tickago()
        .args(["ago", "not-a-date"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_ago_invalid_now() {
    tickago()
        .args(["ago", "2024-06-12", "--now", "tomorrow-ish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
}

// ── compare ─────────────────────────────────────────────────────────────────

#[test]
fn test_compare_outputs_json() {
    let output = tickago()
        .args(["compare", "2024-01-31T00:00:00", "2024-03-01T00:00:00"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["years"], 0);
    assert_eq!(json["months"], 1);
    assert_eq!(json["days"], 1);
    assert_eq!(json["isFuture"], true);
    assert_eq!(json["raw"]["days"], 30.0);
}

#[test]
fn test_compare_reversed_arguments() {
    let output = tickago()
        .args(["compare", "2024-03-01", "2023-03-01", "--pretty"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains('\n'), "expected pretty output: {stdout}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["years"], 1);
    assert_eq!(json["months"], 0);
    assert_eq!(json["isFuture"], false);
}

#[test]
fn test_compare_invalid_second_date() {
    tickago()
        .args(["compare", "2024-03-01", "2024-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_compare_negative_epoch_millis() {
    let output = tickago().args(["compare", "-5000", "0"]).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["seconds"], 5);
    assert_eq!(json["isFuture"], true);
}

#[test]
fn test_ago_negative_now() {
    tickago()
        .args(["ago", "-60000", "--now", "-30000"])
        .assert()
        .success()
        .stdout("30 seconds ago\n");
}

#[test]
fn test_bare_year_is_epoch_millis_without_format() {
    tickago()
        .args(["ago", "2024", "--now", "2030"])
        .assert()
        .success()
        .stdout("just now\n");
    tickago()
        .args(["ago", "2024", "--now", "2025", "--format", "YYYY"])
        .assert()
        .success()
        .stdout("1 year ago\n");
}

#[test]
fn test_verbose_logs_to_stderr() {
    tickago()
        .args(["-v", "compare", "2024-03-01", "2024-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"days\":1"))
        .stderr(predicate::str::contains("comparing dates"));
}
