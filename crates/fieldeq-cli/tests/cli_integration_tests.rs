//! CLI integration tests
//!
//! Run the `fieldeq` binary end to end against case files and single
//! comparisons.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn core_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fieldeq-core")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fieldeq(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fieldeq"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_check_service_cases_passes() {
    let path = core_fixture("service_cases.yaml");
    let output = fieldeq(&["check", path.to_str().unwrap()]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("PASS zookeeper-config-appended-key"));
    assert!(out.contains("PASS quantity-binary-vs-milli"));
    assert!(out.contains("4 passed, 0 failed"));
}

#[test]
fn test_check_explain_prints_transform() {
    let path = core_fixture("service_cases.yaml");
    let output = fieldeq(&["check", path.to_str().unwrap(), "--explain"]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("transform: base64"));
    assert!(out.contains("clause: previous_wildcard"));
}

#[test]
fn test_check_failing_case_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let cases = temp_dir.path().join("cases.yaml");
    fs::write(
        &cases,
        "schema_version: 0\ncases:\n  - name: drifted\n    in_curr: a\n    out_curr: b\n  - name: fine\n    in_curr: a\n    out_curr: a\n",
    )
    .unwrap();

    let output = fieldeq(&["check", cases.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("FAIL drifted: expected equivalent, got different"));
    assert!(stdout(&output).contains("1 passed, 1 failed"));
    assert!(stderr(&output).contains("ERR_CASE_FAILED"));
}

#[test]
fn test_check_fail_fast_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let cases = temp_dir.path().join("cases.yaml");
    fs::write(
        &cases,
        "schema_version: 0\ncases:\n  - name: drifted\n    in_curr: a\n    out_curr: b\n  - name: never-run\n    in_curr: a\n    out_curr: a\n",
    )
    .unwrap();
    let config = temp_dir.path().join("fieldeq.toml");
    fs::write(&config, "[harness]\nfail_fast = true\n").unwrap();

    let output = fieldeq(&[
        "check",
        cases.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(!out.contains("never-run"));
    assert!(out.contains("0 passed, 1 failed, 1 skipped"));
}

#[test]
fn test_check_invalid_case_file() {
    let path = core_fixture("duplicate_names.yaml");
    let output = fieldeq(&["check", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_DUPLICATE_CASE"));
}

#[test]
fn test_check_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("fieldeq.toml");
    fs::write(&config, "[logging]\nprofile = \"loud\"\n").unwrap();
    let path = core_fixture("service_cases.yaml");

    let output = fieldeq(&[
        "check",
        path.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_CONFIG"));
}

#[test]
fn test_compare_quantity() {
    let output = fieldeq(&[
        "compare",
        "--in-prev",
        "null",
        "--in-curr",
        "-.4272625998Mi",
        "--out-prev",
        "null",
        "--out-curr",
        "-448017308m",
    ]);
    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "equivalent");
}

#[test]
fn test_compare_different_still_exits_zero() {
    let output = fieldeq(&["compare", "--in-curr", "a", "--out-curr", "b", "--explain"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("different (transform: identity"));
}

#[test]
fn test_compare_literal_config_block() {
    let output = fieldeq(&[
        "compare",
        "--literal",
        "--in-curr",
        "maxClientCnxns=60\ntickTime=2000",
        "--out-curr",
        "tickTime=2000\nmaxClientCnxns=60\ninitLimit=10",
        "--explain",
    ]);
    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("current: config_subset"));
}

#[test]
fn test_compare_rejects_container_values() {
    let output = fieldeq(&["compare", "--in-curr", "[1, 2]"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_input_compare() {
    let output = fieldeq(&["input-compare", "--prev", "null"]);
    assert_eq!(stdout(&output).trim(), "unchanged");

    let output = fieldeq(&["input-compare", "--prev", "3", "--curr", "4"]);
    assert_eq!(stdout(&output).trim(), "changed");
}
