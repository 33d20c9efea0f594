//! Integration tests for the receipt-collector CLI.
//!
//! These tests run the actual binary against checked-in fixtures and
//! temporary directory trees.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(name: &str) -> String {
    format!("tests/data/{}", name)
}

/// Run the binary with the given arguments and return stdout
fn run_collector(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("receipt-collector").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Split a report into its blocks, each with item lines sorted
fn normalize_report(report: &str) -> Vec<Vec<String>> {
    let mut blocks: Vec<Vec<String>> = report
        .split("\n\n")
        .map(|block| {
            let mut lines: Vec<String> = block.lines().map(str::to_string).collect();
            if lines.len() > 1 {
                lines[1..].sort();
            }
            lines
        })
        .filter(|lines| !lines.is_empty())
        .collect();
    blocks.sort();
    blocks
}

#[test]
fn test_sample_report_matches_expected() {
    let output = run_collector(&[&test_data_path("receipts")]);
    let expected = fs::read_to_string(test_data_path("expected_report.txt")).unwrap();

    assert_eq!(output, expected);
}

#[test]
fn test_unordered_output_has_same_content() {
    let output = run_collector(&[&test_data_path("receipts"), "--order", "unordered"]);
    let expected = fs::read_to_string(test_data_path("expected_report.txt")).unwrap();

    assert_eq!(normalize_report(&output), normalize_report(&expected));
}

#[test]
fn test_output_starts_with_total_block() {
    let output = run_collector(&[&test_data_path("receipts")]);
    assert!(output.starts_with("==== Total ====\n"));
}

#[test]
fn test_missing_root_error() {
    let mut cmd = Command::cargo_bin("receipt-collector").unwrap();
    cmd.arg("does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error"));
}

#[test]
fn test_unsupported_file_fails_whole_run() {
    let root = TempDir::new().unwrap();
    let client = root.path().join("client1");
    fs::create_dir(&client).unwrap();
    fs::write(client.join("r1.csv"), "id,quantity,note,price,tax,time\nX,1,,0,0,t\n").unwrap();
    fs::write(client.join("notes.txt"), "not a receipt").unwrap();

    let mut cmd = Command::cargo_bin("receipt-collector").unwrap();
    cmd.arg(root.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported receipt format"));
}

#[test]
fn test_partial_policy_reports_skipped_files() {
    let root = TempDir::new().unwrap();
    let client = root.path().join("client1");
    fs::create_dir(&client).unwrap();
    fs::write(client.join("r1.csv"), "id,quantity,note,price,tax,time\nX,4,,0,0,t\n").unwrap();
    fs::write(client.join("r2.csv"), "id,quantity,note,price,tax,time\nX,1,,0\n").unwrap();

    let mut cmd = Command::cargo_bin("receipt-collector").unwrap();
    cmd.arg(root.path())
        .args(["--policy", "partial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==== client: client1 ====\nX:    4\n"))
        .stderr(predicate::str::contains("expected 6 columns, found 4"))
        .stderr(predicate::str::contains("1 unreadable entries"));
}

#[test]
fn test_empty_root_prints_empty_total() {
    let root = TempDir::new().unwrap();
    let output = run_collector(&[root.path().to_str().unwrap()]);
    assert_eq!(output, "==== Total ====\n\n");
}
