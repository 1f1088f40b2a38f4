//! End-to-end tests for the `cardledger` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HDFC_TEXT: &str = "HDFC Bank Credit Card Statement\n\
Statement Period: 01/03/2024 to 31/03/2024\n\
Date Transaction Description Amount (in Rs.)\n\
01/03/2024 AMAZON PAY INDIA 1,250.00\n\
05/03/2024 SWIGGY 450.00\n\
BANGALORE IN\n\
\x0c\
07/03/2024 REVERSAL 120.00 Cr\n\
Total Dues: 1,580.00\n";

fn cardledger() -> Command {
    Command::cargo_bin("cardledger").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// process
// =============================================================================

#[test]
fn test_process_text_dump_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "hdfc.txt", HDFC_TEXT);

    cardledger()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bank\": \"hdfc\""))
        .stdout(predicate::str::contains("SWIGGY BANGALORE IN"))
        .stdout(predicate::str::contains("\"direction\": \"credit\""))
        .stdout(predicate::str::contains("\"lines\"").not());
}

#[test]
fn test_process_audit_keeps_lines() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "hdfc.txt", HDFC_TEXT);

    cardledger()
        .args(["process", "--audit"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lines\""))
        .stdout(predicate::str::contains("\"role\": \"transaction\""));
}

#[test]
fn test_process_csv_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "hdfc.txt", HDFC_TEXT);
    let output = dir.path().join("out.csv");

    cardledger()
        .args(["process", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("date,description,amount,direction,category,confidence,source_lines")
    );
    assert_eq!(
        lines.next(),
        Some("2024-03-01,AMAZON PAY INDIA,1250.00,debit,Shopping & E-commerce,high,0:3")
    );
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_process_json_pages_input() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "pages.json",
        r#"[["HDFC Bank", "01/03/2024 ZOMATO 300.00"], ["Total Due: 300.00"]]"#,
    );

    cardledger()
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank: HDFC Bank"))
        .stdout(predicate::str::contains("ZOMATO"))
        .stdout(predicate::str::contains("Food & Dining"));
}

#[test]
fn test_process_ocr_flag_lowers_confidence() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "hdfc.txt", HDFC_TEXT);

    cardledger()
        .args(["process", "--ocr"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"confidence\": \"low\""))
        .stdout(predicate::str::contains("ocr_source"));
}

#[test]
fn test_process_empty_document_reports_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "blank.txt", "\n   \n");

    cardledger()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("document_empty"))
        .stderr(predicate::str::contains("No recognizable lines"));
}

#[test]
fn test_process_missing_file_fails() {
    cardledger()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_unsupported_format_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "statement.pdf", "%PDF-1.4");

    cardledger()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_process_summary_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "hdfc.txt", HDFC_TEXT);
    let summary = dir.path().join("summary.csv");

    cardledger()
        .arg("process")
        .arg(&input)
        .arg("--summary-csv")
        .arg(&summary)
        .assert()
        .success();

    let csv = fs::read_to_string(&summary).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("hdfc.txt,success,hdfc,,2024-03-01,2024-03-31,"), "{row}");
}

#[test]
fn test_process_reports_cardholder_name() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "named.txt",
        "HDFC Bank Credit Card Statement\n\
Name : RAHUL SHARMA  Email : rahul@example.com\n\
01/03/2024 AMAZON PAY INDIA 1,250.00\n",
    );
    let summary = dir.path().join("summary.csv");

    cardledger()
        .args(["process", "--format", "text", "--summary-csv"])
        .arg(&summary)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cardholder: RAHUL SHARMA"));

    let csv = fs::read_to_string(&summary).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("filename,status,bank,cardholder_name,"));
    assert!(lines.next().unwrap().starts_with("named.txt,success,hdfc,RAHUL SHARMA,"));
}

// =============================================================================
// batch
// =============================================================================

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", HDFC_TEXT);
    write(dir.path(), "b.txt", "ACME CARD SERVICES\n01/03/2024 COFFEE HOUSE 90.00\n");
    write(dir.path(), "notes.md", "ignored");
    let out = dir.path().join("out");

    cardledger()
        .arg("batch")
        .arg(format!("{}/*", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Summary written"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("a.txt,success,hdfc,"));
    assert!(rows[2].starts_with("b.txt,success,generic,"));
}

#[test]
fn test_batch_continue_on_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.txt", HDFC_TEXT);
    write(dir.path(), "bad.json", "not json");

    cardledger()
        .arg("batch")
        .arg(format!("{}/*", dir.path().display()))
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("bad.json"));

    cardledger()
        .arg("batch")
        .arg(format!("{}/*", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_batch_no_matches_fails() {
    let dir = TempDir::new().unwrap();

    cardledger()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

// =============================================================================
// banks, categorize, config
// =============================================================================

#[test]
fn test_banks_lists_profiles() {
    cardledger()
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("HDFC Bank"))
        .stdout(predicate::str::contains("idfc_first"))
        .stdout(predicate::str::contains("DD-MMM-YY"));
}

#[test]
fn test_categorize_builtin() {
    cardledger()
        .args(["categorize", "SWIGGY", "BANGALORE"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Food & Dining\n"));
}

#[test]
fn test_categorize_with_extra_rule() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"categories": {"extra_rules": [{"pattern": "ACME", "category": "Office", "priority": 300}]}}"#,
    );

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["categorize", "ACME SUPPLIES"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Office\n"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"categories": {"extra_rules": [{"pattern": "(", "category": "Broken"}]}}"#,
    );

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["categorize", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();

    cardledger()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "grammar.max_continuation_lines"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));

    let path = dir.path().join("custom.json");
    cardledger()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    cardledger()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cardledger()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "no.such.key"])
        .assert()
        .failure();
}

#[test]
fn test_config_check_reports_every_bad_rule() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"categories": {"extra_rules": [
            {"pattern": "GYM", "category": "Fitness"},
            {"pattern": "(", "category": "Broken"},
            {"pattern": "[a-", "category": "AlsoBroken"}
        ]}}"#,
    );

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["config", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("categories.extra_rules[1]"))
        .stderr(predicate::str::contains("categories.extra_rules[2]"))
        .stderr(predicate::str::contains("categories.extra_rules[0]").not())
        .stderr(predicate::str::contains("2 problem(s)"));
}

#[test]
fn test_config_check_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"categories": {"extra_rules": [{"pattern": "ACME", "category": "Office"}]}}"#,
    );

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (1 extra category rules)"));
}

#[test]
fn test_config_show_uses_global_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"grammar": {"max_continuation_lines": 7}}"#,
    );

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: loaded"))
        .stdout(predicate::str::contains("\"max_continuation_lines\": 7"));

    cardledger()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "grammar.max_continuation_lines"])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"));
}
