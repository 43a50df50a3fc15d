use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn sheetbill() -> Command {
    Command::cargo_bin("sheetbill").unwrap()
}

#[test]
fn sample_then_process_generic() {
    let dir = tempdir().unwrap();
    let grid = dir.path().join("invoice.json");

    sheetbill()
        .args(["sample", grid.to_str().unwrap()])
        .assert()
        .success();

    sheetbill()
        .args(["process", grid.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoiceNumber\":\"INV-001\""))
        .stdout(predicate::str::contains("\"subtotal\""));
}

#[test]
fn process_gst_text_includes_words() {
    let dir = tempdir().unwrap();
    let grid = dir.path().join("gst.json");

    sheetbill()
        .args(["sample", "--layout", "gst", grid.to_str().unwrap()])
        .assert()
        .success();

    sheetbill()
        .args(["process", "--layout", "gst", "--format", "text", grid.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tax Invoice: INV-000001"))
        .stdout(predicate::str::contains(
            "Total In Words: Indian Rupee Two Hundred Eighty Eight Only",
        ));
}

#[test]
fn process_writes_output_file() {
    let dir = tempdir().unwrap();
    let grid = dir.path().join("invoice.json");
    let out = dir.path().join("items.csv");

    sheetbill()
        .args(["sample", grid.to_str().unwrap()])
        .assert()
        .success();

    sheetbill()
        .args([
            "process",
            "--format",
            "csv",
            "--output",
            out.to_str().unwrap(),
            grid.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("invoice_number,description,price,quantity,amount"));
}

#[test]
fn process_missing_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    sheetbill()
        .args(["process", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn words_prints_indian_phrase() {
    sheetbill()
        .args(["words", "100000"])
        .assert()
        .success()
        .stdout("One Lakh\n");

    sheetbill()
        .args(["words", "1234567"])
        .assert()
        .success()
        .stdout("Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven\n");
}

#[test]
fn words_amount_and_bad_input() {
    sheetbill()
        .args(["words", "--amount", "288.54"])
        .assert()
        .success()
        .stdout("Indian Rupee Two Hundred Eighty Eight Only\n");

    sheetbill()
        .args(["words", "ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number"));
}

#[test]
fn batch_continues_and_writes_summary() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    for name in ["a.json", "b.json"] {
        sheetbill()
            .args(["sample", inputs.join(name).to_str().unwrap()])
            .assert()
            .success();
    }
    fs::write(inputs.join("broken.json"), "not a grid").unwrap();

    let pattern = inputs.join("*.json");
    sheetbill()
        .args([
            "batch",
            pattern.to_str().unwrap(),
            "--output-dir",
            outputs.to_str().unwrap(),
            "--summary",
            "--continue-on-error",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(outputs.join("a.json").exists());
    assert!(outputs.join("b.json").exists());
    assert!(!outputs.join("broken.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 4);
    assert!(summary.contains("broken.json,failed"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "[[").unwrap();

    sheetbill()
        .args(["batch", dir.path().join("*.json").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_set_changes_amount_wording() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("sheetbill.json");
    let config = config.to_str().unwrap();

    sheetbill()
        .args(["--config", config, "config", "init"])
        .assert()
        .success();
    sheetbill()
        .args(["--config", config, "config", "set", "words.currency", "Rupees"])
        .assert()
        .success();
    sheetbill()
        .args(["--config", config, "config", "set", "output.decimal_places", "two"])
        .assert()
        .failure();

    sheetbill()
        .args(["--config", config, "config", "get", "words.currency"])
        .assert()
        .success()
        .stdout("Rupees\n");
    sheetbill()
        .args(["--config", config, "words", "--amount", "5"])
        .assert()
        .success()
        .stdout("Rupees Five Only\n");
}

#[test]
fn oversized_amount_is_reported_not_panicked() {
    let dir = tempdir().unwrap();
    let grid = dir.path().join("big.json");
    fs::write(
        &grid,
        r#"[[], [], [], ["Big", "50000000000000000000000000000", 2]]"#,
    )
    .unwrap();

    sheetbill()
        .args(["process", grid.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount is out of range at row 3"))
        .stderr(predicate::str::contains("panicked").not());
}
