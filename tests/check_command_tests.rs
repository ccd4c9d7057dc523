mod common;

use std::fs;
use std::process::Command;

use common::bin_path;

fn check(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(bin_path())
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("user-config"))
        .arg("check")
        .args(args)
        .output()
        .expect("Failed to run check command")
}

#[test]
fn check_passes_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("ok.f"),
        "C jumps\n      GO TO 100\n      GO TO (10, 20), K\n",
    )
    .unwrap();

    let output = check(dir.path(), &["ok.f"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("== ok.f"));
    assert!(stdout.contains("OK unconditional: GO TO 100"));
    assert!(stdout.contains("Parsed 2/2 lines successfully (100.0%)"));
}

#[test]
fn check_fails_on_invalid_statement() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.f"), "GO TO 100\nGO 100\n").unwrap();

    let output = check(dir.path(), &["bad.f"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("ERROR (syntax) Missing token: TO at 1:4"));
    assert!(stdout.contains("Parsed 1/2 lines successfully (50.0%)"));
}

#[test]
fn check_honors_project_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".goto-ls.toml"), "format = \"json\"\n").unwrap();
    fs::write(dir.path().join("prog.f"), "GO TO VAR\n").unwrap();

    let output = check(dir.path(), &["prog.f"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(report["metadata"]["totalLines"], 1);
    assert_eq!(report["results"][0]["result"]["type"], "assigned");
}

#[test]
fn check_writes_csv_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prog.f"), "C note\nGO TO 5\n").unwrap();

    let output = check(
        dir.path(),
        &["prog.f", "--format", "csv", "--output", "out.csv", "--no-comments"],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(
        rows[0],
        "line,input,type,result,labels,expression,error,error_line,error_column"
    );
    assert_eq!(rows.len(), 2);
    assert!(rows[1].starts_with("2,GO TO 5,unconditional,SUCCESS"));
}

#[test]
fn check_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = check(dir.path(), &["absent.f"]);
    assert!(!output.status.success());
}
