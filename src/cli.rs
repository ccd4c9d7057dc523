//! Batch checking of source files

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::report::{render, ReportOptions};
use crate::validation::{analyze_document, DocumentReport};

/// Read and analyze one file
pub fn check_file(path: &Path) -> Result<DocumentReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(analyze_document(&content))
}

/// Check `files` and write the rendered reports to `output` or stdout.
///
/// Returns `true` when every statement in every file parsed.
pub fn run_check(config: &Config, files: &[PathBuf], output: Option<&Path>) -> Result<bool> {
    let options = ReportOptions {
        format: config.format,
        include_comments: config.include_comments,
    };

    let mut rendered = String::new();
    let mut all_valid = true;

    for path in files {
        let report = check_file(path)?;
        log::info!(
            "{}: {}/{} statements parsed",
            path.display(),
            report.statistics.successful,
            report.statistics.processed()
        );
        all_valid &= report.is_valid();

        let source = path.to_string_lossy();
        rendered.push_str(&render(&report, Some(source.as_ref()), options)?);
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
    }

    match output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("Failed to write report to stdout")?,
    }

    Ok(all_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;

    #[test]
    fn test_run_check_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("prog.f");
        fs::write(&source, "C demo\n      GO TO 10\n      GO TO (1, 2), N\n").unwrap();
        let output = dir.path().join("report.csv");

        let config = Config {
            format: OutputFormat::Csv,
            ..Config::default()
        };
        let ok = run_check(&config, &[source], Some(&output)).unwrap();

        assert!(ok);
        let csv = fs::read_to_string(&output).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.contains("2,GO TO 10,unconditional,SUCCESS,10,,,,"));
    }

    #[test]
    fn test_run_check_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.f");
        fs::write(&source, "GO TO 0\n").unwrap();
        let output = dir.path().join("report.txt");

        let ok = run_check(&Config::default(), &[source], Some(&output)).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_file(&dir.path().join("missing.f")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
