//! Report rendering
//!
//! Turns a [`DocumentReport`] into text, JSON, or CSV output.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::parser::ParseRecord;
use crate::validation::{DocumentReport, LineOutcome, LineReport, Statistics};

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub include_comments: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    generated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    total_lines: usize,
    successful: usize,
    errors: usize,
    comments: usize,
}

#[derive(Serialize)]
struct LineEntry<'a> {
    line: usize,
    input: &'a str,
    comment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ParseRecord>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    results: Vec<LineEntry<'a>>,
}

/// Render `report` for the document named `source`
pub fn render(report: &DocumentReport, source: Option<&str>, options: ReportOptions) -> Result<String> {
    let lines: Vec<&LineReport> = report
        .lines
        .iter()
        .filter(|line| options.include_comments || !line.is_comment())
        .collect();

    match options.format {
        OutputFormat::Text => Ok(render_text(&lines, &report.statistics, source)),
        OutputFormat::Json => render_json(&lines, &report.statistics, source),
        OutputFormat::Csv => Ok(render_csv(&lines)),
    }
}

fn render_text(lines: &[&LineReport], stats: &Statistics, source: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(source) = source {
        let _ = writeln!(out, "== {}", source);
    }

    for line in lines {
        let _ = writeln!(out, "Line {}: {}", line.line, line.input);
        match &line.outcome {
            LineOutcome::Comment => out.push_str("  comment\n"),
            LineOutcome::Statement(Ok(statement)) => {
                let _ = writeln!(out, "  OK {}: {}", statement.type_name(), statement);
            }
            LineOutcome::Statement(Err(diagnostic)) => {
                let _ = writeln!(
                    out,
                    "  ERROR ({}) {} at {}",
                    diagnostic.kind().as_str(),
                    diagnostic,
                    diagnostic.position()
                );
            }
        }
    }

    if stats.processed() > 0 {
        let _ = writeln!(
            out,
            "Parsed {}/{} lines successfully ({:.1}%)",
            stats.successful,
            stats.processed(),
            stats.success_rate()
        );
    }

    out
}

fn render_json(lines: &[&LineReport], stats: &Statistics, source: Option<&str>) -> Result<String> {
    let json = JsonReport {
        metadata: Metadata {
            generated: chrono::Utc::now().to_rfc3339(),
            source,
            total_lines: stats.total,
            successful: stats.successful,
            errors: stats.errors,
            comments: stats.comments,
        },
        results: lines
            .iter()
            .map(|line| LineEntry {
                line: line.line,
                input: &line.input,
                comment: line.is_comment(),
                result: line.result().map(ParseRecord::from),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&json)?)
}

const CSV_HEADER: &str = "line,input,type,result,labels,expression,error,error_line,error_column";

fn render_csv(lines: &[&LineReport]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for line in lines {
        let mut fields = vec![line.line.to_string(), csv_field(&line.input)];

        match line.result().map(ParseRecord::from) {
            None => {
                fields.extend([String::new(), "COMMENT".to_string()]);
                fields.extend(std::iter::repeat_n(String::new(), 5));
            }
            Some(record) if record.success => {
                let labels = record
                    .labels
                    .map(|labels| labels.join(","))
                    .or(record.label)
                    .unwrap_or_default();
                fields.extend([
                    record.statement_type.unwrap_or_default().to_string(),
                    "SUCCESS".to_string(),
                    csv_field(&labels),
                    csv_field(record.expression.as_deref().unwrap_or("")),
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            }
            Some(record) => {
                fields.extend([
                    String::new(),
                    "ERROR".to_string(),
                    String::new(),
                    String::new(),
                    csv_field(record.error.as_deref().unwrap_or("")),
                    record.line.to_string(),
                    record.column.to_string(),
                ]);
            }
        }

        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
