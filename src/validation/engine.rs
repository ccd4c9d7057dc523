//! Document Engine
//!
//! Runs the statement parser over every line of a document, recognizing
//! blank and comment lines, and tallies the outcome.

use crate::parser::{parse_statement, ParseResult, Position};

/// What a non-blank line turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Comment,
    Statement(ParseResult),
}

/// Analysis of one non-blank document line
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    /// 1-based line number in the document
    pub line: usize,
    /// The trimmed text that was analyzed
    pub input: String,
    /// Characters trimmed from the start of the raw line
    pub indent: usize,
    pub outcome: LineOutcome,
}

impl LineReport {
    pub fn is_comment(&self) -> bool {
        matches!(self.outcome, LineOutcome::Comment)
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match &self.outcome {
            LineOutcome::Statement(result) => Some(result),
            LineOutcome::Comment => None,
        }
    }

    /// Map a position inside `input` back onto the raw document line.
    /// Both sides of the result are 0-based, as editors count them.
    pub fn document_offset(&self, position: Position) -> (usize, usize) {
        (
            self.line - 1 + (position.line - 1),
            if position.line == 1 {
                self.indent + position.column - 1
            } else {
                position.column - 1
            },
        )
    }
}

/// Line counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Non-blank lines, comments included
    pub total: usize,
    pub successful: usize,
    pub errors: usize,
    pub comments: usize,
}

impl Statistics {
    fn record(&mut self, report: &LineReport) {
        self.total += 1;
        match report.result() {
            None => self.comments += 1,
            Some(Ok(_)) => self.successful += 1,
            Some(Err(_)) => self.errors += 1,
        }
    }

    /// Lines that went through the parser
    pub fn processed(&self) -> usize {
        self.total - self.comments
    }

    /// Percentage of processed lines that parsed
    pub fn success_rate(&self) -> f64 {
        match self.processed() {
            0 => 0.0,
            processed => self.successful as f64 / processed as f64 * 100.0,
        }
    }
}

/// Result of analyzing a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentReport {
    pub lines: Vec<LineReport>,
    pub statistics: Statistics,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.statistics.errors == 0
    }

    /// Reports for lines that failed to parse
    pub fn failures(&self) -> impl Iterator<Item = &LineReport> {
        self.lines
            .iter()
            .filter(|report| matches!(report.result(), Some(Err(_))))
    }

    /// Report covering a 1-based document line, if that line was analyzed
    pub fn line(&self, line: usize) -> Option<&LineReport> {
        self.lines.iter().find(|report| report.line == line)
    }
}

/// A line whose first non-blank character is `C` or `c`
pub fn is_comment_line(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('C' | 'c'))
}

/// Analyze one raw document line. Blank lines yield `None`.
pub fn analyze_line(line_num: usize, raw: &str) -> Option<LineReport> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }

    let indent = raw.chars().count() - raw.trim_start().chars().count();
    let outcome = if is_comment_line(input) {
        LineOutcome::Comment
    } else {
        LineOutcome::Statement(parse_statement(input))
    };

    Some(LineReport {
        line: line_num,
        input: input.to_string(),
        indent,
        outcome,
    })
}

/// Analyze an entire document, in line order
pub fn analyze_document(content: &str) -> DocumentReport {
    let mut report = DocumentReport::default();

    for (line_idx, line) in content.lines().enumerate() {
        if let Some(line_report) = analyze_line(line_idx + 1, line) {
            report.statistics.record(&line_report);
            report.lines.push(line_report);
        }
    }

    log::debug!(
        "analyzed {} lines: {} ok, {} errors, {} comments",
        report.statistics.total,
        report.statistics.successful,
        report.statistics.errors,
        report.statistics.comments
    );

    report
}
