//! Parsed branch statements
//!
//! The three statement shapes, the per-line parse result, and the flat
//! record that result serializes to.

use std::fmt;

use serde::Serialize;

use crate::core::diagnostics::{Diagnostic, DiagnosticKind, SemanticDetails};
use crate::parser::position::Position;

/// A successfully recognized branch statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `GO TO 100`
    Unconditional { label: String, position: Position },
    /// `GO TO (10, 20, 30), I`
    Computed {
        labels: Vec<String>,
        expression: String,
        position: Position,
    },
    /// `GO TO VAR`
    Assigned {
        expression: String,
        position: Position,
    },
}

/// Outcome of parsing one line: a statement or the first diagnostic hit
pub type ParseResult = Result<Statement, Diagnostic>;

impl Statement {
    /// Type tag used in records and reports
    pub fn type_name(&self) -> &'static str {
        match self {
            Statement::Unconditional { .. } => "unconditional",
            Statement::Computed { .. } => "computed",
            Statement::Assigned { .. } => "assigned",
        }
    }

    /// Human-readable statement kind
    pub fn description(&self) -> &'static str {
        match self {
            Statement::Unconditional { .. } => "Unconditional GO TO",
            Statement::Computed { .. } => "Computed GO TO",
            Statement::Assigned { .. } => "Assigned GO TO",
        }
    }

    /// Where the branch target starts (label, opening paren, or variable)
    pub fn position(&self) -> Position {
        match self {
            Statement::Unconditional { position, .. }
            | Statement::Computed { position, .. }
            | Statement::Assigned { position, .. } => *position,
        }
    }

    /// Every label this statement can transfer to, in source order
    pub fn target_labels(&self) -> &[String] {
        match self {
            Statement::Unconditional { label, .. } => std::slice::from_ref(label),
            Statement::Computed { labels, .. } => labels,
            Statement::Assigned { .. } => &[],
        }
    }
}

/// Canonical source form; parsing it again gives back the same statement
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Unconditional { label, .. } => write!(f, "GO TO {}", label),
            Statement::Computed {
                labels, expression, ..
            } => write!(f, "GO TO ({}), {}", labels.join(", "), expression),
            Statement::Assigned { expression, .. } => write!(f, "GO TO {}", expression),
        }
    }
}

/// Flat, serializable form of a [`ParseResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseRecord {
    pub success: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub statement_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosticKind>,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<SemanticDetails>,
    #[serde(rename = "char", skip_serializing_if = "Option::is_none")]
    pub offending_char: Option<char>,
}

impl ParseRecord {
    fn empty(success: bool, position: Position) -> Self {
        Self {
            success,
            statement_type: None,
            error: None,
            kind: None,
            line: position.line,
            column: position.column,
            label: None,
            labels: None,
            expression: None,
            expected: None,
            found: None,
            details: None,
            offending_char: None,
        }
    }
}

impl From<&Statement> for ParseRecord {
    fn from(statement: &Statement) -> Self {
        let mut record = ParseRecord::empty(true, statement.position());
        record.statement_type = Some(statement.type_name());

        match statement {
            Statement::Unconditional { label, .. } => {
                record.label = Some(label.clone());
            }
            Statement::Computed {
                labels, expression, ..
            } => {
                record.labels = Some(labels.clone());
                record.expression = Some(expression.clone());
            }
            Statement::Assigned { expression, .. } => {
                record.expression = Some(expression.clone());
            }
        }

        record
    }
}

impl From<&Diagnostic> for ParseRecord {
    fn from(diagnostic: &Diagnostic) -> Self {
        let mut record = ParseRecord::empty(false, diagnostic.position());
        record.error = Some(diagnostic.message().to_string());
        record.kind = Some(diagnostic.kind());

        match diagnostic {
            Diagnostic::Lexical { offending_char, .. } => {
                record.offending_char = Some(*offending_char);
            }
            Diagnostic::Syntax {
                expected, found, ..
            } => {
                record.expected = Some(expected.clone());
                record.found = found.clone();
            }
            Diagnostic::Semantic { details, .. } => {
                record.details = Some(details.clone());
            }
        }

        record
    }
}

impl From<&ParseResult> for ParseRecord {
    fn from(result: &ParseResult) -> Self {
        match result {
            Ok(statement) => statement.into(),
            Err(diagnostic) => diagnostic.into(),
        }
    }
}
