//! Statement Diagnostics
//!
//! The closed set of errors a statement can fail with. Every diagnostic
//! carries the position it was detected at; the constructors below are the
//! only place message wording lives.

use serde::Serialize;
use thiserror::Error;

use crate::parser::position::Position;

/// Which stage rejected the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "lexical",
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::Semantic => "semantic",
        }
    }
}

/// The offending value of a semantic error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticDetails {
    Label(String),
    Identifier(String),
}

/// A single, positioned error for one statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A character outside the statement alphabet
    #[error("{message}")]
    Lexical {
        message: String,
        position: Position,
        offending_char: char,
    },
    /// The token stream does not have the required shape
    #[error("{message}")]
    Syntax {
        message: String,
        position: Position,
        expected: String,
        found: Option<String>,
    },
    /// Well-formed tokens that break a label or identifier rule
    #[error("{message}")]
    Semantic {
        message: String,
        position: Position,
        details: SemanticDetails,
    },
}

impl Diagnostic {
    pub fn unexpected_token(
        position: Position,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        let found = found.into();
        Diagnostic::Syntax {
            message: format!("Unexpected token. Expected: {}, found: {}", expected, found),
            position,
            expected,
            found: Some(found),
        }
    }

    pub fn missing_token(
        position: Position,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        Diagnostic::Syntax {
            message: format!("Missing token: {}", expected),
            position,
            expected,
            found: Some(found.into()),
        }
    }

    pub fn invalid_label(position: Position, label: &str) -> Self {
        Diagnostic::Semantic {
            message: format!(
                "Invalid label: {}. A label must be an integer from 1 to 99999",
                label
            ),
            position,
            details: SemanticDetails::Label(label.to_string()),
        }
    }

    pub fn invalid_identifier(position: Position, identifier: &str) -> Self {
        Diagnostic::Semantic {
            message: format!("Invalid identifier: {}", identifier),
            position,
            details: SemanticDetails::Identifier(identifier.to_string()),
        }
    }

    pub fn invalid_character(position: Position, ch: char) -> Self {
        Diagnostic::Lexical {
            message: format!("Invalid character: {}", ch),
            position,
            offending_char: ch,
        }
    }

    pub fn missing_expression(position: Position, found: impl Into<String>) -> Self {
        Diagnostic::Syntax {
            message: "Missing expression after comma".to_string(),
            position,
            expected: "expression (label or variable)".to_string(),
            found: Some(found.into()),
        }
    }

    pub fn unexpected_end_of_input(position: Position, expected: impl Into<String>) -> Self {
        Diagnostic::Syntax {
            message: "Unexpected end of input".to_string(),
            position,
            expected: expected.into(),
            found: Some("end of input".to_string()),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::Lexical { .. } => DiagnosticKind::Lexical,
            Diagnostic::Syntax { .. } => DiagnosticKind::Syntax,
            Diagnostic::Semantic { .. } => DiagnosticKind::Semantic,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Diagnostic::Lexical { position, .. }
            | Diagnostic::Syntax { position, .. }
            | Diagnostic::Semantic { position, .. } => *position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Lexical { message, .. }
            | Diagnostic::Syntax { message, .. }
            | Diagnostic::Semantic { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_wording() {
        let diag = Diagnostic::unexpected_token(Position::new(1, 15), ")", "INTEGER");
        assert_eq!(diag.kind(), DiagnosticKind::Syntax);
        assert_eq!(
            diag.to_string(),
            "Unexpected token. Expected: ), found: INTEGER"
        );
        assert_eq!(diag.position(), Position::new(1, 15));
    }

    #[test]
    fn test_invalid_label_carries_label() {
        let diag = Diagnostic::invalid_label(Position::new(1, 7), "0");
        match &diag {
            Diagnostic::Semantic { details, .. } => {
                assert_eq!(details, &SemanticDetails::Label("0".to_string()));
            }
            other => panic!("Expected semantic diagnostic, got {:?}", other),
        }
        assert!(diag.message().contains("1 to 99999"));
    }

    #[test]
    fn test_invalid_character_is_lexical() {
        let diag = Diagnostic::invalid_character(Position::new(1, 7), '#');
        assert_eq!(diag.kind(), DiagnosticKind::Lexical);
        assert_eq!(diag.message(), "Invalid character: #");
    }

    #[test]
    fn test_end_of_input_reports_found() {
        let diag = Diagnostic::unexpected_end_of_input(Position::new(1, 6), "label");
        if let Diagnostic::Syntax { expected, found, .. } = diag {
            assert_eq!(expected, "label");
            assert_eq!(found.as_deref(), Some("end of input"));
        } else {
            panic!("Expected syntax diagnostic");
        }
    }

    #[test]
    fn test_semantic_details_serialize_as_object() {
        let json = serde_json::to_value(SemanticDetails::Identifier("ABCDEFG".to_string()))
            .expect("serialize details");
        assert_eq!(json, serde_json::json!({ "identifier": "ABCDEFG" }));
    }
}
