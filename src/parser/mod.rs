//! Branch Statement Parser
//!
//! Scanning and recursive-descent parsing of `GO TO` statements, one line
//! at a time.

pub mod ast;
pub mod lexer;
pub mod position;
pub mod statement;

pub use ast::{ParseRecord, ParseResult, Statement};
pub use lexer::{tokenize_line, Lexer, Token, TokenKind};
pub use position::Position;
pub use statement::StatementParser;

/// Parse a single statement line
///
/// This is the main entry point. A lexical error is returned as-is without
/// running the parser; otherwise the parser's statement or first
/// diagnostic is returned. No state survives between calls.
pub fn parse_statement(line: &str) -> ParseResult {
    let tokens = lexer::tokenize_line(line)?;
    let result = StatementParser::new(tokens).parse();

    match &result {
        Ok(statement) => log::trace!("parsed {:?} statement: {}", statement.type_name(), statement),
        Err(diagnostic) => log::trace!("statement rejected at {}: {}", diagnostic.position(), diagnostic),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticKind;

    #[test]
    fn test_parse_unconditional() {
        let result = parse_statement("GO TO 100");
        assert!(matches!(result, Ok(Statement::Unconditional { ref label, .. }) if label == "100"));
    }

    #[test]
    fn test_lexical_error_short_circuits() {
        let err = parse_statement("GO TO 123VAR").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::Lexical);
        assert_eq!(err.position(), Position::new(1, 10));
    }

    #[test]
    fn test_whitespace_and_case_insensitive() {
        let expected = parse_statement("GO TO 100").unwrap();
        for input in ["go to 100", "Go To 100", "GO  TO  100"] {
            let statement = parse_statement(input).unwrap();
            assert_eq!(statement.to_string(), expected.to_string());
            assert_eq!(statement.target_labels(), expected.target_labels());
        }
    }
}
