//! Statement Parser
//!
//! Recursive descent over the token list with one token of lookahead.
//! The token after `GO TO` decides the statement shape:
//!
//! ```text
//! statement := GO TO ( "(" labels ")" "," expr | INTEGER | IDENTIFIER ) EOF
//! labels    := INTEGER ( "," INTEGER )*
//! expr      := INTEGER | IDENTIFIER
//! ```

use crate::core::diagnostics::Diagnostic;
use crate::parser::ast::{ParseResult, Statement};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::position::Position;
use crate::validation::rules::{is_valid_identifier, is_valid_label};

const EXPECTED_TARGET: &str = "INTEGER, IDENTIFIER or (";
const EXPECTED_LABEL: &str = "label (integer)";
const EXPECTED_END: &str = "end of statement";

/// Parser state: the tokens and the index of the lookahead token
pub struct StatementParser {
    tokens: Vec<Token>,
    index: usize,
}

impl StatementParser {
    /// The token list should end with `EOF`; one is appended if it does not.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let position = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: None,
                position,
            });
        }

        Self { tokens, index: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the lookahead token. `EOF` is never consumed.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> Diagnostic {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            Diagnostic::unexpected_end_of_input(token.position, expected)
        } else {
            Diagnostic::unexpected_token(token.position, expected, token.kind.to_string())
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_keyword(&mut self, kind: TokenKind) -> Result<(), Diagnostic> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            let token = self.peek();
            Err(Diagnostic::missing_token(
                token.position,
                kind.to_string(),
                token.kind.to_string(),
            ))
        }
    }

    /// Parse the whole statement, stopping at the first error
    pub fn parse(mut self) -> ParseResult {
        self.expect_keyword(TokenKind::Go)?;
        self.expect_keyword(TokenKind::To)?;

        let statement = match self.peek().kind {
            TokenKind::LParen => self.parse_computed()?,
            TokenKind::Integer => self.parse_unconditional()?,
            TokenKind::Identifier => self.parse_assigned()?,
            _ => return Err(self.unexpected(EXPECTED_TARGET)),
        };

        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected(EXPECTED_END));
        }

        Ok(statement)
    }

    fn parse_unconditional(&mut self) -> Result<Statement, Diagnostic> {
        let (label, position) = self.parse_label()?;
        Ok(Statement::Unconditional { label, position })
    }

    fn parse_computed(&mut self) -> Result<Statement, Diagnostic> {
        let open = self.expect(TokenKind::LParen, "(")?;
        let labels = self.parse_label_list()?;
        self.expect(TokenKind::RParen, ")")?;

        if !self.check(TokenKind::Comma) {
            let token = self.peek();
            return Err(Diagnostic::missing_token(
                token.position,
                ",",
                token.kind.to_string(),
            ));
        }
        self.advance();

        if !matches!(self.peek().kind, TokenKind::Integer | TokenKind::Identifier) {
            let token = self.peek();
            return Err(Diagnostic::missing_expression(
                token.position,
                token.kind.to_string(),
            ));
        }
        let expression = self.advance();

        Ok(Statement::Computed {
            labels,
            expression: expression.text().to_string(),
            position: open.position,
        })
    }

    /// One or more comma-separated labels; an empty slot is an error
    fn parse_label_list(&mut self) -> Result<Vec<String>, Diagnostic> {
        let mut labels = vec![self.parse_label()?.0];

        while self.check(TokenKind::Comma) {
            self.advance();
            labels.push(self.parse_label()?.0);
        }

        Ok(labels)
    }

    fn parse_label(&mut self) -> Result<(String, Position), Diagnostic> {
        let token = self.expect(TokenKind::Integer, EXPECTED_LABEL)?;
        let label = token.text();
        if !is_valid_label(label) {
            return Err(Diagnostic::invalid_label(token.position, label));
        }
        Ok((label.to_string(), token.position))
    }

    fn parse_assigned(&mut self) -> Result<Statement, Diagnostic> {
        let token = self.expect(TokenKind::Identifier, EXPECTED_TARGET)?;
        let name = token.text();
        if !is_valid_identifier(name) {
            return Err(Diagnostic::invalid_identifier(token.position, name));
        }
        Ok(Statement::Assigned {
            expression: name.to_string(),
            position: token.position,
        })
    }
}
