//! Statement Lexer
//!
//! Turns one line of source text into tokens. Keywords are case-folded,
//! whitespace is dropped, and a `C`/`c` in the first column comments out
//! the rest of its line. Scanning stops at the first bad character.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::core::diagnostics::Diagnostic;
use crate::parser::position::Position;

/// Token types of a branch statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `GO` keyword
    Go,
    /// `TO` keyword
    To,
    /// Digit run, not yet range-checked
    Integer,
    /// Upper-cased name that is not a keyword
    Identifier,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Go => "GO",
            TokenKind::To => "TO",
            TokenKind::Integer => "INTEGER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A token with its text and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub position: Position,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            position,
        }
    }

    fn eof(position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: None,
            position,
        }
    }

    /// Token text, empty for `EOF`
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Character cursor over a single input
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: Position::default(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position.advance(ch);
        Some(ch)
    }

    /// Skip through the end of the current line, newline included
    fn skip_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Produce the next token, or `EOF` once the input is exhausted
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        while let Some(ch) = self.peek() {
            if self.position.at_line_start() && matches!(ch, 'C' | 'c') {
                self.skip_comment();
                continue;
            }

            if ch.is_whitespace() {
                self.bump();
                continue;
            }

            let start = self.position;

            if ch.is_ascii_digit() {
                return self.scan_integer(start);
            }

            if ch.is_ascii_alphabetic() {
                return Ok(self.scan_word(start));
            }

            let kind = match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ',' => TokenKind::Comma,
                other => return Err(Diagnostic::invalid_character(start, other)),
            };
            self.bump();
            return Ok(Token::new(kind, ch, start));
        }

        Ok(Token::eof(self.position))
    }

    fn scan_integer(&mut self, start: Position) -> Result<Token, Diagnostic> {
        let mut digits = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.bump();
        }

        // `123ABC`: the letter is reported, not the digits
        if let Some(ch) = self.peek().filter(char::is_ascii_alphabetic) {
            return Err(Diagnostic::invalid_character(self.position, ch));
        }

        Ok(Token::new(TokenKind::Integer, digits, start))
    }

    fn scan_word(&mut self, start: Position) -> Token {
        let mut word = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_alphanumeric) {
            word.push(ch.to_ascii_uppercase());
            self.bump();
        }

        let kind = match word.as_str() {
            "GO" => TokenKind::Go,
            "TO" => TokenKind::To,
            _ => TokenKind::Identifier,
        };
        Token::new(kind, word, start)
    }

    /// Scan the whole input. The last token is always `EOF`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Tokenize a line of source text
pub fn tokenize_line(line: &str) -> Result<Vec<Token>, Diagnostic> {
    Lexer::new(line).tokenize()
}
