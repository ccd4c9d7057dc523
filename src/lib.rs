//! GO TO Language Server
//!
//! Recognition and validation of `GO TO` branch statements: unconditional
//! (`GO TO 100`), computed (`GO TO (10, 20), I`) and assigned
//! (`GO TO VAR`).
//!
//! This library provides:
//! - A line scanner and recursive-descent statement parser
//! - Positioned lexical, syntax and semantic diagnostics
//! - Document analysis with statistics and text/JSON/CSV reports
//! - An LSP implementation publishing those diagnostics

pub mod cli;
pub mod config;
pub mod core;
pub mod lsp;
pub mod parser;
pub mod report;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{Diagnostic, DiagnosticKind};
pub use parser::{parse_statement, ParseRecord, ParseResult, Statement};
pub use report::OutputFormat;
pub use validation::{analyze_document, DocumentReport};
