//! Core Diagnostics
//!
//! Error model shared by the scanner and the statement parser.

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticKind, SemanticDetails};
