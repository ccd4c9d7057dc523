//! Statement Validation
//!
//! Label/identifier rules and the document-level engine built on the parser.

pub mod engine;
pub mod rules;

pub use engine::{
    analyze_document, analyze_line, is_comment_line, DocumentReport, LineOutcome, LineReport,
    Statistics,
};
pub use rules::{is_valid_identifier, is_valid_label};
