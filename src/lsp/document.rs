use crate::validation::{analyze_document, DocumentReport};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Analysis of `content`, refreshed on every change
    pub report: DocumentReport,
}

impl DocumentState {
    pub fn new(content: String) -> Self {
        let report = analyze_document(&content);
        Self { content, report }
    }
}
