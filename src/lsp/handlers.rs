use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::core::diagnostics::Diagnostic as StatementDiagnostic;
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::parser::Statement;
use crate::validation::{DocumentReport, LineOutcome, LineReport};

/// Source name attached to published diagnostics
pub const DIAGNOSTIC_SOURCE: &str = "goto-ls";

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let pos = tdpp.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let value = match doc_state
            .report
            .line(pos.line as usize + 1)
            .and_then(hover_markdown)
        {
            Some(value) => value,
            None => return Ok(None),
        };

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: None,
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = doc_state
            .content
            .lines()
            .nth(pos.line as usize)
            .unwrap_or("");
        let prefix = utf16_prefix(line, pos.character as usize);

        let completions = statement_completions(prefix);
        if completions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(completions)))
        }
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    async fn create_document_state(&self, content: String) -> DocumentState {
        DocumentState::new(content)
    }

    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let diagnostics: Vec<_> = doc_state
            .report
            .failures()
            .filter_map(|line| match &line.outcome {
                LineOutcome::Statement(Err(diagnostic)) => {
                    Some(to_lsp_diagnostic(line, diagnostic))
                }
                _ => None,
            })
            .collect();
        drop(docs);

        log::debug!("publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(Some(DocumentSymbolResponse::Nested(document_symbols(
            &doc_state.report,
        ))))
    }
}

/// Convert a statement diagnostic into an LSP diagnostic on its document line.
/// The range starts at the reported column and runs to the end of the line.
pub fn to_lsp_diagnostic(
    line: &LineReport,
    diagnostic: &StatementDiagnostic,
) -> tower_lsp::lsp_types::Diagnostic {
    let (row, column) = line.document_offset(diagnostic.position());
    let start = utf16_column(line, column);
    let end = utf16_line_end(line).max(start);

    tower_lsp::lsp_types::Diagnostic::new(
        Range::new(
            Position::new(row as u32, start as u32),
            Position::new(row as u32, end as u32),
        ),
        Some(DiagnosticSeverity::ERROR),
        Some(NumberOrString::String(
            diagnostic.kind().as_str().to_string(),
        )),
        Some(DIAGNOSTIC_SOURCE.to_string()),
        diagnostic.message().to_string(),
        None,
        None,
    )
}

/// Markdown shown when hovering an analyzed line
pub fn hover_markdown(line: &LineReport) -> Option<String> {
    match &line.outcome {
        LineOutcome::Comment => None,
        LineOutcome::Statement(Ok(statement)) => {
            let mut text = format!("**{}**\n\n`{}`", statement.description(), statement);
            match statement {
                Statement::Unconditional { label, .. } => {
                    text.push_str(&format!("\n\n**Target:** {}", label));
                }
                Statement::Computed {
                    labels, expression, ..
                } => {
                    text.push_str(&format!(
                        "\n\n**Targets:** {}\n\n**Index expression:** `{}`",
                        labels.join(", "),
                        expression
                    ));
                }
                Statement::Assigned { expression, .. } => {
                    text.push_str(&format!("\n\n**Label variable:** `{}`", expression));
                }
            }
            Some(text)
        }
        LineOutcome::Statement(Err(diagnostic)) => Some(format!(
            "**{} error** at {}\n\n{}",
            diagnostic.kind().as_str(),
            diagnostic.position(),
            diagnostic
        )),
    }
}

/// One symbol per successfully parsed statement
pub fn document_symbols(report: &DocumentReport) -> Vec<DocumentSymbol> {
    report
        .lines
        .iter()
        .filter_map(|line| match &line.outcome {
            LineOutcome::Statement(Ok(statement)) => Some(statement_symbol(line, statement)),
            _ => None,
        })
        .collect()
}

fn statement_symbol(line: &LineReport, statement: &Statement) -> DocumentSymbol {
    let row = (line.line - 1) as u32;
    let start = line.indent as u32;
    let end = utf16_line_end(line) as u32;
    let (_, target) = line.document_offset(statement.position());
    let target = utf16_column(line, target);

    let kind = match statement {
        Statement::Unconditional { .. } => SymbolKind::EVENT,
        Statement::Computed { .. } => SymbolKind::ENUM,
        Statement::Assigned { .. } => SymbolKind::VARIABLE,
    };

    let detail = match statement.target_labels() {
        [] => statement.description().to_string(),
        labels => format!("{} -> {}", statement.description(), labels.join(", ")),
    };

    DocumentSymbol {
        name: statement.to_string(),
        detail: Some(detail),
        kind,
        tags: None,
        #[allow(deprecated)]
        deprecated: Some(false), // Required by tower-lsp 0.20
        range: Range::new(Position::new(row, start), Position::new(row, end)),
        selection_range: Range::new(
            Position::new(row, target as u32),
            Position::new(row, end),
        ),
        children: None,
    }
}

/// Convert a 0-based character column on the raw line to UTF-16 code units,
/// which is how LSP counts columns. Indentation is whitespace and always
/// one unit per character.
fn utf16_column(line: &LineReport, column: usize) -> usize {
    let in_input = column.saturating_sub(line.indent);
    column.min(line.indent)
        + line
            .input
            .chars()
            .take(in_input)
            .map(char::len_utf16)
            .sum::<usize>()
}

fn utf16_line_end(line: &LineReport) -> usize {
    line.indent + line.input.encode_utf16().count()
}

/// The part of `line` before an LSP (UTF-16) column
fn utf16_prefix(line: &str, units: usize) -> &str {
    let mut count = 0;
    for (idx, ch) in line.char_indices() {
        if count >= units {
            return &line[..idx];
        }
        count += ch.len_utf16();
    }
    line
}

/// Statement templates offered while the line is still empty or a prefix of `GO TO`
pub fn statement_completions(prefix: &str) -> Vec<CompletionItem> {
    let typed = prefix.trim_start().to_ascii_uppercase();
    if !"GO TO".starts_with(typed.as_str()) {
        return Vec::new();
    }

    let templates = [
        ("GO TO label", "Unconditional GO TO", "GO TO ${1:100}"),
        (
            "GO TO (labels), expr",
            "Computed GO TO",
            "GO TO (${1:10}, ${2:20}), ${3:I}",
        ),
        ("GO TO variable", "Assigned GO TO", "GO TO ${1:VAR}"),
    ];

    templates
        .iter()
        .enumerate()
        .map(|(idx, (label, detail, snippet))| CompletionItem {
            label: label.to_string(),
            kind: Some(CompletionItemKind::SNIPPET),
            detail: Some(detail.to_string()),
            insert_text: Some(snippet.to_string()),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            sort_text: Some(idx.to_string()),
            filter_text: Some("GO TO".to_string()),
            ..Default::default()
        })
        .collect()
}
