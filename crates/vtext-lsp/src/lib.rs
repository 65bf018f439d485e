#![warn(missing_docs)]
//! `vtext-lsp` - LSP diagnostics adapter for `vtext-core`.
//!
//! Decodes `textDocument/publishDiagnostics` notification payloads (plain
//! JSON-RPC params, via `serde_json::Value`) into core [`DiagnosticRecord`]s.
//! Malformed entries are skipped, never fatal: a provider bug must not take
//! the whole batch down.

use serde_json::Value;
use vtext_core::{DiagnosticRecord, Severity, Span};

/// Numeric LSP diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSeverity {
    /// LSP severity 1.
    Error,
    /// LSP severity 2.
    Warning,
    /// LSP severity 3.
    Information,
    /// LSP severity 4.
    Hint,
}

impl ProviderSeverity {
    /// Convert the numeric LSP `DiagnosticSeverity` into an enum.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }

    fn to_core(self) -> Severity {
        match self {
            Self::Error => Severity::Error,
            Self::Warning => Severity::Warning,
            Self::Information => Severity::Information,
            Self::Hint => Severity::Hint,
        }
    }
}

/// A 0-based LSP position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPosition {
    /// 0-based line.
    pub line: u32,
    /// 0-based UTF-16 column.
    pub character: u32,
}

/// An LSP range (`end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderRange {
    /// Range start.
    pub start: ProviderPosition,
    /// Range end (exclusive).
    pub end: ProviderPosition,
}

/// One decoded provider diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDiagnostic {
    /// Diagnostic range.
    pub range: ProviderRange,
    /// Optional severity; absent severities render as errors.
    pub severity: Option<ProviderSeverity>,
    /// Optional diagnostic code (number or string).
    pub code: Option<String>,
    /// Optional source (e.g. `"rust-analyzer"`).
    pub source: Option<String>,
    /// Diagnostic message.
    pub message: String,
}

/// Decoded `textDocument/publishDiagnostics` params.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishDiagnosticsParams {
    /// Document URI.
    pub uri: String,
    /// Diagnostics for the document.
    pub diagnostics: Vec<ProviderDiagnostic>,
    /// Optional document version.
    pub version: Option<i32>,
}

fn position_from_value(value: &Value) -> Option<ProviderPosition> {
    let line = value.get("line")?.as_u64()? as u32;
    let character = value.get("character")?.as_u64()? as u32;
    Some(ProviderPosition { line, character })
}

fn range_from_value(value: &Value) -> Option<ProviderRange> {
    let start = position_from_value(value.get("start")?)?;
    let end = position_from_value(value.get("end")?)?;
    Some(ProviderRange { start, end })
}

fn code_from_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode one diagnostic object; `None` when the load-bearing fields are
/// missing or malformed.
pub fn diagnostic_from_value(value: &Value) -> Option<ProviderDiagnostic> {
    let range = range_from_value(value.get("range")?)?;
    let message = value.get("message")?.as_str()?.to_string();
    let severity = value
        .get("severity")
        .and_then(Value::as_u64)
        .and_then(ProviderSeverity::from_u64);
    Some(ProviderDiagnostic {
        range,
        severity,
        code: code_from_value(value.get("code")),
        source: value
            .get("source")
            .and_then(Value::as_str)
            .map(str::to_string),
        message,
    })
}

/// Decode `publishDiagnostics` params. Malformed diagnostics in the list are
/// skipped.
pub fn publish_diagnostics_from_value(value: &Value) -> Option<PublishDiagnosticsParams> {
    let uri = value.get("uri")?.as_str()?.to_string();
    let diagnostics = value
        .get("diagnostics")?
        .as_array()?
        .iter()
        .filter_map(diagnostic_from_value)
        .collect();
    Some(PublishDiagnosticsParams {
        uri,
        diagnostics,
        version: value
            .get("version")
            .and_then(Value::as_i64)
            .map(|v| v as i32),
    })
}

/// Convert decoded provider diagnostics into core records.
///
/// LSP end positions are exclusive: an end at `character == 0` of a later
/// line pulls the end line back by one and opens the end column (the range
/// covers whole lines up to there).
pub fn to_records(params: &PublishDiagnosticsParams) -> Vec<DiagnosticRecord> {
    params
        .diagnostics
        .iter()
        .map(|diag| {
            let start = diag.range.start;
            let mut end = diag.range.end;
            let mut end_col = end.character;
            if end.line > start.line && end.character == 0 {
                end.line -= 1;
                end_col = u32::MAX;
            }
            let span = Span::new(start.line, start.character, end.line, end_col);
            let severity = diag
                .severity
                .map(ProviderSeverity::to_core)
                .unwrap_or(Severity::Error);
            DiagnosticRecord {
                severity,
                span,
                message: diag.message.clone(),
                source: diag.source.clone(),
                code: diag.code.clone(),
            }
        })
        .collect()
}
