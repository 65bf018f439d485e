//! Diagnostic data model.
//!
//! Providers hand the index plain [`DiagnosticRecord`] values; on intake each record
//! is wrapped as a [`Diagnostic`] carrying a [`DiagnosticId`] allocated by the
//! index. Identity is the id, never field equality: two records with identical
//! fields are tracked (and cached) independently.

use std::sync::Arc;

/// Diagnostic severity, ordered by ordinal rank (lower = more severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Error diagnostics (ordinal 1, most severe).
    Error = 1,
    /// Warning diagnostics (ordinal 2).
    Warning = 2,
    /// Informational diagnostics (ordinal 3).
    Information = 3,
    /// Hint diagnostics (ordinal 4, least severe).
    Hint = 4,
}

impl Severity {
    /// The most severe ordinal in the set.
    pub const MOST_SEVERE: u8 = 1;

    /// Convert a numeric ordinal (1..=4) into a severity.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }

    /// The numeric ordinal of this severity.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Error returned when a numeric severity falls outside the known ordinal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityError(pub u8);

impl std::fmt::Display for SeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown severity ordinal: {}", self.0)
    }
}

impl std::error::Error for SeverityError {}

impl TryFrom<u8> for Severity {
    type Error = SeverityError;

    fn try_from(value: u8) -> Result<Self, SeverityError> {
        Severity::from_ordinal(value).ok_or(SeverityError(value))
    }
}

/// An inclusive line/column span a diagnostic is attached to.
///
/// Lines are 1-based internally. The only constructor normalizes 0-based
/// provider lines and orders the endpoints, so every `Span` value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start_line: u32,
    end_line: u32,
    start_col: u32,
    end_col: u32,
}

impl Span {
    /// Build a span from 0-based provider coordinates.
    ///
    /// Lines are normalized to 1-based; inverted endpoints are swapped.
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        let (sl, sc, el, ec) = if (end_line, end_col) < (start_line, start_col) {
            (end_line, end_col, start_line, start_col)
        } else {
            (start_line, start_col, end_line, end_col)
        };
        Self {
            start_line: sl + 1,
            end_line: el + 1,
            start_col: sc,
            end_col: ec,
        }
    }

    /// Build a single-line span from 0-based provider coordinates.
    pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self::new(line, start_col.min(end_col), line, start_col.max(end_col))
    }

    /// First line of the span (1-based).
    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    /// Last line of the span (1-based, inclusive).
    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    /// Start column (0-based, inclusive).
    pub fn start_col(&self) -> u32 {
        self.start_col
    }

    /// End column (0-based, exclusive).
    pub fn end_col(&self) -> u32 {
        self.end_col
    }

    /// Iterate over every 1-based line the span covers.
    pub fn lines(&self) -> impl Iterator<Item = u32> {
        self.start_line..=self.end_line
    }

    /// Whether the span covers the given 1-based line.
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Whether `[start_col, end_col)` contains the given column.
    pub fn contains_col(&self, col: u32) -> bool {
        self.start_col <= col && col < self.end_col
    }
}

/// A raw diagnostic as supplied by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Severity rank.
    pub severity: Severity,
    /// Line/column span the diagnostic is attached to.
    pub span: Span,
    /// Diagnostic message.
    pub message: String,
    /// Optional diagnostic source (e.g. `"rust-analyzer"`).
    pub source: Option<String>,
    /// Optional diagnostic code (stringified).
    pub code: Option<String>,
}

impl DiagnosticRecord {
    /// Create a record with just the load-bearing fields.
    pub fn new(severity: Severity, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity,
            span,
            message: message.into(),
            source: None,
            code: None,
        }
    }
}

/// Identity of a tracked diagnostic.
///
/// Allocated by the index on intake; distinct even for field-identical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagnosticId(pub(crate) u64);

impl DiagnosticId {
    /// The raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A tracked diagnostic: a provider record plus its index-assigned identity.
#[derive(Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Index-assigned identity; the layout-cache key.
    pub id: DiagnosticId,
    /// The provider-supplied record.
    pub record: DiagnosticRecord,
}

impl Diagnostic {
    /// Severity rank.
    pub fn severity(&self) -> Severity {
        self.record.severity
    }

    /// Line/column span.
    pub fn span(&self) -> Span {
        self.record.span
    }

    /// Diagnostic message text.
    pub fn message(&self) -> &str {
        &self.record.message
    }
}

/// Shared handle to a tracked diagnostic.
pub type DiagnosticHandle = Arc<Diagnostic>;
