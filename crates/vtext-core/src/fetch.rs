//! Severity-ordered queries over the line index.
//!
//! Early stopping is modeled as a short-circuiting scan over the entry, not a
//! flag threaded through the sort: [`fetch_early`] and [`fetch_until`] return as
//! soon as a qualifying diagnostic is discovered.

use crate::diagnostics::{DiagnosticHandle, Severity};
use crate::line_index::DiagnosticLineIndex;

/// Severity sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityOrder {
    /// Ordinal 1 first (errors before hints).
    #[default]
    MostSevereFirst,
    /// Ordinal 1 last (hints before errors).
    LeastSevereFirst,
}

/// Result of a cursor-scoped fetch.
#[derive(Debug, Default)]
pub struct CursorFetch {
    /// Diagnostics whose column range contains the cursor, severity-sorted.
    pub at_cursor: Vec<DiagnosticHandle>,
    /// Full sorted line list, populated only when `at_cursor` is empty.
    pub line_fallback: Vec<DiagnosticHandle>,
}

fn sort_stable(diagnostics: &mut [DiagnosticHandle], order: SeverityOrder) {
    match order {
        SeverityOrder::MostSevereFirst => {
            diagnostics.sort_by_key(|d| d.severity().ordinal());
        }
        SeverityOrder::LeastSevereFirst => {
            diagnostics.sort_by_key(|d| std::cmp::Reverse(d.severity().ordinal()));
        }
    }
}

/// Fetch all diagnostics overlapping `line`, stably sorted by severity.
///
/// Ties keep discovery order.
pub fn fetch(index: &DiagnosticLineIndex, line: u32, order: SeverityOrder) -> Vec<DiagnosticHandle> {
    let mut diagnostics: Vec<DiagnosticHandle> = match index.entry(line) {
        Some(entry) => entry.iter().cloned().collect(),
        None => return Vec::new(),
    };
    sort_stable(&mut diagnostics, order);
    diagnostics
}

/// Fetch with early stop on the most severe class.
///
/// If a severity-1 diagnostic is found during the scan, it is returned as a
/// singleton without sorting the rest. Weak contract: the first element is the
/// most severe found so far, nothing more.
pub fn fetch_early(
    index: &DiagnosticLineIndex,
    line: u32,
    order: SeverityOrder,
) -> Vec<DiagnosticHandle> {
    fetch_until(index, line, order, |d| {
        d.severity().ordinal() == Severity::MOST_SEVERE
    })
}

/// Fetch with a caller-supplied early-stop predicate.
///
/// The entry is scanned in discovery order; the first diagnostic matching
/// `stop` is returned as a singleton. If none matches, the full sorted list is
/// returned.
pub fn fetch_until(
    index: &DiagnosticLineIndex,
    line: u32,
    order: SeverityOrder,
    mut stop: impl FnMut(&DiagnosticHandle) -> bool,
) -> Vec<DiagnosticHandle> {
    let entry = match index.entry(line) {
        Some(entry) => entry,
        None => return Vec::new(),
    };
    if let Some(found) = entry.iter().find(|d| stop(d)) {
        return vec![found.clone()];
    }
    let mut diagnostics: Vec<DiagnosticHandle> = entry.iter().cloned().collect();
    sort_stable(&mut diagnostics, order);
    diagnostics
}

/// Fetch diagnostics under a cursor position.
///
/// Filters the line's diagnostics to those whose `[start_col, end_col)`
/// contains `col`; when none match, the full sorted line list is handed back
/// as fallback context instead.
pub fn fetch_at_cursor(
    index: &DiagnosticLineIndex,
    line: u32,
    col: u32,
    order: SeverityOrder,
    early: bool,
) -> CursorFetch {
    let entry = match index.entry(line) {
        Some(entry) => entry,
        None => return CursorFetch::default(),
    };

    let mut at_cursor: Vec<DiagnosticHandle> = Vec::new();
    for diagnostic in entry.iter() {
        if diagnostic.span().contains_col(col) {
            if early && diagnostic.severity().ordinal() == Severity::MOST_SEVERE {
                return CursorFetch {
                    at_cursor: vec![diagnostic.clone()],
                    line_fallback: Vec::new(),
                };
            }
            at_cursor.push(diagnostic.clone());
        }
    }

    if at_cursor.is_empty() {
        CursorFetch {
            at_cursor,
            line_fallback: fetch(index, line, order),
        }
    } else {
        sort_stable(&mut at_cursor, order);
        CursorFetch {
            at_cursor,
            line_fallback: Vec::new(),
        }
    }
}
