//! Per-buffer diagnostic line index.
//!
//! Maps buffer lines to the set of diagnostics overlapping them, with incremental
//! update, multi-line span cascading, and counted removal. A diagnostic with span
//! `[a, b]` is registered at `a` (its canonical registration line) and inserted
//! into the entry of every line in `[a, b]`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticHandle, DiagnosticId, DiagnosticRecord};

/// Diagnostics overlapping one buffer line.
///
/// An ordered set, unique by id, insertion order preserved. `count` is kept
/// explicitly and always equals `diagnostics.len()`.
#[derive(Debug, Default, Clone)]
pub struct LineEntry {
    count: usize,
    diagnostics: Vec<DiagnosticHandle>,
}

impl LineEntry {
    /// Number of diagnostics overlapping this line.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the entry holds no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate the diagnostics in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticHandle> {
        self.diagnostics.iter()
    }

    /// Whether a diagnostic with the given id overlaps this line.
    pub fn contains(&self, id: DiagnosticId) -> bool {
        self.diagnostics.iter().any(|d| d.id == id)
    }

    fn insert(&mut self, diagnostic: DiagnosticHandle) {
        if self.contains(diagnostic.id) {
            return;
        }
        self.diagnostics.push(diagnostic);
        self.count += 1;
    }

    fn remove(&mut self, id: DiagnosticId) -> bool {
        let before = self.diagnostics.len();
        self.diagnostics.retain(|d| d.id != id);
        let removed = self.diagnostics.len() != before;
        if removed {
            self.count -= 1;
        }
        removed
    }
}

/// One incremental update to a single line's registration.
#[derive(Debug, Clone)]
pub enum LineUpdate {
    /// Untrack every diagnostic registered at the line.
    Clear,
    /// Clear the registration at the line, then insert each record at its own
    /// span start.
    Replace(Vec<DiagnosticRecord>),
    /// Cascade-insert a single record.
    Insert(DiagnosticRecord),
}

/// Line-range diagnostic index for one buffer.
#[derive(Debug, Default)]
pub struct DiagnosticLineIndex {
    entries: HashMap<u32, LineEntry>,
    next_id: u64,
}

impl DiagnosticLineIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire index with a fresh diagnostic list.
    ///
    /// Returns the tracked handles in intake order.
    pub fn update(&mut self, records: Vec<DiagnosticRecord>) -> Vec<DiagnosticHandle> {
        self.entries.clear();
        log::debug!("rebuilding diagnostic index: {} records", records.len());
        records
            .into_iter()
            .map(|record| self.track(record))
            .collect()
    }

    /// Apply an incremental update to one line's registration.
    ///
    /// Returns the handles tracked by this call (empty for [`LineUpdate::Clear`]).
    pub fn update_line(&mut self, line: u32, update: LineUpdate) -> Vec<DiagnosticHandle> {
        match update {
            LineUpdate::Clear => {
                self.untrack_registered_at(line);
                Vec::new()
            }
            LineUpdate::Replace(records) => {
                self.untrack_registered_at(line);
                records
                    .into_iter()
                    .map(|record| self.track(record))
                    .collect()
            }
            LineUpdate::Insert(record) => vec![self.track(record)],
        }
    }

    /// The entry for a line, if any diagnostic overlaps it.
    pub fn entry(&self, line: u32) -> Option<&LineEntry> {
        self.entries.get(&line)
    }

    /// Whether any diagnostic overlaps the line.
    pub fn exists_at(&self, line: u32) -> bool {
        self.entries.contains_key(&line)
    }

    /// Number of tracked registrations (distinct diagnostics).
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|(line, entry)| {
                entry
                    .iter()
                    .filter(|d| d.span().start_line() == *line)
                    .count()
            })
            .sum()
    }

    /// Whether no diagnostics are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics registered (not merely overlapping) at a line.
    pub fn tracked_at(&self, line: u32) -> Vec<DiagnosticHandle> {
        match self.entries.get(&line) {
            Some(entry) => entry
                .iter()
                .filter(|d| d.span().start_line() == line)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Lines that currently have an entry (test/debug aid; arbitrary order).
    pub fn occupied_lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Wrap a record with a fresh identity and cascade it into every line of
    /// its span.
    fn track(&mut self, record: DiagnosticRecord) -> DiagnosticHandle {
        let id = DiagnosticId(self.next_id);
        self.next_id += 1;
        let handle = Arc::new(Diagnostic { id, record });
        for line in handle.span().lines() {
            self.entries.entry(line).or_default().insert(handle.clone());
        }
        handle
    }

    /// Remove every diagnostic whose span starts at `line` from all lines of
    /// its span, deleting entries that become empty.
    fn untrack_registered_at(&mut self, line: u32) {
        let registered: Vec<DiagnosticHandle> = self.tracked_at(line);
        for diagnostic in registered {
            log::trace!(
                "untracking diagnostic {:?} spanning {}..={}",
                diagnostic.id,
                diagnostic.span().start_line(),
                diagnostic.span().end_line()
            );
            for span_line in diagnostic.span().lines() {
                if let Some(entry) = self.entries.get_mut(&span_line) {
                    entry.remove(diagnostic.id);
                    if entry.is_empty() {
                        self.entries.remove(&span_line);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Severity, Span};

    fn record(severity: Severity, start_line: u32, end_line: u32) -> DiagnosticRecord {
        DiagnosticRecord::new(
            severity,
            Span::new(start_line, 0, end_line, 5),
            format!("diag {start_line}..{end_line}"),
        )
    }

    fn assert_count_invariant(index: &DiagnosticLineIndex) {
        for line in index.occupied_lines().collect::<Vec<_>>() {
            let entry = index.entry(line).unwrap();
            assert_eq!(entry.count(), entry.iter().count());
        }
    }

    #[test]
    fn test_update_cascades_multiline_span() {
        let mut index = DiagnosticLineIndex::new();
        let handles = index.update(vec![record(Severity::Error, 9, 11)]);
        let id = handles[0].id;

        // 0-based input lines 9..=11 land on 1-based lines 10..=12.
        for line in 10..=12 {
            assert!(index.entry(line).unwrap().contains(id));
        }
        assert!(!index.exists_at(9));
        assert!(!index.exists_at(13));
        assert_count_invariant(&index);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut index = DiagnosticLineIndex::new();
        index.update(vec![record(Severity::Error, 0, 0)]);
        index.update(vec![record(Severity::Warning, 4, 4)]);

        assert!(!index.exists_at(1));
        assert!(index.exists_at(5));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_update_is_idempotent_in_structure() {
        let records = vec![record(Severity::Error, 0, 2), record(Severity::Hint, 1, 1)];
        let mut once = DiagnosticLineIndex::new();
        once.update(records.clone());
        let mut twice = DiagnosticLineIndex::new();
        twice.update(records.clone());
        twice.update(records);

        let mut once_lines: Vec<u32> = once.occupied_lines().collect();
        let mut twice_lines: Vec<u32> = twice.occupied_lines().collect();
        once_lines.sort_unstable();
        twice_lines.sort_unstable();
        assert_eq!(once_lines, twice_lines);
        for line in once_lines {
            let a = once.entry(line).unwrap();
            let b = twice.entry(line).unwrap();
            assert_eq!(a.count(), b.count());
            let a_msgs: Vec<&str> = a.iter().map(|d| d.message()).collect();
            let b_msgs: Vec<&str> = b.iter().map(|d| d.message()).collect();
            assert_eq!(a_msgs, b_msgs);
        }
    }

    #[test]
    fn test_identical_records_are_distinct() {
        let mut index = DiagnosticLineIndex::new();
        let handles = index.update(vec![
            record(Severity::Error, 0, 0),
            record(Severity::Error, 0, 0),
        ]);
        assert_ne!(handles[0].id, handles[1].id);
        assert_eq!(index.entry(1).unwrap().count(), 2);
    }

    #[test]
    fn test_clear_untracks_whole_span() {
        let mut index = DiagnosticLineIndex::new();
        index.update(vec![record(Severity::Error, 2, 5), record(Severity::Warning, 4, 4)]);

        // Clear the registration at 1-based line 3 (the [3..=6] span).
        index.update_line(3, LineUpdate::Clear);

        for line in [3, 4, 6] {
            assert!(
                index.entry(line).is_none() || index.entry(line).unwrap().iter().all(|d| d
                    .span()
                    .start_line()
                    != 3)
            );
        }
        // The single-line warning on 1-based line 5 survives.
        assert!(index.exists_at(5));
        assert_eq!(index.entry(5).unwrap().count(), 1);
        // Lines emptied by the removal are deleted entirely.
        assert!(!index.exists_at(3));
        assert!(!index.exists_at(4));
        assert!(!index.exists_at(6));
        assert_count_invariant(&index);
    }

    #[test]
    fn test_replace_refreshes_one_line() {
        let mut index = DiagnosticLineIndex::new();
        index.update(vec![record(Severity::Error, 0, 0), record(Severity::Hint, 3, 3)]);

        index.update_line(
            1,
            LineUpdate::Replace(vec![record(Severity::Warning, 0, 1)]),
        );

        let entry = index.entry(1).unwrap();
        assert_eq!(entry.count(), 1);
        assert_eq!(entry.iter().next().unwrap().severity(), Severity::Warning);
        assert!(index.exists_at(2));
        assert!(index.exists_at(4));
        assert_count_invariant(&index);
    }

    #[test]
    fn test_insert_cascades() {
        let mut index = DiagnosticLineIndex::new();
        index.update_line(7, LineUpdate::Insert(record(Severity::Error, 6, 8)));
        for line in 7..=9 {
            assert!(index.exists_at(line));
        }
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_tracked_at_excludes_overlapping_continuations() {
        let mut index = DiagnosticLineIndex::new();
        index.update(vec![record(Severity::Error, 0, 3)]);
        assert_eq!(index.tracked_at(1).len(), 1);
        assert_eq!(index.tracked_at(2).len(), 0);
        assert_eq!(index.entry(2).unwrap().count(), 1);
    }
}
