//! Structural properties of the diagnostic line index.

use pretty_assertions::assert_eq;
use vtext_core::{
    fetch, DiagnosticLineIndex, DiagnosticRecord, LineUpdate, Severity, SeverityOrder, Span,
};

fn record(severity: Severity, start_line: u32, end_line: u32, message: &str) -> DiagnosticRecord {
    DiagnosticRecord::new(severity, Span::new(start_line, 0, end_line, 8), message)
}

/// Every tracked diagnostic appears on every line of its span and nowhere
/// else, and every entry's count matches its set size.
#[test]
fn span_and_count_invariants_hold_after_update() {
    let mut index = DiagnosticLineIndex::new();
    let handles = index.update(vec![
        record(Severity::Error, 0, 2, "multi"),
        record(Severity::Warning, 1, 1, "single"),
        record(Severity::Hint, 10, 14, "long"),
    ]);

    for handle in &handles {
        for line in 1..=20u32 {
            let present = index
                .entry(line)
                .map(|entry| entry.contains(handle.id))
                .unwrap_or(false);
            assert_eq!(
                present,
                handle.span().contains_line(line),
                "diagnostic {:?} on line {line}",
                handle.id
            );
        }
    }

    for line in index.occupied_lines().collect::<Vec<_>>() {
        let entry = index.entry(line).unwrap();
        assert_eq!(entry.count(), entry.iter().count());
    }
}

/// `update` then `fetch(L)` returns exactly the diagnostics whose span
/// includes L, sorted ascending by severity.
#[test]
fn round_trip_fetch_matches_spans() {
    let mut index = DiagnosticLineIndex::new();
    let handles = index.update(vec![
        record(Severity::Hint, 0, 4, "hint"),
        record(Severity::Error, 2, 2, "error"),
        record(Severity::Warning, 2, 6, "warn"),
    ]);

    for line in 1..=10u32 {
        let fetched = fetch(&index, line, SeverityOrder::MostSevereFirst);
        let expected: Vec<_> = {
            let mut matching: Vec<_> = handles
                .iter()
                .filter(|h| h.span().contains_line(line))
                .cloned()
                .collect();
            matching.sort_by_key(|h| h.severity().ordinal());
            matching.into_iter().map(|h| h.id).collect()
        };
        let got: Vec<_> = fetched.iter().map(|h| h.id).collect();
        assert_eq!(got, expected, "line {line}");
    }
}

/// Untracking a registration removes the diagnostic from its whole span and
/// deletes emptied entries.
#[test]
fn untrack_is_complete_across_the_span() {
    let mut index = DiagnosticLineIndex::new();
    let handles = index.update(vec![
        record(Severity::Error, 3, 7, "wide"),
        record(Severity::Warning, 5, 5, "narrow"),
    ]);
    let wide = handles[0].clone();

    index.update_line(wide.span().start_line(), LineUpdate::Clear);

    for line in wide.span().lines() {
        if let Some(entry) = index.entry(line) {
            assert!(!entry.contains(wide.id), "line {line} still holds the id");
        }
    }
    // Only the narrow warning's line survives.
    let mut occupied: Vec<u32> = index.occupied_lines().collect();
    occupied.sort_unstable();
    assert_eq!(occupied, vec![6]);
}

/// Early stop never returns something less severe than the full fetch would.
#[test]
fn early_stop_is_consistent_with_full_fetch() {
    let mut index = DiagnosticLineIndex::new();
    index.update(vec![
        record(Severity::Warning, 0, 0, "warn"),
        record(Severity::Error, 0, 0, "error"),
        record(Severity::Hint, 0, 0, "hint"),
    ]);

    let full = fetch(&index, 1, SeverityOrder::MostSevereFirst);
    let early = vtext_core::fetch_early(&index, 1, SeverityOrder::MostSevereFirst);
    assert_eq!(early.len(), 1);
    assert!(full.iter().all(|d| early[0].severity() <= d.severity()));
}
