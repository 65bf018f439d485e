//! Per-buffer session: owns the index, the layout cache, and the debouncer.
//!
//! One session per attached buffer; dropping it is the teardown. Everything is
//! synchronous and single-context (the host's event loop is the only caller),
//! so there is no locking, only the replace-don't-mutate discipline on updates.

use std::time::{Duration, Instant};

use crate::cache::LayoutCache;
use crate::config::UiConfig;
use crate::diagnostics::{DiagnosticHandle, DiagnosticRecord};
use crate::fetch::{self, CursorFetch, SeverityOrder};
use crate::layout::LineGeometry;
use crate::line_index::{DiagnosticLineIndex, LineUpdate};
use crate::{assemble, assemble::RenderedDiagnostic};

/// Default quiet interval before a queued diagnostic batch is applied.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Coalesces bursts of update notifications into one rebuild.
///
/// Host-driven and synchronous: `notify` arms (or re-arms) the timer, `ready`
/// fires at most once per armed deadline. A newer notification supersedes a
/// pending one.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet interval.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer at `now + quiet`.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether a deadline is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_INTERVAL)
    }
}

/// Per-buffer diagnostic virtual-text session.
#[derive(Debug)]
pub struct BufferSession {
    config: UiConfig,
    index: DiagnosticLineIndex,
    cache: LayoutCache,
    debounce: Debouncer,
    pending: Option<Vec<DiagnosticRecord>>,
    viewport_width: usize,
}

impl BufferSession {
    /// Create a session for one buffer.
    pub fn new(config: UiConfig, viewport_width: usize) -> Self {
        Self {
            config,
            index: DiagnosticLineIndex::new(),
            cache: LayoutCache::new(),
            debounce: Debouncer::default(),
            pending: None,
            viewport_width,
        }
    }

    /// The session's UI configuration.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The underlying line index (read-only).
    pub fn index(&self) -> &DiagnosticLineIndex {
        &self.index
    }

    /// Current viewport text width in cells.
    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// Update the viewport text width, invalidating cached layouts when the
    /// width actually changes.
    pub fn set_viewport_width(&mut self, width: usize) {
        if self.viewport_width != width {
            self.viewport_width = width;
            self.cache.clear();
        }
    }

    /// Replace the buffer's diagnostics wholesale, immediately.
    ///
    /// Clears the layout cache: a replaced set invalidates every identity.
    pub fn update_index(&mut self, records: Vec<DiagnosticRecord>) -> Vec<DiagnosticHandle> {
        self.cache.clear();
        self.index.update(records)
    }

    /// Apply an incremental update to one line (1-based).
    ///
    /// Evicts the cache entries of diagnostics untracked by the update.
    pub fn update_line(&mut self, line: u32, update: LineUpdate) -> Vec<DiagnosticHandle> {
        for stale in self.index.tracked_at(line) {
            self.cache.remove(stale.id);
        }
        self.index.update_line(line, update)
    }

    /// Queue a debounced wholesale update; a newer batch supersedes a pending
    /// one.
    pub fn queue_update(&mut self, records: Vec<DiagnosticRecord>, now: Instant) {
        if self.pending.is_some() {
            log::trace!("superseding pending diagnostic batch");
        }
        self.pending = Some(records);
        self.debounce.notify(now);
    }

    /// Apply the pending batch if its quiet interval has elapsed.
    ///
    /// Returns `true` when a rebuild happened.
    pub fn flush_pending(&mut self, now: Instant) -> bool {
        if self.pending.is_some() && self.debounce.ready(now) {
            if let Some(records) = self.pending.take() {
                self.update_index(records);
            }
            true
        } else {
            false
        }
    }

    /// Whether a queued batch is awaiting its quiet interval.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fetch diagnostics overlapping a line (1-based), severity-sorted.
    pub fn fetch(&self, line: u32, order: SeverityOrder, early_stop: bool) -> Vec<DiagnosticHandle> {
        if early_stop {
            fetch::fetch_early(&self.index, line, order)
        } else {
            fetch::fetch(&self.index, line, order)
        }
    }

    /// Fetch diagnostics under a cursor position.
    pub fn fetch_at_cursor(&self, line: u32, col: u32, early_stop: bool) -> CursorFetch {
        fetch::fetch_at_cursor(
            &self.index,
            line,
            col,
            SeverityOrder::MostSevereFirst,
            early_stop,
        )
    }

    /// Whether any diagnostic overlaps the line.
    pub fn exists_at(&self, line: u32) -> bool {
        self.index.exists_at(line)
    }

    /// Assemble virtual text for a diagnostic against the given source-line
    /// geometry, reusing the cached layout when present.
    pub fn render(
        &mut self,
        diagnostic: &DiagnosticHandle,
        geometry: LineGeometry,
    ) -> RenderedDiagnostic {
        assemble::render(
            diagnostic,
            &self.config,
            &mut self.cache,
            self.viewport_width,
            geometry,
        )
    }

    /// Drop every cached layout. For geometry-shifting edits the host cannot
    /// attribute to a single line.
    pub fn invalidate_layout_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of cached layouts (test/debug aid).
    pub fn cached_layouts(&self) -> usize {
        self.cache.len()
    }
}
