//! Per-diagnostic layout memoization.
//!
//! Planning and wrapping are pure in the diagnostic and the width inputs, so
//! their output is cached per diagnostic identity and reused across cursor
//! moves. The cache is cleared wholesale on width-affecting events (viewport
//! resize, diagnostic-set replacement, geometry-shifting edits); staleness is
//! handled by recomputation, never surfaced as an error.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::UiConfig;
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::layout::{plan, LayoutPlan, LineGeometry};
use crate::wrap::wrap;

/// Memoized layout for one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLayout {
    /// Orientation, offset, wrap width, degradation.
    pub plan: LayoutPlan,
    /// Wrapped message lines.
    pub lines: Vec<String>,
    /// `lines.len()`.
    pub line_count: usize,
}

/// Layout memo keyed by diagnostic identity.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<DiagnosticId, Arc<CachedLayout>>,
}

impl LayoutCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the layout for a diagnostic, computing and storing it on miss.
    pub fn get_or_compute(
        &mut self,
        diagnostic: &Diagnostic,
        config: &UiConfig,
        available_width: usize,
        geometry: LineGeometry,
    ) -> Arc<CachedLayout> {
        if let Some(cached) = self.entries.get(&diagnostic.id) {
            return cached.clone();
        }

        let plan = plan(config, available_width, geometry);
        let wrapped = wrap(diagnostic.message(), plan.wrap_width);
        let computed = Arc::new(CachedLayout {
            plan,
            line_count: wrapped.line_count,
            lines: wrapped.lines,
        });
        self.entries.insert(diagnostic.id, computed.clone());
        computed
    }

    /// Cached layout for a diagnostic, if present.
    pub fn get(&self, id: DiagnosticId) -> Option<Arc<CachedLayout>> {
        self.entries.get(&id).cloned()
    }

    /// Drop one entry.
    pub fn remove(&mut self, id: DiagnosticId) {
        self.entries.remove(&id);
    }

    /// Drop every entry. Called on width-affecting events.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("clearing layout cache ({} entries)", self.entries.len());
        }
        self.entries.clear();
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
