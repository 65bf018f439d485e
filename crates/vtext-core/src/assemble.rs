//! Row assembly: cached layout + wrapped lines -> display chunk rows.
//!
//! The row for the first wrapped line attaches directly at the source position
//! (the primary row); the remaining rows stack above or below it. Above
//! placement reverses the auxiliary rows so the first wrapped line stays
//! adjacent to the source line.

use crate::cache::LayoutCache;
use crate::chunks::{format_line, Chunk};
use crate::config::UiConfig;
use crate::diagnostics::Diagnostic;
use crate::layout::LineGeometry;

/// The assembled virtual text for one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagnostic {
    /// Chunk row attached at the source position.
    pub primary: Vec<Chunk>,
    /// Remaining rows, ordered for top-to-bottom host rendering.
    pub auxiliary: Vec<Vec<Chunk>>,
    /// Horizontal cell offset for every row.
    pub offset: usize,
    /// Whether rows stack above/below instead of rendering inline.
    pub stacked: bool,
    /// Whether auxiliary rows are placed above the source line.
    pub above: bool,
}

/// Assemble the chunk rows for a diagnostic, reusing the cached layout when
/// one exists.
pub fn render(
    diagnostic: &Diagnostic,
    config: &UiConfig,
    cache: &mut LayoutCache,
    available_width: usize,
    geometry: LineGeometry,
) -> RenderedDiagnostic {
    let layout = cache.get_or_compute(diagnostic, config, available_width, geometry);
    let severity = diagnostic.severity();

    let mut rows: Vec<Vec<Chunk>> = layout
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format_line(
                config,
                i,
                line,
                severity,
                layout.plan.wrap_width,
                i + 1 == layout.line_count,
                &layout.plan,
            )
        })
        .collect();

    let primary = if rows.is_empty() {
        Vec::new()
    } else {
        rows.remove(0)
    };
    if config.above {
        rows.reverse();
    }

    RenderedDiagnostic {
        primary,
        auxiliary: rows,
        offset: layout.plan.offset,
        stacked: layout.plan.stacked,
        above: config.above,
    }
}
