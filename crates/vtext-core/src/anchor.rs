//! Host render-anchor interface.
//!
//! The core never draws; it hands the host a [`VirtualTextPlacement`] keyed by
//! a per-line [`AnchorKey`] that stays stable across re-renders of the same
//! source line, so the host can replace a decoration in place.

use crate::assemble::RenderedDiagnostic;
use crate::chunks::Chunk;
use crate::fetch::SeverityOrder;
use crate::layout::LineGeometry;
use crate::session::BufferSession;

/// Stable decoration key: one per source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorKey(pub u32);

/// A buffer-anchored decoration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualTextPlacement {
    /// 1-based source line the decoration is anchored at.
    pub line: u32,
    /// Chunk row rendered at the source position.
    pub primary: Vec<Chunk>,
    /// Rows stacked above or below, in top-to-bottom order.
    pub auxiliary: Vec<Vec<Chunk>>,
    /// Horizontal cell offset for every row.
    pub offset: usize,
    /// Whether auxiliary rows go above the source line.
    pub above: bool,
    /// Render-ordering hint, passed through from the configuration.
    pub priority: u32,
}

/// What the host must provide for decoration placement.
pub trait RenderHost {
    /// Current text of a 1-based source line, or `None` past the end.
    fn line_text(&self, line: u32) -> Option<String>;

    /// Current viewport text width in cells.
    fn text_width(&self) -> usize;

    /// Place (or replace) the decoration for a key.
    fn place(&mut self, key: AnchorKey, placement: VirtualTextPlacement);

    /// Delete the decoration for a key, if present.
    fn remove(&mut self, key: AnchorKey);

    /// Delete every decoration owned by this session.
    fn clear_all(&mut self);
}

/// Render the most severe diagnostic of a line into the host, or remove the
/// line's decoration when the line has none.
///
/// Returns `true` when a decoration was placed.
pub fn render_at(session: &mut BufferSession, host: &mut impl RenderHost, line: u32) -> bool {
    session.set_viewport_width(host.text_width());

    let top = match session
        .fetch(line, SeverityOrder::MostSevereFirst, true)
        .into_iter()
        .next()
    {
        Some(diagnostic) => diagnostic,
        None => {
            host.remove(AnchorKey(line));
            return false;
        }
    };

    let geometry = host
        .line_text(line)
        .map(|text| LineGeometry::of(&text))
        .unwrap_or_else(LineGeometry::empty);
    let RenderedDiagnostic {
        primary,
        auxiliary,
        offset,
        above,
        ..
    } = session.render(&top, geometry);

    host.place(
        AnchorKey(line),
        VirtualTextPlacement {
            line,
            primary,
            auxiliary,
            offset,
            above,
            priority: session.config().priority,
        },
    );
    true
}
