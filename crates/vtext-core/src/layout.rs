//! Width-aware layout planning for a single diagnostic.
//!
//! Given the UI configuration, the viewport text width, and the geometry of the
//! source line, the planner decides orientation (inline after the content, or
//! stacked above/below), the horizontal offset, the message wrap width, and a
//! degradation plan that sacrifices decoration before content when space runs
//! out.
//!
//! All widths are display cells per UAX #11 (CJK-aware), never bytes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::UiConfig;

/// Usability floor cap: layouts never target a message column narrower than
/// this unless the viewport itself is narrower.
pub const MIN_WRAP_LENGTH: usize = 14;

/// Visual width of a character in display cells (UAX #11).
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Visual width of a string in display cells.
pub fn str_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display geometry of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineGeometry {
    /// Width of the line content in cells.
    pub content_width: usize,
    /// Width of the leading whitespace prefix in cells.
    pub leading_indent: usize,
    /// Whether the line is blank (empty or whitespace only).
    pub blank: bool,
}

impl LineGeometry {
    /// Measure a source line.
    pub fn of(line_text: &str) -> Self {
        let content_width = str_width(line_text);
        let leading_indent = str_width(leading_whitespace(line_text));
        Self {
            content_width,
            leading_indent,
            blank: line_text.trim().is_empty(),
        }
    }

    /// Geometry of an empty line.
    pub fn empty() -> Self {
        Self {
            content_width: 0,
            leading_indent: 0,
            blank: true,
        }
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}

/// Decorative parts dropped under space pressure, in ladder order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degradation {
    /// Right padding dropped (first rung).
    pub right_padding: bool,
    /// Left tree column dropped (second rung).
    pub left_tree: bool,
    /// Arrow dropped (third rung).
    pub arrow: bool,
}

impl Degradation {
    /// Whether no part has been dropped.
    pub fn is_none(&self) -> bool {
        !self.right_padding && !self.left_tree && !self.arrow
    }

    /// Number of dropped parts.
    pub fn dropped(&self) -> usize {
        usize::from(self.right_padding) + usize::from(self.left_tree) + usize::from(self.arrow)
    }

    /// Whether every part `other` dropped is also dropped here.
    pub fn includes(&self, other: &Degradation) -> bool {
        (self.right_padding || !other.right_padding)
            && (self.left_tree || !other.left_tree)
            && (self.arrow || !other.arrow)
    }
}

/// The planner's decision for one diagnostic at one width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Render stacked above/below the line instead of inline after it.
    pub stacked: bool,
    /// Horizontal cell offset the host applies to every row.
    pub offset: usize,
    /// Width budget for the wrapped message column.
    pub wrap_width: usize,
    /// Decorative parts dropped to reach (or approach) the wrap floor.
    pub degraded: Degradation,
}

/// Compute orientation, offset, wrap width and degradation plan.
///
/// The returned `wrap_width` is best-effort: when the viewport is too narrow
/// even after full degradation it may sit below the floor, and callers render
/// it as-is rather than failing.
pub fn plan(config: &UiConfig, available_width: usize, geometry: LineGeometry) -> LayoutPlan {
    let min_wrap = MIN_WRAP_LENGTH.min(available_width);
    let inline_arrow = str_width(&config.arrow);
    let stacked_arrow = str_width(config.stacked_arrow());

    let trailing = available_width.saturating_sub(geometry.content_width);
    let needed_inline = min_wrap
        + config.left_kept_space
        + config.right_kept_space
        + inline_arrow.max(stacked_arrow);
    let stacked = trailing < needed_inline;

    let (offset, free_space, arrow_width) = if stacked {
        let offset = if geometry.blank { 0 } else { geometry.leading_indent };
        (offset, available_width, stacked_arrow)
    } else {
        // +1 cell for the line terminator between content and decoration.
        let offset = geometry.content_width + 1;
        (offset, available_width.saturating_sub(offset), inline_arrow)
    };

    let mut wrap_width = free_space
        .saturating_sub(config.left_kept_space)
        .saturating_sub(config.right_kept_space)
        .saturating_sub(arrow_width);

    if let Some(cap) = config.wrap_line_after {
        if cap >= min_wrap {
            wrap_width = wrap_width.min(cap);
        }
    }

    // Degradation ladder: reclaim decoration width until the floor is met or
    // nothing is left to drop.
    let mut degraded = Degradation::default();
    if wrap_width < min_wrap {
        degraded.right_padding = true;
        wrap_width += config.right_kept_space;
    }
    if wrap_width < min_wrap {
        degraded.left_tree = true;
        wrap_width += config.left_kept_space;
    }
    if wrap_width < min_wrap {
        degraded.arrow = true;
        wrap_width += arrow_width;
    }

    LayoutPlan {
        stacked,
        offset,
        wrap_width,
        degraded,
    }
}
