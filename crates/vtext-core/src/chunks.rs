//! Per-line display chunk composition.
//!
//! For each wrapped message line the formatter produces an ordered chunk list:
//! arrow column, tree column, message text, right padding. Decoration chunks
//! are skipped when the layout plan degraded them away. Every chunk carries a
//! generic part class plus the diagnostic severity so a renderer can layer a
//! severity-specific highlight over a generic one.

use crate::config::UiConfig;
use crate::diagnostics::Severity;
use crate::layout::{str_width, LayoutPlan};
use crate::wrap::fill;

/// Tree-column glyphs. Open/close are mirrored for above placement.
const TREE_OPEN: char = '┌';
const TREE_MID: char = '├';
const TREE_CLOSE: char = '└';
const TREE_SINGLE: char = '─';

/// Generic style class of a chunk; the first layer of its style pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkPart {
    /// The arrow column (glyph on the first line, alignment spaces after).
    Arrow,
    /// The tree column connecting wrapped lines.
    Tree,
    /// The message text itself.
    Message,
    /// Right padding used to align continuation rows.
    Padding,
}

/// Style of one chunk: generic part class first, severity refinement second.
///
/// A renderer resolves this to a highlight by layering the severity-specific
/// group for `(part, severity)` over the generic group for `part`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkStyle {
    /// Generic class.
    pub part: ChunkPart,
    /// Severity-specific refinement.
    pub severity: Severity,
}

/// One (text, style) cell run handed to the host decoration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Text content of the run.
    pub text: String,
    /// Layered style.
    pub style: ChunkStyle,
}

impl Chunk {
    fn new(text: String, part: ChunkPart, severity: Severity) -> Self {
        Self {
            text,
            style: ChunkStyle { part, severity },
        }
    }
}

fn tree_glyph(line_index: usize, is_last: bool, above: bool) -> char {
    let is_first = line_index == 0;
    match (is_first, is_last) {
        (true, true) => TREE_SINGLE,
        // Above placement stacks continuations upward, so the branch corners
        // mirror vertically: the origin-adjacent line closes the column.
        (true, false) => {
            if above {
                TREE_CLOSE
            } else {
                TREE_OPEN
            }
        }
        (false, true) => {
            if above {
                TREE_OPEN
            } else {
                TREE_CLOSE
            }
        }
        (false, false) => TREE_MID,
    }
}

/// Compose the ordered chunk list for one wrapped message line.
///
/// `line_index` is the position in message order, `is_last` marks the final
/// wrapped line, and `wrap_width` is the planner's message column budget used
/// to size the right padding.
pub fn format_line(
    config: &UiConfig,
    line_index: usize,
    line_text: &str,
    severity: Severity,
    wrap_width: usize,
    is_last: bool,
    plan: &LayoutPlan,
) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(4);

    if !plan.degraded.arrow {
        let glyph = if plan.stacked {
            config.stacked_arrow()
        } else {
            config.arrow.as_str()
        };
        let text = if line_index == 0 {
            glyph.to_string()
        } else {
            // Continuation rows keep the column width for alignment.
            fill(str_width(glyph))
        };
        chunks.push(Chunk::new(text, ChunkPart::Arrow, severity));
    }

    // A zero-width left column cannot hold a glyph; treat it as absent.
    if !plan.degraded.left_tree && config.left_kept_space > 0 {
        let glyph = tree_glyph(line_index, is_last, config.above);
        let mut text = String::from(glyph);
        text.push_str(&fill(config.left_kept_space.saturating_sub(1)));
        chunks.push(Chunk::new(text, ChunkPart::Tree, severity));
    }

    chunks.push(Chunk::new(
        line_text.to_string(),
        ChunkPart::Message,
        severity,
    ));

    if !plan.degraded.right_padding {
        let pad = wrap_width.saturating_sub(str_width(line_text)) + config.right_kept_space;
        chunks.push(Chunk::new(fill(pad), ChunkPart::Padding, severity));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Degradation;

    fn plan_with(stacked: bool, degraded: Degradation) -> LayoutPlan {
        LayoutPlan {
            stacked,
            offset: 0,
            wrap_width: 20,
            degraded,
        }
    }

    fn parts(chunks: &[Chunk]) -> Vec<ChunkPart> {
        chunks.iter().map(|c| c.style.part).collect()
    }

    #[test]
    fn test_full_chunk_order_on_first_line() {
        let config = UiConfig::default();
        let plan = plan_with(false, Degradation::default());
        let chunks = format_line(&config, 0, "message", Severity::Error, 20, false, &plan);
        assert_eq!(
            parts(&chunks),
            vec![
                ChunkPart::Arrow,
                ChunkPart::Tree,
                ChunkPart::Message,
                ChunkPart::Padding
            ]
        );
        assert_eq!(chunks[0].text, " ← ");
        assert_eq!(chunks[1].text, "┌  ");
        assert_eq!(chunks[2].text, "message");
        // 20 - 7 message cells + 3 kept cells.
        assert_eq!(chunks[3].text.len(), 16);
    }

    #[test]
    fn test_continuation_line_pads_arrow_column() {
        let config = UiConfig::default();
        let plan = plan_with(false, Degradation::default());
        let chunks = format_line(&config, 1, "tail", Severity::Warning, 20, true, &plan);
        assert_eq!(chunks[0].text, "   ");
        assert_eq!(chunks[0].style.part, ChunkPart::Arrow);
        assert_eq!(chunks[1].text, "└  ");
    }

    #[test]
    fn test_stacked_uses_up_arrow_below() {
        let config = UiConfig::default();
        let plan = plan_with(true, Degradation::default());
        let chunks = format_line(&config, 0, "m", Severity::Error, 20, true, &plan);
        assert_eq!(chunks[0].text, " ↑ ");
    }

    #[test]
    fn test_stacked_uses_down_arrow_above() {
        let mut config = UiConfig::default();
        config.above = true;
        let plan = plan_with(true, Degradation::default());
        let chunks = format_line(&config, 0, "m", Severity::Error, 20, true, &plan);
        assert_eq!(chunks[0].text, " ↓ ");
    }

    #[test]
    fn test_tree_glyph_positions_below() {
        assert_eq!(tree_glyph(0, true, false), '─');
        assert_eq!(tree_glyph(0, false, false), '┌');
        assert_eq!(tree_glyph(1, false, false), '├');
        assert_eq!(tree_glyph(2, true, false), '└');
    }

    #[test]
    fn test_tree_glyph_positions_mirrored_above() {
        assert_eq!(tree_glyph(0, true, true), '─');
        assert_eq!(tree_glyph(0, false, true), '└');
        assert_eq!(tree_glyph(1, false, true), '├');
        assert_eq!(tree_glyph(2, true, true), '┌');
    }

    #[test]
    fn test_degraded_parts_are_absent() {
        let config = UiConfig::default();
        let plan = plan_with(
            true,
            Degradation {
                right_padding: true,
                left_tree: true,
                arrow: true,
            },
        );
        let chunks = format_line(&config, 0, "bare", Severity::Hint, 20, true, &plan);
        assert_eq!(parts(&chunks), vec![ChunkPart::Message]);
    }

    #[test]
    fn test_severity_rides_on_every_chunk() {
        let config = UiConfig::default();
        let plan = plan_with(false, Degradation::default());
        let chunks = format_line(&config, 0, "x", Severity::Information, 20, true, &plan);
        assert!(chunks
            .iter()
            .all(|c| c.style.severity == Severity::Information));
    }
}
