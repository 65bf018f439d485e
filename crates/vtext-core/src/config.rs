//! UI configuration surface.
//!
//! Hosts typically deserialize this from user configuration; all fields have
//! defaults, so a partial table is enough.

use serde::Deserialize;

/// Rendering options recognized by the core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cells kept between the tree column and the message.
    pub left_kept_space: usize,
    /// Cells kept after the message for continuation alignment.
    pub right_kept_space: usize,
    /// Optional hard cap on the message wrap width. Caps below the usability
    /// floor are ignored.
    pub wrap_line_after: Option<usize>,
    /// Arrow glyph for inline orientation, pointing at the line content.
    pub arrow: String,
    /// Arrow glyph for stacked rendering below the line.
    pub up_arrow: String,
    /// Arrow glyph for stacked rendering above the line.
    pub down_arrow: String,
    /// Prefer stacking above the source line instead of below it.
    pub above: bool,
    /// Render-ordering hint passed through to the host, not interpreted here.
    pub priority: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            left_kept_space: 3,
            right_kept_space: 3,
            wrap_line_after: None,
            arrow: " ← ".to_string(),
            up_arrow: " ↑ ".to_string(),
            down_arrow: " ↓ ".to_string(),
            above: false,
            priority: 2048,
        }
    }
}

impl UiConfig {
    /// The arrow glyph used for stacked orientation under the current
    /// placement preference.
    pub fn stacked_arrow(&self) -> &str {
        if self.above {
            &self.down_arrow
        } else {
            &self.up_arrow
        }
    }
}
