//! Greedy word wrapping for diagnostic messages.
//!
//! Operates on characters: repeatedly take up to `max_width` chars; break at a
//! space when one is available, otherwise hard-break with a continuation
//! marker. Lossless modulo the spaces collapsed at break points and the
//! inserted markers.

/// Marker appended to a hard-broken line.
pub const CONTINUATION_MARKER: char = '-';

/// Hard floor below which wrapping cannot terminate; widths are clamped to it.
const MIN_TERMINATING_WIDTH: usize = 2;

/// A wrapped message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    /// The wrapped lines, in message order.
    pub lines: Vec<String>,
    /// `lines.len()`, kept alongside for cached layouts.
    pub line_count: usize,
}

/// Wrap `text` into lines of at most `max_width` characters.
///
/// Break policy, per window of `max_width` chars:
/// - the char just past the window is a space: break exactly at the window;
/// - otherwise break at the last space inside the window (space dropped);
/// - otherwise hard-break keeping `max_width - 1` chars plus a
///   [`CONTINUATION_MARKER`].
///
/// `max_width` below 2 is clamped (a window of 1 cannot make progress past the
/// marker). Empty text yields zero lines.
pub fn wrap(text: &str, max_width: usize) -> WrappedText {
    let max_width = max_width.max(MIN_TERMINATING_WIDTH);
    let chars: Vec<char> = text.chars().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut start = 0usize;

    while chars.len() - start > max_width {
        let window_end = start + max_width;
        if chars[window_end] == ' ' {
            lines.push(chars[start..window_end].iter().collect());
            start = window_end + 1;
        } else if let Some(rel) = chars[start..window_end].iter().rposition(|c| *c == ' ') {
            lines.push(chars[start..start + rel].iter().collect());
            start += rel + 1;
        } else {
            let keep = max_width - 1;
            let mut line: String = chars[start..start + keep].iter().collect();
            line.push(CONTINUATION_MARKER);
            lines.push(line);
            start += keep;
        }
    }

    if start < chars.len() {
        lines.push(chars[start..].iter().collect());
    }

    let line_count = lines.len();
    WrappedText { lines, line_count }
}

/// Produce a run of `n` blank characters.
pub fn fill(n: usize) -> String {
    " ".repeat(n)
}
