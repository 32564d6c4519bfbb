#![forbid(unsafe_code)]

//! Widgets for StateView.
//!
//! The centre of this crate is [`StateView`]: a binding between a toggle the
//! user can freely flip and an authoritative boolean that only changes after
//! an explicit confirmation. The remaining modules are the thin presentation
//! layer around it.

pub mod buffer;
pub mod confirm;
pub mod event;
pub mod paragraph;
pub mod setting_row;
pub mod state_view;
pub mod toggle;

pub use buffer::{Buffer, Cell, Rect};
pub use confirm::{
    ConfirmSheet, ConfirmationSurface, SheetButton, SheetCopy, SheetResult, SheetState,
};
pub use event::{Key, ParseKeyError};
pub use paragraph::Paragraph;
pub use setting_row::SettingRow;
pub use state_view::{
    Commit, CommitOutcome, Phase, Request, RequestId, StateView, StateViewContext,
};
pub use toggle::Toggle;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn grapheme.
/// Stops at `max_x` (exclusive); a wide grapheme that would straddle
/// `max_x` is not drawn.
pub(crate) fn draw_text_span(buf: &mut Buffer, mut x: u16, y: u16, content: &str, max_x: u16) -> u16 {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        let w = u16::try_from(w).unwrap_or(u16::MAX);
        if x.saturating_add(w) > max_x {
            break;
        }
        buf.set(x, y, Cell::Symbol(grapheme.to_owned()));
        for offset in 1..w {
            buf.set(x + offset, y, Cell::Continuation);
        }
        x = x.saturating_add(w);
    }
    x
}

/// Display width of `text` in cells.
pub(crate) fn text_width(text: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Greedy word wrap to `width` cells. Explicit newlines are kept, so
/// `"a\n\nb"` yields a blank line between the paragraphs.
pub(crate) fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };
            if text_width(&candidate) <= width || line.is_empty() {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_owned();
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_text_span_basic() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABC", 10);
        assert_eq!(end_x, 3);
        assert_eq!(buf.row_text(0), "ABC");
    }

    #[test]
    fn draw_text_span_clipped_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABCDEF", 3);
        assert_eq!(end_x, 3);
        assert_eq!(buf.row_text(0), "ABC");
    }

    #[test]
    fn draw_text_span_starts_at_offset() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 5, 0, "XY", 10);
        assert_eq!(end_x, 7);
        assert_eq!(buf.row_text(0), "     XY");
    }

    #[test]
    fn draw_text_span_wide_grapheme() {
        let mut buf = Buffer::new(4, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "设置", 3);
        assert_eq!(end_x, 2, "second wide char does not fit before max_x");
        assert_eq!(buf.get(1, 0), Some(&Cell::Continuation));
        assert_eq!(buf.row_text(0), "设");
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        let lines = wrap_text("one two three\n\nfour", 7);
        assert_eq!(lines, vec!["one two", "three", "", "four"]);
    }

    #[test]
    fn wrap_overlong_word_stays_whole() {
        let lines = wrap_text("supercalifragilistic", 5);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }
}
