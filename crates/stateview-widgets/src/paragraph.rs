#![forbid(unsafe_code)]

//! Word-wrapped, left-aligned text.

use crate::buffer::{Buffer, Rect};
use crate::{Widget, draw_text_span, wrap_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Rows the text occupies when wrapped to `width`.
    #[must_use]
    pub fn line_count(&self, width: u16) -> u16 {
        u16::try_from(wrap_text(&self.text, width).len()).unwrap_or(u16::MAX)
    }
}

impl Widget for Paragraph {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (line, y) in wrap_text(&self.text, area.width)
            .iter()
            .zip(area.y..area.bottom())
        {
            draw_text_span(buf, area.x, y, line, area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_into_area() {
        let p = Paragraph::new("Don't enable this unless you are sure.");
        assert_eq!(p.line_count(16), 3);

        let mut buf = Buffer::new(16, 3);
        p.render(buf.area(), &mut buf);
        assert_eq!(
            buf.to_lines(),
            vec!["Don't enable", "this unless you", "are sure."]
        );
    }

    #[test]
    fn clipped_to_area_height() {
        let p = Paragraph::new("a\nb\nc");
        let mut buf = Buffer::new(4, 2);
        p.render(buf.area(), &mut buf);
        assert_eq!(buf.to_lines(), vec!["a", "b"]);
    }
}
