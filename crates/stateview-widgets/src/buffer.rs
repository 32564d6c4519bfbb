#![forbid(unsafe_code)]

//! A minimal grid of text cells.
//!
//! Widgets draw graphemes into a [`Buffer`]; the host turns it back into
//! lines of text with [`Buffer::to_lines`]. A grapheme wider than one cell
//! occupies its first cell and marks the rest as [`Cell::Continuation`].

use std::fmt;

/// A rectangular area of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the right edge.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The single row `offset` rows down, or an empty rect when out of range.
    #[must_use]
    pub const fn row(&self, offset: u16) -> Self {
        if offset >= self.height {
            Self::new(self.x, self.bottom(), self.width, 0)
        } else {
            Self::new(self.x, self.y + offset, self.width, 1)
        }
    }

    /// Shrink by `margin` on every side.
    #[must_use]
    pub const fn inner(&self, margin: u16) -> Self {
        let double = margin.saturating_mul(2);
        Self::new(
            self.x.saturating_add(margin),
            self.y.saturating_add(margin),
            self.width.saturating_sub(double),
            self.height.saturating_sub(double),
        )
    }
}

/// One cell of a [`Buffer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// A grapheme starting in this cell.
    Symbol(String),
    /// Covered by the wide grapheme to its left.
    Continuation,
}

/// Text cell grid widgets render into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; usize::from(width) * usize::from(height)],
        }
    }

    /// The full area of the buffer.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell in `area` to [`Cell::Empty`].
    pub fn clear(&mut self, area: Rect) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, Cell::Empty);
            }
        }
    }

    /// Text of row `y` with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut line = String::new();
        for x in 0..self.width {
            match self.get(x, y) {
                Some(Cell::Symbol(s)) => line.push_str(s),
                Some(Cell::Empty) => line.push(' '),
                Some(Cell::Continuation) | None => {}
            }
        }
        line.truncate(line.trim_end().len());
        line
    }

    /// All rows as text, trailing blank rows removed.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.height).map(|y| self.row_text(y)).collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.to_lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn rect_row_and_inner() {
        let r = Rect::new(0, 0, 10, 4);
        assert_eq!(r.row(2), Rect::new(0, 2, 10, 1));
        assert!(r.row(4).is_empty());
        assert_eq!(r.inner(1), Rect::new(1, 1, 8, 2));
        assert!(Rect::new(0, 0, 1, 1).inner(1).is_empty());
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::Symbol("x".into()));
        assert_eq!(buf.get(5, 5), None);
        assert_eq!(buf.to_lines(), Vec::<String>::new());
    }

    #[test]
    fn lines_trim_trailing_blanks() {
        let mut buf = Buffer::new(4, 3);
        buf.set(1, 0, Cell::Symbol("a".into()));
        assert_eq!(buf.to_lines(), vec![" a".to_owned()]);
        assert_eq!(buf.to_string(), " a");
    }

    #[test]
    fn clear_resets_area() {
        let mut buf = Buffer::new(3, 1);
        for x in 0..3 {
            buf.set(x, 0, Cell::Symbol("z".into()));
        }
        buf.clear(Rect::new(1, 0, 1, 1));
        assert_eq!(buf.row_text(0), "z z");
    }
}
