#![forbid(unsafe_code)]

//! On/off control bound to an `Observable<bool>`.

use stateview_runtime::reactive::Observable;

use crate::buffer::{Buffer, Rect};
use crate::event::Key;
use crate::{Widget, draw_text_span};

/// Cells a rendered toggle occupies.
pub const TOGGLE_WIDTH: u16 = 5;

/// A switch that writes its bound value when flipped.
///
/// A disabled toggle renders in parentheses and ignores every flip.
#[derive(Debug, Clone)]
pub struct Toggle {
    value: Observable<bool>,
    disabled: bool,
}

impl Toggle {
    #[must_use]
    pub fn new(value: &Observable<bool>) -> Self {
        Self {
            value: value.clone(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.value.get()
    }

    /// Negate the bound value. Returns whether the flip happened.
    pub fn flip(&self) -> bool {
        if self.disabled {
            return false;
        }
        self.value.update(|on| *on = !*on);
        true
    }

    /// Flip on Space or Enter. Returns whether the key was consumed.
    pub fn handle_key(&self, key: Key) -> bool {
        key.is_activate() && self.flip()
    }

    fn symbol(&self) -> &'static str {
        match (self.is_on(), self.disabled) {
            (true, false) => "[ON ]",
            (false, false) => "[OFF]",
            (true, true) => "(ON )",
            (false, true) => "(OFF)",
        }
    }
}

impl Widget for Toggle {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        draw_text_span(buf, area.x, area.y, self.symbol(), area.right());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_writes_bound_value() {
        let value = Observable::new(false);
        let toggle = Toggle::new(&value);
        assert!(toggle.flip());
        assert!(value.get());
        assert!(toggle.flip());
        assert!(!value.get());
    }

    #[test]
    fn disabled_ignores_flip() {
        let value = Observable::new(false);
        let toggle = Toggle::new(&value).disabled(true);
        assert!(!toggle.flip());
        assert!(!toggle.handle_key(Key::Space));
        assert!(!value.get());
        assert_eq!(value.version(), 0);
    }

    #[test]
    fn activate_keys_flip() {
        let value = Observable::new(false);
        let toggle = Toggle::new(&value);
        assert!(toggle.handle_key(Key::Enter));
        assert!(!toggle.handle_key(Key::Char('x')));
        assert!(value.get());
    }

    #[test]
    fn renders_state_and_disabled_marker() {
        let value = Observable::new(true);
        let mut buf = Buffer::new(TOGGLE_WIDTH, 1);
        Toggle::new(&value).render(buf.area(), &mut buf);
        assert_eq!(buf.row_text(0), "[ON ]");

        value.set(false);
        Toggle::new(&value).disabled(true).render(buf.area(), &mut buf);
        assert_eq!(buf.row_text(0), "(OFF)");
    }
}
