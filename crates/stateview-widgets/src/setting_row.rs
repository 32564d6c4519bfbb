#![forbid(unsafe_code)]

//! A labeled settings row: label, progress indicator, toggle.

use stateview_runtime::reactive::Observable;

use crate::buffer::{Buffer, Rect};
use crate::event::Key;
use crate::toggle::{TOGGLE_WIDTH, Toggle};
use crate::{Widget, draw_text_span};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// `Label ............ / [OFF]`
///
/// The spinner is drawn only while the row is marked busy. Hosts mark it
/// busy exactly while shown and actual differ, and disable the toggle for
/// the same window.
#[derive(Debug, Clone)]
pub struct SettingRow {
    label: String,
    toggle: Toggle,
    busy: bool,
    spinner_frame: usize,
}

impl SettingRow {
    #[must_use]
    pub fn new(label: impl Into<String>, shown: &Observable<bool>) -> Self {
        Self {
            label: label.into(),
            toggle: Toggle::new(shown),
            busy: false,
            spinner_frame: 0,
        }
    }

    /// Show the progress indicator.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.toggle = self.toggle.disabled(disabled);
        self
    }

    /// Pick the spinner glyph, typically from the tick count.
    #[must_use]
    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    #[must_use]
    pub fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Forward a key to the toggle.
    pub fn handle_key(&self, key: Key) -> bool {
        self.toggle.handle_key(key)
    }
}

impl Widget for SettingRow {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        tracing::trace!(
            widget = "SettingRow",
            busy = self.busy,
            width = area.width,
            "render"
        );
        if area.is_empty() {
            return;
        }

        let toggle_x = area.right().saturating_sub(TOGGLE_WIDTH).max(area.x);
        // Label, spinner and toggle are separated by at least one blank.
        let label_end = toggle_x.saturating_sub(3).max(area.x);
        draw_text_span(buf, area.x, area.y, &self.label, label_end);

        if self.busy && toggle_x >= area.x + 2 {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            draw_text_span(buf, toggle_x - 2, area.y, glyph, toggle_x - 1);
        }
        self.toggle
            .render(Rect::new(toggle_x, area.y, TOGGLE_WIDTH, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(row: &SettingRow, width: u16) -> String {
        let mut buf = Buffer::new(width, 1);
        row.render(buf.area(), &mut buf);
        buf.row_text(0)
    }

    #[test]
    fn idle_row_has_no_indicator() {
        let shown = Observable::new(false);
        let row = SettingRow::new("Developer Mode", &shown);
        assert_eq!(render(&row, 24), "Developer Mode     [OFF]");
    }

    #[test]
    fn busy_row_shows_spinner_and_disabled_toggle() {
        let shown = Observable::new(true);
        let row = SettingRow::new("Developer Mode", &shown)
            .busy(true)
            .disabled(true)
            .spinner_frame(1);
        assert_eq!(render(&row, 24), "Developer Mode   / (ON )");
        assert!(!row.handle_key(Key::Space));
    }

    #[test]
    fn label_truncated_on_narrow_area() {
        let shown = Observable::new(false);
        let row = SettingRow::new("Developer Mode", &shown);
        assert_eq!(render(&row, 12), "Deve   [OFF]");
    }
}
