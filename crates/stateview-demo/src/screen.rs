#![forbid(unsafe_code)]

//! The settings page both demonstration screens draw.

use stateview_widgets::{Buffer, ConfirmSheet, ConfirmationSurface, Key, Paragraph, Rect, SettingRow, Widget};

use crate::config::DemoConfig;

/// A screen the [`App`](crate::App) can drive.
pub trait Screen {
    fn name(&self) -> &'static str;

    /// Handle one key. Returns whether the screen consumed it.
    fn handle_key(&mut self, key: Key) -> bool;

    /// Rows needed at `width`.
    fn height(&self, width: u16) -> u16;

    fn render(&self, area: Rect, buf: &mut Buffer);

    /// The authoritative value.
    fn actual_state(&self) -> bool;

    /// The value the toggle displays.
    fn shown_state(&self) -> bool;

    /// Whether the confirmation sheet is open.
    fn is_confirming(&self) -> bool;
}

/// Rows of the page above the sheet.
fn page_rows(config: &DemoConfig, width: u16) -> u16 {
    let footer = Paragraph::new(&config.setting.footer).line_count(width);
    // title, blank, profile, blank, row, footer, blank, header, actual
    footer + 8
}

pub(crate) fn page_height(config: &DemoConfig, sheet: &ConfirmSheet, width: u16) -> u16 {
    let rows = page_rows(config, width);
    if sheet.is_open() {
        rows + 1 + sheet.content_height(width)
    } else {
        rows
    }
}

/// Draw the page line by line, then the sheet when open.
pub(crate) fn render_page(
    config: &DemoConfig,
    row: &SettingRow,
    actual: bool,
    sheet: &ConfirmSheet,
    area: Rect,
    buf: &mut Buffer,
) {
    let lines = |y: u16| Rect::new(area.x, y, area.width, 1);
    let mut y = area.y;

    Paragraph::new(&config.title).render(lines(y), buf);
    y += 2;
    Paragraph::new(format!("(@) {}", config.profile_name)).render(lines(y), buf);
    y += 2;
    row.render(lines(y), buf);
    y += 1;

    let footer = Paragraph::new(&config.setting.footer);
    let footer_rows = footer.line_count(area.width);
    footer.render(Rect::new(area.x, y, area.width, footer_rows), buf);
    y += footer_rows + 1;

    Paragraph::new(config.setting.section_header.to_uppercase()).render(lines(y), buf);
    y += 1;
    Paragraph::new(format!("Actual State: {actual}")).render(lines(y), buf);
    y += 2;

    if sheet.is_open() && y < area.bottom() {
        let height = sheet.content_height(area.width).min(area.bottom() - y);
        sheet.render(Rect::new(area.x, y, area.width, height), buf);
    }
}
