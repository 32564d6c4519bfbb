#![forbid(unsafe_code)]

//! Confirmation sheet shown while a toggle request is pending.
//!
//! The sheet has two buttons: confirm (primary, focused on open) and
//! cancel. Keys:
//!
//! | Key | Effect |
//! |-----|--------|
//! | `Tab` / `BackTab` / `Left` / `Right` | move focus |
//! | `Enter` / `Space` | activate the focused button |
//! | `y` | approve |
//! | `n` | cancel |
//! | `Esc` | dismiss (counts as cancel) |
//!
//! # Invariants
//!
//! - Each `present()` yields exactly one [`SheetResult`]; afterwards the sheet
//!   is closed and ignores keys until presented again.
//! - Presenting while open replaces the request and resets focus.
//!
//! # Failure Modes
//!
//! - Area too small: content is truncated, never panics.

use crate::buffer::{Buffer, Cell, Rect};
use crate::event::Key;
use crate::state_view::Request;
use crate::{Widget, draw_text_span, text_width, wrap_text};

/// Wording for one direction of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCopy {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl SheetCopy {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
        }
    }
}

/// How a sheet was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetResult {
    /// Confirm button pressed.
    Approved,
    /// Cancel button pressed.
    Cancelled,
    /// Closed without a decision.
    Dismissed,
}

impl SheetResult {
    /// The value to hand to a commit. Only `Approved` approves.
    #[must_use]
    pub const fn approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetButton {
    #[default]
    Confirm,
    Cancel,
}

impl SheetButton {
    const fn other(self) -> Self {
        match self {
            Self::Confirm => Self::Cancel,
            Self::Cancel => Self::Confirm,
        }
    }
}

/// Open/closed state of a sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetState {
    pub open: bool,
    /// The request being confirmed.
    pub request: Option<Request>,
    pub focused: SheetButton,
    /// Result after interaction.
    pub result: Option<SheetResult>,
}

impl SheetState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close with `result`.
    pub fn close(&mut self, result: SheetResult) {
        self.open = false;
        self.result = Some(result);
    }

    pub fn take_result(&mut self) -> Option<SheetResult> {
        self.result.take()
    }
}

/// Something that can confirm a pending request.
///
/// Implementations must report exactly one result per `present()`.
pub trait ConfirmationSurface {
    /// Open the surface for `request`.
    fn present(&mut self, request: Request);

    /// Feed a key. Returns the result when this key closed the surface.
    fn handle_key(&mut self, key: Key) -> Option<SheetResult>;

    /// Close without a decision, if open.
    fn dismiss(&mut self) -> Option<SheetResult>;

    fn is_open(&self) -> bool;
}

/// Modal sheet with direction-specific wording.
#[derive(Debug, Clone)]
pub struct ConfirmSheet {
    enable: SheetCopy,
    disable: SheetCopy,
    cancel_label: String,
    state: SheetState,
}

impl ConfirmSheet {
    #[must_use]
    pub fn new(enable: SheetCopy, disable: SheetCopy) -> Self {
        Self {
            enable,
            disable,
            cancel_label: "Cancel".to_owned(),
            state: SheetState::default(),
        }
    }

    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    #[must_use]
    pub fn state(&self) -> &SheetState {
        &self.state
    }

    #[must_use]
    pub fn request(&self) -> Option<Request> {
        self.state.request
    }

    #[must_use]
    pub fn focused(&self) -> SheetButton {
        self.state.focused
    }

    /// Wording for the current request.
    #[must_use]
    pub fn copy(&self) -> Option<&SheetCopy> {
        self.state.request.map(|request| match request {
            Request::Enable => &self.enable,
            Request::Disable => &self.disable,
        })
    }

    fn finish(&mut self, result: SheetResult) -> Option<SheetResult> {
        self.state.close(result);
        tracing::debug!(?result, request = ?self.state.request, "confirmation sheet closed");
        self.state.take_result()
    }

    fn activate(&mut self) -> Option<SheetResult> {
        let result = match self.state.focused {
            SheetButton::Confirm => SheetResult::Approved,
            SheetButton::Cancel => SheetResult::Cancelled,
        };
        self.finish(result)
    }

    /// Rows needed to render the sheet at `width` (including the border).
    #[must_use]
    pub fn content_height(&self, width: u16) -> u16 {
        let Some(copy) = self.copy() else {
            return 0;
        };
        let message_rows = wrap_text(&copy.message, width.saturating_sub(4)).len();
        // border + title + blank + message + blank + buttons + border
        u16::try_from(message_rows)
            .unwrap_or(u16::MAX)
            .saturating_add(6)
    }

    fn button_row(&self, copy: &SheetCopy) -> String {
        let label = |text: &str, focused: bool| {
            if focused {
                format!("> {text} <")
            } else {
                format!("[ {text} ]")
            }
        };
        format!(
            "{}   {}",
            label(&copy.confirm_label, self.state.focused == SheetButton::Confirm),
            label(&self.cancel_label, self.state.focused == SheetButton::Cancel),
        )
    }

    fn render_border(area: Rect, buf: &mut Buffer) {
        let (left, right) = (area.x, area.right() - 1);
        let (top, bottom) = (area.y, area.bottom() - 1);
        for x in left..=right {
            let edge = if x == left || x == right { "+" } else { "-" };
            buf.set(x, top, Cell::Symbol(edge.to_owned()));
            buf.set(x, bottom, Cell::Symbol(edge.to_owned()));
        }
        for y in (top + 1)..bottom {
            buf.set(left, y, Cell::Symbol("|".to_owned()));
            buf.set(right, y, Cell::Symbol("|".to_owned()));
        }
    }
}

fn draw_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str) {
    let offset = area.width.saturating_sub(text_width(text)) / 2;
    draw_text_span(buf, area.x + offset, y, text, area.right());
}

impl ConfirmationSurface for ConfirmSheet {
    fn present(&mut self, request: Request) {
        tracing::debug!(kind = request.name(), "confirmation sheet presented");
        self.state = SheetState {
            open: true,
            request: Some(request),
            focused: SheetButton::Confirm,
            result: None,
        };
    }

    fn handle_key(&mut self, key: Key) -> Option<SheetResult> {
        if !self.state.open {
            return None;
        }
        match key {
            Key::Tab | Key::BackTab | Key::Left | Key::Right => {
                self.state.focused = self.state.focused.other();
                None
            }
            Key::Enter | Key::Space => self.activate(),
            Key::Esc => self.finish(SheetResult::Dismissed),
            k if k.is_char('y') => self.finish(SheetResult::Approved),
            k if k.is_char('n') => self.finish(SheetResult::Cancelled),
            _ => None,
        }
    }

    fn dismiss(&mut self) -> Option<SheetResult> {
        if self.state.open {
            self.finish(SheetResult::Dismissed)
        } else {
            None
        }
    }

    fn is_open(&self) -> bool {
        self.state.open
    }
}

impl Widget for ConfirmSheet {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if !self.state.open || area.width < 3 || area.height < 3 {
            return;
        }
        let Some(copy) = self.copy() else {
            return;
        };

        buf.clear(area);
        Self::render_border(area, buf);

        let inner = area.inner(1);
        let text_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        let mut y = text_area.y;
        let bottom = text_area.bottom();

        if y < bottom {
            draw_centered(buf, text_area, y, &copy.title);
            y += 2;
        }
        for line in wrap_text(&copy.message, text_area.width) {
            if y >= bottom {
                break;
            }
            draw_centered(buf, text_area, y, &line);
            y += 1;
        }
        // Buttons sit on the last inner row.
        if bottom > text_area.y {
            draw_centered(buf, text_area, bottom - 1, &self.button_row(copy));
        }
    }
}
