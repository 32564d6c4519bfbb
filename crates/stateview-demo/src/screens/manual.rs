#![forbid(unsafe_code)]

//! Settings page without [`StateView`](stateview_widgets::StateView).
//!
//! The screen carries the whole protocol itself: a `next_state` mirror for
//! the toggle, a `no_action` flag so resetting the mirror does not reopen
//! the sheet, and a deferred clear of that flag because the reset's own
//! change notification may arrive late. Every screen written this way has
//! to repeat all three.

use std::cell::Cell;
use std::rc::Rc;

use stateview_runtime::reactive::{Observable, Subscription};
use stateview_runtime::tick::TickQueue;
use stateview_widgets::{
    Buffer, ConfirmSheet, ConfirmationSurface, Key, Rect, Request, SettingRow,
};

use crate::config::DemoConfig;
use crate::screen::{Screen, page_height, render_page};

pub struct ManualScreen {
    config: DemoConfig,
    /// What the toggle shows.
    next_state: Observable<bool>,
    /// Set while `next_state` is being reset.
    no_action: Rc<Cell<bool>>,
    /// The actual state.
    developer_mode: Observable<bool>,
    present_warning: Rc<Cell<bool>>,
    sheet: ConfirmSheet,
    ticks: TickQueue,
    _value_changed: Subscription,
}

impl ManualScreen {
    #[must_use]
    pub fn new(config: DemoConfig, ticks: TickQueue) -> Self {
        let next_state = Observable::new(config.initial_state);
        let developer_mode = Observable::new(config.initial_state);
        let no_action = Rc::new(Cell::new(false));
        let present_warning = Rc::new(Cell::new(false));

        let (quiet, present) = (Rc::clone(&no_action), Rc::clone(&present_warning));
        let value_changed = next_state.subscribe(move |_| {
            if quiet.get() {
                tracing::trace!("next_state reset; no action");
            } else {
                present.set(true);
            }
        });

        Self {
            sheet: config.confirm_sheet(),
            config,
            next_state,
            no_action,
            developer_mode,
            present_warning,
            ticks,
            _value_changed: value_changed,
        }
    }

    fn row(&self) -> SettingRow {
        let diverged = self.next_state.get() != self.developer_mode.get();
        SettingRow::new(&self.config.setting.label, &self.next_state)
            .busy(diverged)
            .disabled(diverged)
            .spinner_frame(usize::try_from(self.ticks.ticks()).unwrap_or(0))
    }

    fn on_dismiss(&self) {
        self.present_warning.set(false);
        self.no_action.set(true);
        self.next_state.set(self.developer_mode.get());
        let quiet = Rc::clone(&self.no_action);
        self.ticks.defer(move || quiet.set(false));
    }
}

impl Screen for ManualScreen {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if self.sheet.is_open() {
            if let Some(result) = self.sheet.handle_key(key) {
                // The sheet writes the actual state itself.
                if result.approved() {
                    self.developer_mode.set(self.next_state.get());
                }
                self.on_dismiss();
            }
            return true;
        }

        let consumed = self.row().handle_key(key);
        if self.present_warning.get() && !self.sheet.is_open() {
            self.sheet
                .present(Request::for_desired(self.next_state.get()));
        }
        consumed
    }

    fn height(&self, width: u16) -> u16 {
        page_height(&self.config, &self.sheet, width)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        render_page(
            &self.config,
            &self.row(),
            self.developer_mode.get(),
            &self.sheet,
            area,
            buf,
        );
    }

    fn actual_state(&self) -> bool {
        self.developer_mode.get()
    }

    fn shown_state(&self) -> bool {
        self.next_state.get()
    }

    fn is_confirming(&self) -> bool {
        self.sheet.is_open()
    }
}
