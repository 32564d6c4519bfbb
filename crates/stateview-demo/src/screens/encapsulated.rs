#![forbid(unsafe_code)]

//! Settings page built on [`StateView`].
//!
//! The screen owns only the authoritative flag and the sheet. Both request
//! hooks open the sheet and park the [`Commit`]; closing the sheet resolves
//! it.

use std::cell::RefCell;
use std::rc::Rc;

use stateview_runtime::reactive::Observable;
use stateview_runtime::tick::TickQueue;
use stateview_widgets::{
    Buffer, Commit, ConfirmSheet, ConfirmationSurface, Key, Rect, SettingRow, SheetResult,
    StateView, StateViewContext,
};

use crate::config::DemoConfig;
use crate::screen::{Screen, page_height, render_page};

pub struct EncapsulatedScreen {
    config: DemoConfig,
    developer_mode: Observable<bool>,
    sheet: Rc<RefCell<ConfirmSheet>>,
    parked: Rc<RefCell<Option<Commit>>>,
    ticks: TickQueue,
    view: StateView,
}

impl EncapsulatedScreen {
    #[must_use]
    pub fn new(config: DemoConfig, ticks: TickQueue) -> Self {
        let developer_mode = Observable::new(config.initial_state);
        let sheet = Rc::new(RefCell::new(config.confirm_sheet()));
        let parked: Rc<RefCell<Option<Commit>>> = Rc::default();

        let present_warning = |sheet: &Rc<RefCell<ConfirmSheet>>,
                               parked: &Rc<RefCell<Option<Commit>>>| {
            let (sheet, parked) = (Rc::clone(sheet), Rc::clone(parked));
            move |commit: Commit| {
                sheet.borrow_mut().present(commit.request());
                *parked.borrow_mut() = Some(commit);
            }
        };
        let view = StateView::with_tick_queue(&developer_mode, ticks.clone())
            .on_request_enable(present_warning(&sheet, &parked))
            .on_request_disable(present_warning(&sheet, &parked));

        Self {
            config,
            developer_mode,
            sheet,
            parked,
            ticks,
            view,
        }
    }

    /// The authoritative flag this screen owns.
    #[must_use]
    pub fn developer_mode(&self) -> &Observable<bool> {
        &self.developer_mode
    }

    #[must_use]
    pub fn state_view(&self) -> &StateView {
        &self.view
    }

    fn row(&self, ctx: &StateViewContext<'_>) -> SettingRow {
        SettingRow::new(&self.config.setting.label, ctx.shown())
            .busy(ctx.is_diverged())
            .disabled(!ctx.is_interactive())
            .spinner_frame(usize::try_from(self.ticks.ticks()).unwrap_or(0))
    }

    fn sheet_closed(&self, result: SheetResult) {
        let commit = self.parked.borrow_mut().take();
        if let Some(commit) = commit {
            let outcome = commit.resolve(result.approved());
            tracing::debug!(?result, ?outcome, "developer mode request resolved");
        }
    }
}

impl Screen for EncapsulatedScreen {
    fn name(&self) -> &'static str {
        "encapsulated"
    }

    fn handle_key(&mut self, key: Key) -> bool {
        let sheet_result = {
            let mut sheet = self.sheet.borrow_mut();
            sheet.is_open().then(|| sheet.handle_key(key))
        };
        match sheet_result {
            Some(Some(result)) => {
                self.sheet_closed(result);
                true
            }
            Some(None) => true,
            None => self.view.view(|ctx| self.row(ctx).handle_key(key)),
        }
    }

    fn height(&self, width: u16) -> u16 {
        page_height(&self.config, &self.sheet.borrow(), width)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let row = self.view.view(|ctx| self.row(ctx));
        render_page(
            &self.config,
            &row,
            self.developer_mode.get(),
            &self.sheet.borrow(),
            area,
            buf,
        );
    }

    fn actual_state(&self) -> bool {
        self.developer_mode.get()
    }

    fn shown_state(&self) -> bool {
        self.view.shown_value()
    }

    fn is_confirming(&self) -> bool {
        self.sheet.borrow().is_open()
    }
}
