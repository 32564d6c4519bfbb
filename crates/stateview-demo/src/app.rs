#![forbid(unsafe_code)]

//! Key-driven event loop around one [`Screen`].

use stateview_runtime::tick::TickQueue;
use stateview_widgets::{Buffer, Key};

use crate::screen::Screen;

pub struct App {
    screen: Box<dyn Screen>,
    ticks: TickQueue,
    width: u16,
    running: bool,
}

impl App {
    /// `ticks` must be the queue the screen defers onto.
    #[must_use]
    pub fn new(screen: Box<dyn Screen>, ticks: TickQueue, width: u16) -> Self {
        Self {
            screen,
            ticks,
            width,
            running: true,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle one key, then run one tick. Returns `false` once the app quit.
    ///
    /// `q` quits unless the sheet is open.
    pub fn dispatch(&mut self, key: Key) -> bool {
        if !self.running {
            return false;
        }
        if key.is_char('q') && !self.screen.is_confirming() {
            tracing::debug!(screen = self.screen.name(), "quit");
            self.running = false;
            return false;
        }
        let consumed = self.screen.handle_key(key);
        let deferred = self.ticks.run_tick();
        tracing::trace!(?key, consumed, deferred, "key dispatched");
        true
    }

    /// Dispatch keys until they run out or the app quits.
    pub fn run_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            if !self.dispatch(key) {
                break;
            }
        }
    }

    /// Render the current screen.
    #[must_use]
    pub fn frame(&self) -> Buffer {
        let height = self.screen.height(self.width);
        let mut buf = Buffer::new(self.width, height);
        self.screen.render(buf.area(), &mut buf);
        buf
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen.name())
            .field("ticks", &self.ticks)
            .field("running", &self.running)
            .finish()
    }
}
