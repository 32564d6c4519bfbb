#![forbid(unsafe_code)]

mod encapsulated;
mod manual;

pub use encapsulated::EncapsulatedScreen;
pub use manual::ManualScreen;

use stateview_runtime::tick::TickQueue;

use crate::config::DemoConfig;
use crate::screen::Screen;

/// Which implementation of the settings page to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScreenKind {
    /// Reconciliation delegated to `StateView`.
    #[default]
    Encapsulated,
    /// Reconciliation written out by hand.
    Manual,
}

impl ScreenKind {
    #[must_use]
    pub fn build(self, config: &DemoConfig, ticks: TickQueue) -> Box<dyn Screen> {
        match self {
            Self::Encapsulated => Box::new(EncapsulatedScreen::new(config.clone(), ticks)),
            Self::Manual => Box::new(ManualScreen::new(config.clone(), ticks)),
        }
    }
}
