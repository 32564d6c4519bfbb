#![forbid(unsafe_code)]

//! Demonstration settings screens for StateView.
//!
//! Two screens implement the same "Developer Mode" setting:
//!
//! - [`EncapsulatedScreen`] delegates reconciliation to
//!   [`StateView`](stateview_widgets::StateView).
//! - [`ManualScreen`] keeps the shown value, the suppression flag and the
//!   reset logic inline.
//!
//! [`App`] drives either one from a stream of keys.

pub mod app;
pub mod config;
pub mod error;
pub mod screen;
pub mod screens;

pub use app::App;
pub use config::{DemoConfig, SettingConfig, SheetConfig};
pub use error::{ConfigError, DemoError};
pub use screen::Screen;
pub use screens::{EncapsulatedScreen, ManualScreen, ScreenKind};
