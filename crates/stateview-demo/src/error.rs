#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use stateview_widgets::ParseKeyError;
use thiserror::Error;

/// Failure to obtain a [`DemoConfig`](crate::DemoConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("width {width} is below the minimum of {min}")]
    TooNarrow { width: u16, min: u16 },
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    UnknownKey(#[from] ParseKeyError),
}
