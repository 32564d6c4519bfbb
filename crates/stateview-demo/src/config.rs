#![forbid(unsafe_code)]

//! Screen wording and layout, loaded from TOML.
//!
//! Every field is optional; omitted fields keep the stock Settings text.
//!
//! ```toml
//! title = "Preferences"
//! initial_state = true
//!
//! [setting]
//! label = "Beta Features"
//!
//! [enable_sheet]
//! confirm_label = "Enable"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use stateview_widgets::{ConfirmSheet, SheetCopy};

use crate::error::ConfigError;

/// Narrowest supported frame.
pub const MIN_WIDTH: u16 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub title: String,
    pub profile_name: String,
    /// Starting value of the authoritative flag.
    pub initial_state: bool,
    /// Frame width in cells.
    pub width: u16,
    pub setting: SettingConfig,
    #[serde(deserialize_with = "enable_sheet")]
    pub enable_sheet: SheetConfig,
    #[serde(deserialize_with = "disable_sheet")]
    pub disable_sheet: SheetConfig,
    pub cancel_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingConfig {
    pub label: String,
    pub footer: String,
    pub section_header: String,
}

/// Wording of one direction of the confirmation sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

/// A `[*_sheet]` table as written; unset keys fall back per direction.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetOverrides {
    title: Option<String>,
    message: Option<String>,
    confirm_label: Option<String>,
}

impl SheetOverrides {
    fn apply(self, base: SheetConfig) -> SheetConfig {
        SheetConfig {
            title: self.title.unwrap_or(base.title),
            message: self.message.unwrap_or(base.message),
            confirm_label: self.confirm_label.unwrap_or(base.confirm_label),
        }
    }
}

fn enable_sheet<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SheetConfig, D::Error> {
    SheetOverrides::deserialize(deserializer).map(|o| o.apply(SheetConfig::enable()))
}

fn disable_sheet<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SheetConfig, D::Error> {
    SheetOverrides::deserialize(deserializer).map(|o| o.apply(SheetConfig::disable()))
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Settings".to_owned(),
            profile_name: "Richard".to_owned(),
            initial_state: false,
            width: 60,
            setting: SettingConfig::default(),
            enable_sheet: SheetConfig::enable(),
            disable_sheet: SheetConfig::disable(),
            cancel_label: "Cancel".to_owned(),
        }
    }
}

impl Default for SettingConfig {
    fn default() -> Self {
        Self {
            label: "Developer Mode".to_owned(),
            footer: "Developer mode gives you the privilege to change ways of processing \
                     fundamental data.\nDon't enable this unless you are clear about what you \
                     are doing."
                .to_owned(),
            section_header: "For Developers".to_owned(),
        }
    }
}

impl SheetConfig {
    /// Stock wording shown before turning the setting on.
    #[must_use]
    pub fn enable() -> Self {
        Self {
            title: "Developer Mode is Dangerous.".to_owned(),
            message: "Developer mode gives you the privilege to change ways of processing \
                      fundamental data.\n\nIt's easy to mess things up and corrupt your \
                      precious data.\n\nDon't enable this unless you are clear about what \
                      you are doing."
                .to_owned(),
            confirm_label: "Turn on".to_owned(),
        }
    }

    /// Stock wording shown before turning the setting off.
    #[must_use]
    pub fn disable() -> Self {
        Self {
            title: "You're going to turn off developer mode.".to_owned(),
            message: "You will lose the privilege to change ways of processing \
                      fundamental data."
                .to_owned(),
            confirm_label: "Turn off".to_owned(),
        }
    }

    #[must_use]
    pub fn to_copy(&self) -> SheetCopy {
        SheetCopy::new(&self.title, &self.message, &self.confirm_label)
    }
}

impl DemoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded demo config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH {
            return Err(ConfigError::TooNarrow {
                width: self.width,
                min: MIN_WIDTH,
            });
        }
        Ok(())
    }

    /// A closed confirmation sheet with this config's wording.
    #[must_use]
    pub fn confirm_sheet(&self) -> ConfirmSheet {
        ConfirmSheet::new(self.enable_sheet.to_copy(), self.disable_sheet.to_copy())
            .cancel_label(&self.cancel_label)
    }
}
