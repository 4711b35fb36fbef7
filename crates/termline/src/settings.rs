//! Output settings
//!
//! A small TOML file (or CLI flags) decides how the default printers behave:
//!
//! ```toml
//! debug = true
//! quiet = false
//! progress = false
//! color = true
//! ```
//!
//! Missing keys keep their defaults. `NO_COLOR` in the environment turns
//! color off regardless of the file.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Environment variable that disables color when set to a non-empty value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Errors loading [`OutputSettings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`OutputSettings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the default printers should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Emit `debug` lines
    pub debug: bool,
    /// Silence every printer
    pub quiet: bool,
    /// Draw spinner glyphs and progress bars
    pub progress: bool,
    /// Color decorated output
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            progress: true,
            color: true,
        }
    }
}

impl OutputSettings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] on invalid TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] if the file cannot be read and
    /// [`SettingsError::Parse`] if its contents are invalid.
    pub async fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(&text)
    }

    /// Apply `NO_COLOR` from the process environment.
    pub fn with_env(self) -> Self {
        self.with_no_color(std::env::var_os(NO_COLOR_ENV))
    }

    /// Apply a `NO_COLOR` value. Empty values are ignored, as no-color.org
    /// prescribes.
    pub fn with_no_color(mut self, value: Option<OsString>) -> Self {
        if value.is_some_and(|value| !value.is_empty()) {
            self.color = false;
        }
        self
    }
}
