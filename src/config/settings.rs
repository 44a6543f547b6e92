//! User settings for Splitbook
//!
//! Presentation preferences only; nothing here changes how balances or
//! settlement plans are computed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::SplitbookPaths;
use crate::error::SplitbookError;

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned tables for the terminal (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV rows
    Csv,
}

impl OutputFormat {
    /// Parse a format name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// User settings for Splitbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in tables
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Output format used when a command is not given `--format`
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Show credit/debit totals next to net balances by default
    #[serde(default)]
    pub detailed_balances: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            output_format: OutputFormat::default(),
            detailed_balances: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SplitbookPaths) -> Result<Self, SplitbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SplitbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitbookPaths) -> Result<(), SplitbookError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SplitbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SplitbookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
