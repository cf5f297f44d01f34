//! User settings for Deben
//!
//! Optional defaults read from `config.json`: which ledger to open, how much
//! to list and how large the chart is.

use std::path::PathBuf;

use serde::Deserialize;

use super::paths::DebenPaths;
use crate::error::DebenError;

/// User settings for Deben
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Ledger file used when no `--path` is given
    #[serde(default)]
    pub ledger_file: Option<PathBuf>,

    /// Operations shown by `list`
    #[serde(default = "default_list_count")]
    pub list_count: i64,

    /// Months shown by `graph`
    #[serde(default = "default_graph_months")]
    pub graph_months: i64,

    /// Rows of the `graph` chart
    #[serde(default = "default_graph_height")]
    pub graph_height: usize,

    /// Whether colours may be used on capable terminals
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_list_count() -> i64 {
    40
}

fn default_graph_months() -> i64 {
    12
}

fn default_graph_height() -> usize {
    24
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_file: None,
            list_count: default_list_count(),
            graph_months: default_graph_months(),
            graph_height: default_graph_height(),
            color: default_color(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_default(paths: &DebenPaths) -> Result<Self, DebenError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DebenError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DebenError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Ledger to open: the explicit path if any, then the configured one,
    /// then the default file in the configuration directory
    pub fn resolve_ledger(&self, explicit: Option<PathBuf>, paths: &DebenPaths) -> PathBuf {
        explicit
            .or_else(|| self.ledger_file.clone())
            .unwrap_or_else(|| paths.default_ledger_file())
    }
}
