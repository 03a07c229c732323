//! User settings for vultitool
//!
//! Defaults for export format, JSON layout, log verbosity and key-share
//! display. Command-line flags take precedence over these.

use serde::{Deserialize, Serialize};

use super::paths::ToolPaths;
use crate::error::VaultError;
use crate::export::ExportFormat;

/// User settings for vultitool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Format used by `vault export` when `--format` is not given
    #[serde(default)]
    pub export_format: ExportFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,

    /// Tracing filter used when neither `RUST_LOG` nor `-v` is given
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Include decoded key-share data in `vault inspect` output
    #[serde(default)]
    pub show_keyshares: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_pretty_json() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            export_format: ExportFormat::default(),
            pretty_json: default_pretty_json(),
            log_filter: default_log_filter(),
            show_keyshares: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &ToolPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                VaultError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }
}
