//! Export module for vultitool
//!
//! Writes vault reports to disk:
//! - JSON: machine-readable, optionally pretty-printed
//! - YAML: human-readable, with a comment header

pub mod json;
pub mod yaml;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use json::export_report_json;
pub use yaml::export_report_yaml;

/// Output format for `vault export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
        }
    }
}
