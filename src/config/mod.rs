//! Configuration module for vultitool
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ToolPaths;
pub use settings::Settings;
