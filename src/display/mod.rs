//! Display formatting for terminal output
//!
//! Every function here returns a `String`; printing is left to the CLI.

pub mod doctor;
pub mod vault;

pub use doctor::{format_environment, format_health};
pub use vault::{format_detailed, format_issues, format_key_share_data, format_summary};
