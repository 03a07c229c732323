//! Service layer for vultitool
//!
//! Sits between the decoding core and the CLI: opens vault files, builds
//! reports and runs diagnostics.

pub mod doctor;
pub mod vault;

pub use doctor::{environment_report, run_health_check, EnvironmentReport, HealthReport};
pub use vault::{
    open_vault, open_vault_file, unlock_payload, validate_report, OpenedVault, VaultReport,
};
