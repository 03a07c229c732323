//! Doctor CLI commands

use std::io;

use clap::Subcommand;

use super::{CliContext, Outcome};
use crate::display::doctor::{format_environment, format_health};
use crate::error::{VaultError, VaultResult};
use crate::services::doctor::{environment_report, run_health_check};

/// System diagnostics
#[derive(Subcommand)]
pub enum DoctorCommands {
    /// Quick in-process health check
    Health,

    /// Show version, configuration paths and supported schemes
    Env {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle doctor commands
pub fn handle_doctor_command(ctx: &CliContext, cmd: DoctorCommands) -> VaultResult<Outcome> {
    match cmd {
        DoctorCommands::Health => {
            let report = run_health_check();
            print!("{}", format_health(&report));
            if report.all_passed() {
                Ok(Outcome::Success)
            } else {
                Ok(Outcome::IssuesFound)
            }
        }
        DoctorCommands::Env { json } => {
            let report = environment_report(&ctx.paths, &ctx.settings)?;
            if json {
                serde_json::to_writer_pretty(io::stdout().lock(), &report)
                    .map_err(|e| VaultError::Json(e.to_string()))?;
                println!();
            } else {
                print!("{}", format_environment(&report));
            }
            Ok(Outcome::Success)
        }
    }
}
