//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod doctor;
pub mod exit_code;
pub mod vault;

use std::io::IsTerminal;

use crate::config::{Settings, ToolPaths};
use crate::crypto::SecureString;
use crate::error::{VaultError, VaultResult};

pub use doctor::{handle_doctor_command, DoctorCommands};
pub use vault::{handle_vault_command, VaultCommands};

/// Whether a command completed cleanly or found problems worth a non-zero exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    IssuesFound,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => exit_code::SUCCESS,
            Outcome::IssuesFound => exit_code::FAILURE,
        }
    }
}

/// State shared by all command handlers
pub struct CliContext {
    pub paths: ToolPaths,
    pub settings: Settings,
    pub password: Option<SecureString>,
    pub verbose: u8,
    pub quiet: bool,
}

impl CliContext {
    /// Password given on the command line or through the environment
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.as_str())
    }

    /// Ask for the vault password on the terminal
    ///
    /// Returns `PasswordRequired` when stdin is not a terminal.
    pub fn prompt_password(&self) -> VaultResult<SecureString> {
        if !std::io::stdin().is_terminal() {
            return Err(VaultError::PasswordRequired);
        }
        rpassword::prompt_password("Vault password: ")
            .map(SecureString::new)
            .map_err(|e| VaultError::Io(format!("Failed to read password: {}", e)))
    }

    /// Print a status line unless `--quiet` was given
    pub fn status(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", message.as_ref());
        }
    }
}
