//! Vault CLI commands
//!
//! Implements `vault parse`, `inspect`, `validate`, `export` and `decrypt`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use super::{CliContext, Outcome};
use crate::container::read_container;
use crate::display::vault::{format_detailed, format_issues, format_key_share_data, format_summary};
use crate::error::{VaultError, VaultResult};
use crate::export::{export_report_json, export_report_yaml, ExportFormat};
use crate::services::vault::{
    open_vault, read_vault_text, unlock_payload, validate_report, OpenedVault, VaultReport,
};

/// Vault file commands
#[derive(Subcommand)]
pub enum VaultCommands {
    /// Parse and display vault contents
    Parse {
        /// Path to .vult file
        file: PathBuf,
        /// Output as JSON
        #[arg(long, conflicts_with = "summary")]
        json: bool,
        /// Brief summary only
        #[arg(long)]
        summary: bool,
    },

    /// Detailed vault inspection
    Inspect {
        /// Path to .vult file
        file: PathBuf,
        /// Show decoded key share data (sensitive!)
        #[arg(long)]
        show_keyshares: bool,
    },

    /// Check the vault for missing or inconsistent fields
    Validate {
        /// Path to .vult file
        file: PathBuf,
        /// Also check the library type and signer/key-share counts
        #[arg(long)]
        strict: bool,
    },

    /// Export the vault report to a file
    Export {
        /// Path to .vult file
        file: PathBuf,
        /// Output file path
        output: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,
        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Write the decrypted inner payload to a file
    Decrypt {
        /// Path to .vult file
        file: PathBuf,
        /// Output file path
        output: PathBuf,
    },
}

/// Handle vault commands
pub fn handle_vault_command(ctx: &CliContext, cmd: VaultCommands) -> VaultResult<Outcome> {
    match cmd {
        VaultCommands::Parse {
            file,
            json,
            summary,
        } => {
            let report = load_report(ctx, &file)?;
            if json {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                export_report_json(&report, &mut handle, true)?;
            } else if summary {
                print!("{}", format_summary(&report));
            } else {
                print!("{}", format_detailed(&report, ctx.verbose > 0));
            }
            Ok(Outcome::Success)
        }

        VaultCommands::Inspect {
            file,
            show_keyshares,
        } => {
            let report = load_report(ctx, &file)?;
            print!("{}", format_detailed(&report, true));
            if show_keyshares || ctx.settings.show_keyshares {
                if let Some(vault) = &report.vault {
                    print!("{}", format_key_share_data(&vault.key_shares));
                }
            }
            Ok(Outcome::Success)
        }

        VaultCommands::Validate { file, strict } => {
            let report = load_report(ctx, &file)?;
            let issues = validate_report(&report, strict);
            print!("{}", format_issues(&issues));
            if issues.is_empty() {
                Ok(Outcome::Success)
            } else {
                Ok(Outcome::IssuesFound)
            }
        }

        VaultCommands::Export {
            file,
            output,
            format,
            pretty,
            compact,
        } => {
            let report = load_report(ctx, &file)?;
            let format = format.unwrap_or(ctx.settings.export_format);
            let pretty = if compact {
                false
            } else {
                pretty || ctx.settings.pretty_json
            };

            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => export_report_json(&report, &mut writer, pretty)?,
                ExportFormat::Yaml => export_report_yaml(&report, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| VaultError::Export(e.to_string()))?;

            ctx.status(format!(
                "Exported vault data to {} ({})",
                output.display(),
                format
            ));
            Ok(Outcome::Success)
        }

        VaultCommands::Decrypt { file, output } => decrypt_to_file(ctx, &file, &output),
    }
}

fn load_report(ctx: &CliContext, file: &Path) -> VaultResult<VaultReport> {
    let opened = open_with_prompt(ctx, file)?;
    Ok(VaultReport::build(file, &opened))
}

/// Open a vault, prompting for a password when it turns out to be encrypted
fn open_with_prompt(ctx: &CliContext, file: &Path) -> VaultResult<OpenedVault> {
    let text = read_vault_text(file)?;
    match open_vault(&text, ctx.password()) {
        Err(VaultError::PasswordRequired) => {
            let password = ctx.prompt_password()?;
            open_vault(&text, Some(password.as_str()))
        }
        result => result,
    }
}

fn decrypt_to_file(ctx: &CliContext, file: &Path, output: &Path) -> VaultResult<Outcome> {
    let container = read_container(file)?;

    let (plaintext, scheme) = match unlock_payload(&container, ctx.password()) {
        Err(VaultError::PasswordRequired) => {
            let password = ctx.prompt_password()?;
            unlock_payload(&container, Some(password.as_str()))?
        }
        result => result?,
    };

    std::fs::write(output, &plaintext)
        .map_err(|e| VaultError::Io(format!("Failed to write {}: {}", output.display(), e)))?;

    match scheme {
        Some(scheme) => {
            info!(scheme = scheme.as_str(), bytes = plaintext.len(), "payload decrypted");
            ctx.status(format!(
                "Decrypted with {} scheme, wrote {} bytes to {}",
                scheme,
                plaintext.len(),
                output.display()
            ));
        }
        None if container.is_encrypted => ctx.status(format!(
            "Encrypted payload is empty, wrote 0 bytes to {}",
            output.display()
        )),
        None => ctx.status(format!(
            "Vault is not encrypted, wrote {} payload bytes to {}",
            plaintext.len(),
            output.display()
        )),
    }
    Ok(Outcome::Success)
}

fn create_output(path: &Path) -> VaultResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| VaultError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
