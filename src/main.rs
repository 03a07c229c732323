use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vultitool::cli::{
    exit_code, handle_doctor_command, handle_vault_command, CliContext, DoctorCommands, Outcome,
    VaultCommands,
};
use vultitool::config::{Settings, ToolPaths};
use vultitool::crypto::SecureString;
use vultitool::VaultError;

#[derive(Parser)]
#[command(
    name = "vultitool",
    version,
    about = "Inspect, validate and decrypt Vultisig .vult vault backups",
    long_about = "vultitool decodes Vultisig vault backup files, resolves the \
                  encryption scheme used for the inner payload and reports the \
                  key-share set they describe."
)]
struct Cli {
    /// Vault password (prompted for when needed and not given)
    #[arg(long, global = true, env = "VULTITOOL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress status messages and logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vault file operations
    #[command(subcommand)]
    Vault(VaultCommands),

    /// System diagnostics
    #[command(subcommand)]
    Doctor(DoctorCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            if !quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let paths = ToolPaths::new().context("Failed to resolve configuration directory")?;
    let settings = Settings::load_or_default(&paths)?;

    if !cli.quiet {
        setup_tracing(cli.verbose, &settings.log_filter);
    }

    let ctx = CliContext {
        paths,
        settings,
        password: cli.password.map(SecureString::new),
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let outcome = match cli.command {
        Commands::Vault(cmd) => handle_vault_command(&ctx, cmd)?,
        Commands::Doctor(cmd) => handle_doctor_command(&ctx, cmd)?,
    };
    Ok(outcome)
}

/// `RUST_LOG` wins, then `-v`, then the configured filter
fn setup_tracing(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}

fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<VaultError>() {
            if err.is_decryption_failure() {
                return exit_code::DECRYPTION_FAILED;
            }
            if err.is_malformed_input() {
                return exit_code::MALFORMED_INPUT;
            }
        }
    }
    exit_code::FAILURE
}
