//! vultitool - inspection and recovery tooling for Vultisig vault backups
//!
//! A `.vult` file is base64 text wrapping a small protobuf container. The
//! container holds a second base64 layer with the vault record, which may be
//! encrypted under one of several historical schemes.
//!
//! # Architecture
//!
//! - `container`: both base64 layers and the container message
//! - `crypto`: key schedules, ciphers and the scheme resolver
//! - `validate`: plausibility gate for decrypted bytes, record checks
//! - `record`: the inner vault record (protobuf or JSON)
//! - `services`: opening files, building reports, diagnostics
//! - `export` / `display`: report output
//! - `config`: paths and user settings
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use vultitool::services::vault::{open_vault_file, VaultReport};
//!
//! let opened = open_vault_file(path, Some("password"))?;
//! let report = VaultReport::build(path, &opened);
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod record;
pub mod services;
pub mod validate;

pub use error::{VaultError, VaultResult};
