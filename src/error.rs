//! Custom error types for vultitool
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for vultitool operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Malformed base64 in the outer envelope or the nested payload field
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Decoded bytes are not a valid container record
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Every decryption scheme was tried and none produced acceptable output.
    ///
    /// Deliberately carries no detail about which scheme got furthest.
    #[error("Decryption failed: wrong password or corrupted/unsupported data")]
    DecryptionFailed,

    /// The container is encrypted and no password was supplied
    #[error("Vault is encrypted and no password was provided")]
    PasswordRequired,

    /// Encryption errors (sealing new payloads)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The inner payload could not be decoded as a vault record
    #[error("Malformed vault record: {0}")]
    MalformedRecord(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Missing input files
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl VaultError {
    /// Create a "not found" error for vault files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vault file",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a decryption failure
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed)
    }

    /// Check if this error describes bad input data rather than the environment
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Encoding(_) | Self::MalformedContainer(_) | Self::MalformedRecord(_)
        )
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for VaultError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for vultitool operations
pub type VaultResult<T> = Result<T, VaultError>;
