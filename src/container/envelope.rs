//! Outer vault envelope
//!
//! A `.vult` file is the base64 text of a protobuf `VaultContainer` message.
//! Its `vault` field holds a second layer of base64 text: either the
//! serialized inner record, or (when `is_encrypted` is set) the ciphertext of
//! that record.

use std::path::Path;

use prost::Message;

use super::encoding::{decode_base64, encode_base64};
use crate::error::{VaultError, VaultResult};

/// Wire representation of the outer container.
#[derive(Clone, PartialEq, Message)]
pub struct ContainerMessage {
    #[prost(uint64, tag = "1")]
    pub version: u64,
    #[prost(string, tag = "2")]
    pub vault: String,
    #[prost(bool, tag = "3")]
    pub is_encrypted: bool,
}

/// A decoded container, produced once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContainer {
    /// Container format version
    pub schema_version: u64,
    /// Whether `inner_payload` is ciphertext
    pub is_encrypted: bool,
    /// Inner payload after the second base64 layer has been removed
    pub inner_payload: Vec<u8>,
    /// Length of the trimmed envelope text in characters
    pub envelope_len: usize,
    /// Length of the decoded outer envelope in bytes
    pub envelope_bytes: usize,
    /// Length of the nested base64 payload text in characters
    pub encoded_payload_len: usize,
}

impl RawContainer {
    /// Whether the container carries no inner payload at all
    pub fn is_empty(&self) -> bool {
        self.inner_payload.is_empty()
    }
}

/// Decode the textual contents of a vault file.
pub fn decode_container(text: &str) -> VaultResult<RawContainer> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VaultError::MalformedContainer("file is empty".to_string()));
    }

    let envelope = decode_base64(trimmed, "container envelope")?;

    let message = ContainerMessage::decode(envelope.as_slice())
        .map_err(|e| VaultError::MalformedContainer(e.to_string()))?;

    let inner_payload = if message.vault.is_empty() {
        Vec::new()
    } else {
        decode_base64(&message.vault, "vault payload")?
    };

    tracing::debug!(
        version = message.version,
        encrypted = message.is_encrypted,
        payload_len = inner_payload.len(),
        "decoded vault container"
    );

    Ok(RawContainer {
        schema_version: message.version,
        is_encrypted: message.is_encrypted,
        inner_payload,
        envelope_len: trimmed.chars().count(),
        envelope_bytes: envelope.len(),
        encoded_payload_len: message.vault.len(),
    })
}

/// Read and decode a vault file from disk.
pub fn read_container(path: &Path) -> VaultResult<RawContainer> {
    if !path.exists() {
        return Err(VaultError::file_not_found(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path).map_err(|e| {
        VaultError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    decode_container(&text)
}

/// Build the file text for a container.
///
/// The inverse of [`decode_container`]; `inner_payload` is wrapped in both
/// base64 layers.
pub fn encode_container(schema_version: u64, is_encrypted: bool, inner_payload: &[u8]) -> String {
    let message = ContainerMessage {
        version: schema_version,
        vault: encode_base64(inner_payload),
        is_encrypted,
    };
    encode_base64(&message.encode_to_vec())
}
