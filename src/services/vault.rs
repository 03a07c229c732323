//! Vault service
//!
//! Opens `.vult` files end to end (envelope, decryption, record) and builds
//! the structured report used by every `vault` subcommand.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::container::{decode_container, RawContainer};
use crate::crypto::{resolve, SchemeId};
use crate::error::{VaultError, VaultResult};
use crate::record::{decode_record, KeyShare, LibType, VaultRecord};
use crate::validate::{validate_record, ValidationIssue};

/// Marker reported for key shares whose payload is not base64-wrapped JSON
pub const BINARY_SHARE_MARKER: &str = "[binary/encrypted]";

/// A fully opened vault file
#[derive(Debug, Clone)]
pub struct OpenedVault {
    pub container: RawContainer,
    /// Inner payload after decryption (identical to the container payload when unencrypted)
    pub plaintext: Vec<u8>,
    /// Scheme that decrypted the payload, `None` for unencrypted containers
    pub scheme: Option<SchemeId>,
    /// Decoded record, `None` when the container carries no payload
    pub record: Option<VaultRecord>,
}

/// Resolve the inner payload of a container into plaintext
///
/// Unencrypted containers are returned as-is and never reach the resolver.
pub fn unlock_payload(
    container: &RawContainer,
    password: Option<&str>,
) -> VaultResult<(Vec<u8>, Option<SchemeId>)> {
    if !container.is_encrypted || container.is_empty() {
        return Ok((container.inner_payload.clone(), None));
    }

    let password = password.ok_or(VaultError::PasswordRequired)?;
    let resolved = resolve(&container.inner_payload, password)?;
    let scheme = resolved.scheme;
    Ok((resolved.bytes, Some(scheme)))
}

/// Open a vault from its base64 text
pub fn open_vault(text: &str, password: Option<&str>) -> VaultResult<OpenedVault> {
    let container = decode_container(text)?;
    let (plaintext, scheme) = unlock_payload(&container, password)?;

    let record = if plaintext.is_empty() {
        None
    } else {
        Some(decode_record(&plaintext)?)
    };

    debug!(
        encrypted = container.is_encrypted,
        scheme = scheme.map(|s| s.as_str()),
        has_record = record.is_some(),
        "vault opened"
    );

    Ok(OpenedVault {
        container,
        plaintext,
        scheme,
        record,
    })
}

/// Read and open a vault file
pub fn open_vault_file(path: &Path, password: Option<&str>) -> VaultResult<OpenedVault> {
    let text = read_vault_text(path)?;
    open_vault(&text, password)
}

/// Read a vault file as text
pub fn read_vault_text(path: &Path) -> VaultResult<String> {
    if !path.exists() {
        return Err(VaultError::file_not_found(path.display().to_string()));
    }
    std::fs::read_to_string(path)
        .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Structured view of a vault file
#[derive(Debug, Clone, Serialize)]
pub struct VaultReport {
    pub file_info: FileInfo,
    pub container: ContainerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultView>,

    #[serde(skip)]
    record: Option<VaultRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub size_chars: usize,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub version: u64,
    pub is_encrypted: bool,
    pub vault_data_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<SchemeId>,
}

/// Record fields as reported; raw key-share text is reduced to its length
#[derive(Debug, Clone, Serialize)]
pub struct VaultView {
    pub name: String,
    pub public_key_ecdsa: String,
    pub public_key_eddsa: String,
    pub local_party_id: String,
    pub hex_chain_code: String,
    pub reshare_prefix: String,
    pub lib_type: LibType,
    pub signers: Vec<String>,
    pub key_shares: Vec<KeyShareView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyShareView {
    pub public_key: String,
    pub keyshare_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyshare_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedAtView {
    pub seconds: i64,
    pub nanos: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
}

impl KeyShareView {
    fn from_share(share: &KeyShare) -> Self {
        let keyshare_data = if share.keyshare.is_empty() {
            None
        } else {
            Some(
                share
                    .decoded_data()
                    .unwrap_or_else(|| serde_json::Value::String(BINARY_SHARE_MARKER.into())),
            )
        };

        Self {
            public_key: share.public_key.clone(),
            keyshare_length: share.keyshare.len(),
            keyshare_data,
        }
    }

    /// Whether the share payload decoded to JSON
    pub fn has_structured_data(&self) -> bool {
        matches!(self.keyshare_data, Some(ref v) if !v.is_string())
    }
}

impl From<&VaultRecord> for VaultView {
    fn from(record: &VaultRecord) -> Self {
        Self {
            name: record.name.clone(),
            public_key_ecdsa: record.public_key_ecdsa.clone(),
            public_key_eddsa: record.public_key_eddsa.clone(),
            local_party_id: record.local_party_id.clone(),
            hex_chain_code: record.hex_chain_code.clone(),
            reshare_prefix: record.reshare_prefix.clone(),
            lib_type: record.lib_type,
            signers: record.signers.clone(),
            key_shares: record.key_shares.iter().map(KeyShareView::from_share).collect(),
            created_at: record.created_at.map(|ts| CreatedAtView {
                seconds: ts.seconds,
                nanos: ts.nanos,
                datetime: ts.datetime().map(|dt| dt.to_rfc3339()),
            }),
        }
    }
}

impl VaultReport {
    /// Build the report for an opened vault
    pub fn build(path: &Path, opened: &OpenedVault) -> Self {
        Self {
            file_info: FileInfo {
                path: path.display().to_string(),
                size_chars: opened.container.envelope_len,
                size_bytes: opened.container.envelope_bytes,
            },
            container: ContainerInfo {
                version: opened.container.schema_version,
                is_encrypted: opened.container.is_encrypted,
                vault_data_length: opened.container.encoded_payload_len,
                scheme: opened.scheme,
            },
            vault: opened.record.as_ref().map(VaultView::from),
            record: opened.record.clone(),
        }
    }

    /// Open a file and build its report in one step
    pub fn from_file(path: &Path, password: Option<&str>) -> VaultResult<Self> {
        let opened = open_vault_file(path, password)?;
        Ok(Self::build(path, &opened))
    }
}

/// Run content checks against a report
pub fn validate_report(report: &VaultReport, strict: bool) -> Vec<ValidationIssue> {
    validate_record(report.record.as_ref(), strict)
}
