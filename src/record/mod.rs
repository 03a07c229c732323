//! Inner vault record
//!
//! The decrypted (or never-encrypted) payload of a container is a serialized
//! `Vault` message describing one party's view of a threshold key set. Some
//! older exports carry the same fields as a JSON object instead.

pub mod proto;

use chrono::{DateTime, Utc};
use prost::Message;
use serde::{Deserialize, Serialize};

use crate::container::decode_base64;
use crate::error::{VaultError, VaultResult};
use crate::validate::plausibility::is_json_shaped;
use proto::{KeyShareMessage, TimestampMessage, VaultMessage};

/// Threshold signature library that produced the key shares
///
/// JSON records may carry the enum by name (`DKLS`, `LIB_TYPE_DKLS`) or by
/// wire number; anything unrecognised reads as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "LibTypeRepr")]
pub enum LibType {
    #[default]
    #[serde(rename = "GG20")]
    Gg20,
    #[serde(rename = "DKLS")]
    Dkls,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LibTypeRepr {
    Number(i64),
    Name(String),
}

impl From<LibTypeRepr> for LibType {
    fn from(repr: LibTypeRepr) -> Self {
        match repr {
            LibTypeRepr::Number(n) => i32::try_from(n).map_or(LibType::Unknown, LibType::from_wire),
            LibTypeRepr::Name(name) => match name.as_str() {
                "GG20" | "LIB_TYPE_GG20" => LibType::Gg20,
                "DKLS" | "LIB_TYPE_DKLS" => LibType::Dkls,
                _ => LibType::Unknown,
            },
        }
    }
}

impl LibType {
    /// Map the wire enum value
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => LibType::Gg20,
            1 => LibType::Dkls,
            _ => LibType::Unknown,
        }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            LibType::Gg20 => 0,
            LibType::Dkls => 1,
            LibType::Unknown => -1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LibType::Gg20 => "GG20",
            LibType::Dkls => "DKLS",
            LibType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LibType::Unknown)
    }
}

/// Creation time of the vault
///
/// Reads either `{seconds, nanos}` or an RFC 3339 string, the form protobuf
/// JSON uses for timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CreatedAtRepr")]
pub struct CreatedAt {
    pub seconds: i64,
    pub nanos: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedAtRepr {
    Parts {
        #[serde(default)]
        seconds: i64,
        #[serde(default)]
        nanos: i32,
    },
    Text(String),
}

impl TryFrom<CreatedAtRepr> for CreatedAt {
    type Error = String;

    fn try_from(repr: CreatedAtRepr) -> Result<Self, Self::Error> {
        match repr {
            CreatedAtRepr::Parts { seconds, nanos } => Ok(Self { seconds, nanos }),
            CreatedAtRepr::Text(text) => {
                let parsed = DateTime::parse_from_rfc3339(&text)
                    .map_err(|e| format!("invalid timestamp {:?}: {}", text, e))?;
                let nanos = i32::try_from(parsed.timestamp_subsec_nanos())
                    .map_err(|_| format!("invalid timestamp {:?}: nanos out of range", text))?;
                Ok(Self {
                    seconds: parsed.timestamp(),
                    nanos,
                })
            }
        }
    }
}

impl CreatedAt {
    /// UTC timestamp, if the stored values are in range
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

/// One party's key share
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyShare {
    #[serde(alias = "publicKey")]
    pub public_key: String,
    pub keyshare: String,
}

impl KeyShare {
    /// Decode the share payload when it is base64-wrapped JSON
    ///
    /// Returns `None` for binary or encrypted shares.
    pub fn decoded_data(&self) -> Option<serde_json::Value> {
        if self.keyshare.is_empty() {
            return None;
        }
        let bytes = decode_base64(&self.keyshare, "key share").ok()?;
        let text = String::from_utf8(bytes).ok()?;
        serde_json::from_str(&text).ok()
    }
}

/// Decoded vault record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultRecord {
    pub name: String,
    #[serde(alias = "publicKeyEcdsa")]
    pub public_key_ecdsa: String,
    #[serde(alias = "publicKeyEddsa")]
    pub public_key_eddsa: String,
    pub signers: Vec<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<CreatedAt>,
    #[serde(alias = "hexChainCode")]
    pub hex_chain_code: String,
    #[serde(alias = "keyShares")]
    pub key_shares: Vec<KeyShare>,
    #[serde(alias = "localPartyId")]
    pub local_party_id: String,
    #[serde(alias = "resharePrefix")]
    pub reshare_prefix: String,
    #[serde(alias = "libType")]
    pub lib_type: LibType,
}

impl From<VaultMessage> for VaultRecord {
    fn from(message: VaultMessage) -> Self {
        Self {
            name: message.name,
            public_key_ecdsa: message.public_key_ecdsa,
            public_key_eddsa: message.public_key_eddsa,
            signers: message.signers,
            created_at: message.created_at.map(|ts| CreatedAt {
                seconds: ts.seconds,
                nanos: ts.nanos,
            }),
            hex_chain_code: message.hex_chain_code,
            key_shares: message
                .key_shares
                .into_iter()
                .map(|share| KeyShare {
                    public_key: share.public_key,
                    keyshare: share.keyshare,
                })
                .collect(),
            local_party_id: message.local_party_id,
            reshare_prefix: message.reshare_prefix,
            lib_type: LibType::from_wire(message.lib_type),
        }
    }
}

impl From<&VaultRecord> for VaultMessage {
    fn from(record: &VaultRecord) -> Self {
        Self {
            name: record.name.clone(),
            public_key_ecdsa: record.public_key_ecdsa.clone(),
            public_key_eddsa: record.public_key_eddsa.clone(),
            signers: record.signers.clone(),
            created_at: record.created_at.map(|c| TimestampMessage {
                seconds: c.seconds,
                nanos: c.nanos,
            }),
            hex_chain_code: record.hex_chain_code.clone(),
            key_shares: record
                .key_shares
                .iter()
                .map(|share| KeyShareMessage {
                    public_key: share.public_key.clone(),
                    keyshare: share.keyshare.clone(),
                })
                .collect(),
            local_party_id: record.local_party_id.clone(),
            reshare_prefix: record.reshare_prefix.clone(),
            lib_type: record.lib_type.to_wire(),
        }
    }
}

/// Decode a plaintext payload into a vault record
///
/// JSON-shaped payloads are read as JSON; everything else as protobuf.
/// A protobuf record whose name is 123 bytes long starts with `\n{`, so a
/// failed JSON parse still falls back to protobuf.
pub fn decode_record(bytes: &[u8]) -> VaultResult<VaultRecord> {
    if is_json_shaped(bytes) {
        return match serde_json::from_slice(bytes) {
            Ok(record) => Ok(record),
            Err(json_err) => VaultMessage::decode(bytes).map(VaultRecord::from).map_err(|_| {
                VaultError::MalformedRecord(format!("invalid JSON record: {}", json_err))
            }),
        };
    }
    VaultMessage::decode(bytes)
        .map(VaultRecord::from)
        .map_err(|e| VaultError::MalformedRecord(e.to_string()))
}

/// Serialize a vault record as protobuf
pub fn encode_record(record: &VaultRecord) -> Vec<u8> {
    VaultMessage::from(record).encode_to_vec()
}
