//! Decryption scheme descriptors
//!
//! Encrypted vaults carry no header saying how they were encrypted. Each
//! scheme a writer may have used is described here as data: key schedule,
//! cipher mode, payload layout and acceptance rule. The resolver walks
//! [`SCHEMES`] in declared order and the first scheme that both decrypts and
//! passes its acceptance rule wins, so declared order is the tie-break.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encryption::{decrypt_cbc, open_gcm, seal_gcm, BLOCK_SIZE, NONCE_SIZE, TAG_SIZE};
use super::key_derivation::{KeySchedule, PBKDF2_ITERATIONS};
use crate::error::{VaultError, VaultResult};
use crate::validate::Acceptance;

/// Identifies a decryption scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeId {
    /// SHA-256 key, AES-256-GCM
    Primary,
    /// PBKDF2-SHA256 key with per-file salt, AES-256-CBC
    StretchedCbc,
    /// SHA-256 key, AES-256-CBC
    UnsaltedCbc,
}

impl SchemeId {
    /// Stable identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeId::Primary => "primary",
            SchemeId::StretchedCbc => "stretched_cbc",
            SchemeId::UnsaltedCbc => "unsalted_cbc",
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Why a single scheme could not produce a candidate plaintext
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    #[error("payload too short: need at least {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("authentication tag mismatch")]
    Authentication,

    #[error("cipher error: {0}")]
    Cipher(String),

    #[error("key derivation error: {0}")]
    KeyDerivation(String),
}

/// What to do with a CBC ciphertext that is not a whole number of blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaggedTail {
    Reject,
    /// Right-pad with zero bytes up to the next block boundary
    ZeroFill,
}

/// PKCS#7-style padding removal
///
/// Neither rule checks that the padding bytes agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingRule {
    /// Remove `last_byte` trailing bytes
    Lenient,
    /// Remove `last_byte` trailing bytes only when `last_byte <= max`
    Bounded { max: usize },
}

impl PaddingRule {
    /// Strip padding in place according to this rule
    pub fn strip(&self, mut plaintext: Vec<u8>) -> Vec<u8> {
        let Some(&last) = plaintext.last() else {
            return plaintext;
        };
        let pad = usize::from(last);
        let applies = match *self {
            PaddingRule::Lenient => true,
            PaddingRule::Bounded { max } => pad <= max,
        };
        if applies {
            let keep = plaintext.len().saturating_sub(pad);
            plaintext.truncate(keep);
        }
        plaintext
    }
}

/// Cipher mode of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// AES-256-GCM, body is `ciphertext ‖ 16-byte tag`
    AesGcm,
    /// AES-256-CBC
    AesCbc { ragged: RaggedTail, padding: PaddingRule },
}

impl CipherMode {
    /// Whether the mode detects a wrong key by itself
    pub fn is_authenticated(&self) -> bool {
        matches!(self, CipherMode::AesGcm)
    }

    /// Short human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            CipherMode::AesGcm => "AES-256-GCM",
            CipherMode::AesCbc { .. } => "AES-256-CBC",
        }
    }
}

/// Byte layout of an encrypted payload: `salt ‖ iv ‖ body`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLayout {
    pub salt_len: usize,
    pub iv_len: usize,
    /// Shortest payload this scheme will attempt
    pub min_len: usize,
}

impl PayloadLayout {
    fn split<'a>(&self, payload: &'a [u8]) -> Result<(&'a [u8], &'a [u8], &'a [u8]), SchemeError> {
        let needed = self.min_len.max(self.salt_len + self.iv_len);
        if payload.len() < needed {
            return Err(SchemeError::TooShort {
                needed,
                actual: payload.len(),
            });
        }
        let (salt, rest) = payload.split_at(self.salt_len);
        let (iv, body) = rest.split_at(self.iv_len);
        Ok((salt, iv, body))
    }
}

/// A complete description of one decryption scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeDescriptor {
    pub id: SchemeId,
    pub key_schedule: KeySchedule,
    pub mode: CipherMode,
    pub layout: PayloadLayout,
    pub acceptance: Acceptance,
}

/// Schemes in priority order
pub const SCHEMES: [SchemeDescriptor; 3] = [
    SchemeDescriptor {
        id: SchemeId::Primary,
        key_schedule: KeySchedule::Sha256,
        mode: CipherMode::AesGcm,
        layout: PayloadLayout {
            salt_len: 0,
            iv_len: NONCE_SIZE,
            min_len: NONCE_SIZE + TAG_SIZE,
        },
        acceptance: Acceptance::Heuristic,
    },
    SchemeDescriptor {
        id: SchemeId::StretchedCbc,
        key_schedule: KeySchedule::Pbkdf2Sha256 {
            iterations: PBKDF2_ITERATIONS,
        },
        mode: CipherMode::AesCbc {
            ragged: RaggedTail::Reject,
            padding: PaddingRule::Lenient,
        },
        layout: PayloadLayout {
            salt_len: 16,
            iv_len: BLOCK_SIZE,
            min_len: 16 + BLOCK_SIZE + BLOCK_SIZE,
        },
        acceptance: Acceptance::Structural,
    },
    SchemeDescriptor {
        id: SchemeId::UnsaltedCbc,
        key_schedule: KeySchedule::Sha256,
        mode: CipherMode::AesCbc {
            ragged: RaggedTail::ZeroFill,
            padding: PaddingRule::Bounded { max: BLOCK_SIZE },
        },
        layout: PayloadLayout {
            salt_len: 0,
            iv_len: BLOCK_SIZE,
            min_len: BLOCK_SIZE + BLOCK_SIZE,
        },
        acceptance: Acceptance::Structural,
    },
];

/// Look up the descriptor for a scheme
pub fn descriptor(id: SchemeId) -> &'static SchemeDescriptor {
    match id {
        SchemeId::Primary => &SCHEMES[0],
        SchemeId::StretchedCbc => &SCHEMES[1],
        SchemeId::UnsaltedCbc => &SCHEMES[2],
    }
}

impl SchemeDescriptor {
    /// Produce a candidate plaintext from `payload`.
    ///
    /// Success only means the cipher ran to completion; the caller still has
    /// to apply [`Self::acceptance`].
    pub fn decrypt(&self, payload: &[u8], password: &str) -> Result<Vec<u8>, SchemeError> {
        let (salt, iv, body) = self.layout.split(payload)?;
        let key = self.key_schedule.derive(password, salt)?;

        match self.mode {
            CipherMode::AesGcm => open_gcm(&key, iv, body),
            CipherMode::AesCbc { ragged, padding } => {
                let remainder = body.len() % BLOCK_SIZE;
                let plaintext = if remainder == 0 {
                    decrypt_cbc(&key, iv, body)?
                } else {
                    match ragged {
                        RaggedTail::Reject => {
                            return Err(SchemeError::Cipher(format!(
                                "ciphertext length {} is not a multiple of {}",
                                body.len(),
                                BLOCK_SIZE
                            )))
                        }
                        RaggedTail::ZeroFill => {
                            let mut filled = body.to_vec();
                            filled.resize(body.len() + BLOCK_SIZE - remainder, 0);
                            decrypt_cbc(&key, iv, &filled)?
                        }
                    }
                };
                Ok(padding.strip(plaintext))
            }
        }
    }

    /// One-line description for diagnostics
    pub fn summary(&self) -> String {
        format!(
            "{}: {} key, {}, min {} bytes",
            self.id,
            self.key_schedule.label(),
            self.mode.label(),
            self.layout.min_len
        )
    }
}

/// Encrypt `plaintext` the way the primary scheme expects it.
///
/// Output is `nonce ‖ ciphertext ‖ tag` under `SHA-256(password)`.
pub fn seal_primary(plaintext: &[u8], password: &str) -> VaultResult<Vec<u8>> {
    let key = KeySchedule::Sha256
        .derive(password, &[])
        .map_err(|e| VaultError::Encryption(e.to_string()))?;
    seal_gcm(&key, plaintext).map_err(|e| VaultError::Encryption(e.to_string()))
}
