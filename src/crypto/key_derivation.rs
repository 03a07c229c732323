//! Password-based key schedules
//!
//! Two schedules are in use by vault writers:
//! - a single unsalted SHA-256 pass over the password bytes, bit-exact with
//!   the key schedule of the mobile clients that write encrypted vaults;
//! - PBKDF2-HMAC-SHA256 over a per-file salt.
//!
//! Both produce 32-byte AES-256 keys. Any string is a valid password,
//! including the empty string.

use std::fmt;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::schemes::SchemeError;

/// Length of derived AES-256 keys
pub const KEY_SIZE: usize = 32;

/// Iteration count used by the stretched CBC scheme
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// How a scheme turns a password (and optional salt) into a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySchedule {
    /// `SHA-256(password)`, no salt, no stretching
    Sha256,
    /// `PBKDF2-HMAC-SHA256(password, salt, iterations)`
    Pbkdf2Sha256 { iterations: u32 },
}

impl KeySchedule {
    /// Derive a key. `salt` is ignored by unsalted schedules.
    pub fn derive(&self, password: &str, salt: &[u8]) -> Result<DerivedKey, SchemeError> {
        match *self {
            KeySchedule::Sha256 => Ok(sha256_key(password)),
            KeySchedule::Pbkdf2Sha256 { iterations } => pbkdf2_sha256_key(password, salt, iterations),
        }
    }

    /// Short human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            KeySchedule::Sha256 => "SHA-256",
            KeySchedule::Pbkdf2Sha256 { .. } => "PBKDF2-HMAC-SHA256",
        }
    }
}

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn from_bytes_for_test(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Single-pass SHA-256 of the UTF-8 password bytes
pub fn sha256_key(password: &str) -> DerivedKey {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&digest);
    DerivedKey { key }
}

/// PBKDF2-HMAC-SHA256 into a 32-byte key
pub fn pbkdf2_sha256_key(
    password: &str,
    salt: &[u8],
    iterations: u32,
) -> Result<DerivedKey, SchemeError> {
    if iterations == 0 {
        return Err(SchemeError::KeyDerivation(
            "PBKDF2 iterations must be at least 1".to_string(),
        ));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, &mut key)
        .map_err(|e| SchemeError::KeyDerivation(format!("PBKDF2 failed: {}", e)))?;

    Ok(DerivedKey { key })
}
