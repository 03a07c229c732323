//! Decryption resolution
//!
//! Tries each scheme from [`SCHEMES`] in order and returns the first
//! plaintext that both decrypts and passes the scheme's acceptance rule.
//! Failure is a single opaque [`VaultError::DecryptionFailed`]; per-scheme
//! outcomes only reach the debug log, and only as outcome kinds.

use std::fmt;

use super::schemes::{SchemeDescriptor, SchemeError, SchemeId, SCHEMES};
use crate::error::{VaultError, VaultResult};

/// Terminal result of a successful resolution
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedPlaintext {
    pub bytes: Vec<u8>,
    pub scheme: SchemeId,
}

impl fmt::Debug for ResolvedPlaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPlaintext")
            .field("len", &self.bytes.len())
            .field("scheme", &self.scheme)
            .finish()
    }
}

/// How a single scheme trial ended
pub enum AttemptOutcome {
    Success(Vec<u8>),
    CryptoFailure(SchemeError),
    ValidationFailure,
}

impl AttemptOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::CryptoFailure(SchemeError::Authentication) => "authentication_failure",
            AttemptOutcome::CryptoFailure(SchemeError::TooShort { .. }) => "too_short",
            AttemptOutcome::CryptoFailure(_) => "crypto_failure",
            AttemptOutcome::ValidationFailure => "validation_failure",
        }
    }
}

impl fmt::Debug for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Success(bytes) => write!(f, "Success({} bytes)", bytes.len()),
            AttemptOutcome::CryptoFailure(e) => write!(f, "CryptoFailure({})", e),
            AttemptOutcome::ValidationFailure => f.write_str("ValidationFailure"),
        }
    }
}

/// One scheme trial. Created and discarded per scheme.
#[derive(Debug)]
pub struct DecryptionAttempt {
    pub scheme: SchemeId,
    pub outcome: AttemptOutcome,
}

impl DecryptionAttempt {
    /// Run `scheme` against `payload`
    pub fn run(scheme: &SchemeDescriptor, payload: &[u8], password: &str) -> Self {
        let outcome = match scheme.decrypt(payload, password) {
            Err(e) => AttemptOutcome::CryptoFailure(e),
            Ok(candidate) if scheme.acceptance.accepts(&candidate) => AttemptOutcome::Success(candidate),
            Ok(_) => AttemptOutcome::ValidationFailure,
        };
        Self {
            scheme: scheme.id,
            outcome,
        }
    }

    /// The accepted plaintext, if this attempt succeeded
    pub fn into_resolved(self) -> Option<ResolvedPlaintext> {
        match self.outcome {
            AttemptOutcome::Success(bytes) => Some(ResolvedPlaintext {
                bytes,
                scheme: self.scheme,
            }),
            _ => None,
        }
    }
}

/// Resolve an encrypted payload with the built-in scheme table
pub fn resolve(payload: &[u8], password: &str) -> VaultResult<ResolvedPlaintext> {
    resolve_with(&SCHEMES, payload, password)
}

/// Resolve an encrypted payload against an explicit scheme list
///
/// Schemes are tried in slice order; the first success short-circuits.
pub fn resolve_with(
    schemes: &[SchemeDescriptor],
    payload: &[u8],
    password: &str,
) -> VaultResult<ResolvedPlaintext> {
    let resolved = schemes.iter().find_map(|scheme| {
        let attempt = DecryptionAttempt::run(scheme, payload, password);
        tracing::debug!(
            scheme = %attempt.scheme,
            outcome = attempt.outcome.kind(),
            "decryption attempt"
        );
        attempt.into_resolved()
    });

    match resolved {
        Some(plaintext) => {
            tracing::info!(scheme = %plaintext.scheme, "vault payload decrypted");
            Ok(plaintext)
        }
        None => Err(VaultError::DecryptionFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encryption::encrypt_cbc;
    use crate::crypto::key_derivation::{pbkdf2_sha256_key, sha256_key, PBKDF2_ITERATIONS};
    use crate::crypto::schemes::{descriptor, seal_primary};
    use crate::record::tests::sample_record_bytes;

    const PASSWORD: &str = "vulticli01";

    fn pkcs7(mut data: Vec<u8>) -> Vec<u8> {
        let pad = 16 - data.len() % 16;
        data.extend(std::iter::repeat(pad as u8).take(pad));
        data
    }

    fn stretched_payload(plaintext: &[u8], password: &str) -> Vec<u8> {
        let salt = [0x5Au8; 16];
        let iv = [0x11u8; 16];
        let key = pbkdf2_sha256_key(password, &salt, PBKDF2_ITERATIONS).unwrap();
        let mut payload = salt.to_vec();
        payload.extend_from_slice(&iv);
        payload.extend(encrypt_cbc(&key, &iv, &pkcs7(plaintext.to_vec())));
        payload
    }

    fn unsalted_payload(plaintext: &[u8], password: &str) -> Vec<u8> {
        let iv = [0x22u8; 16];
        let key = sha256_key(password);
        let mut payload = iv.to_vec();
        payload.extend(encrypt_cbc(&key, &iv, &pkcs7(plaintext.to_vec())));
        payload
    }

    #[test]
    fn test_primary_scheme_resolves() {
        let record = sample_record_bytes();
        let sealed = seal_primary(&record, PASSWORD).unwrap();

        let resolved = resolve(&sealed, PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::Primary);
        assert_eq!(resolved.bytes, record);
        assert_eq!(resolved.bytes[0], 0x0A);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let sealed = seal_primary(&sample_record_bytes(), PASSWORD).unwrap();
        let first = resolve(&sealed, PASSWORD).unwrap();
        let second = resolve(&sealed, PASSWORD).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_password_fails() {
        let sealed = seal_primary(&sample_record_bytes(), PASSWORD).unwrap();
        let err = resolve(&sealed, "not-the-password").unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_wrong_password_rejected_by_tag_not_validator() {
        let sealed = seal_primary(&sample_record_bytes(), PASSWORD).unwrap();
        let attempt = DecryptionAttempt::run(descriptor(SchemeId::Primary), &sealed, "wrong");
        assert!(matches!(
            attempt.outcome,
            AttemptOutcome::CryptoFailure(SchemeError::Authentication)
        ));
    }

    #[test]
    fn test_twelve_byte_payload_is_crypto_failure() {
        let attempt = DecryptionAttempt::run(descriptor(SchemeId::Primary), &[0u8; 12], PASSWORD);
        assert!(matches!(
            attempt.outcome,
            AttemptOutcome::CryptoFailure(SchemeError::TooShort { .. })
        ));
        assert!(resolve(&[0u8; 12], PASSWORD).unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_empty_payload_fails_cleanly() {
        assert!(resolve(&[], PASSWORD).unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_empty_password_is_ordinary() {
        let sealed = seal_primary(&sample_record_bytes(), "").unwrap();
        let resolved = resolve(&sealed, "").unwrap();
        assert_eq!(resolved.scheme, SchemeId::Primary);

        assert!(resolve(&sealed, " ").unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_whitespace_password_is_ordinary() {
        let sealed = seal_primary(&sample_record_bytes(), "   ").unwrap();
        assert_eq!(resolve(&sealed, "   ").unwrap().scheme, SchemeId::Primary);
        assert!(resolve(&sealed, "").unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_authentic_but_implausible_plaintext_rejected() {
        let sealed = seal_primary(b"\xff\xfe\xfd not a vault record", PASSWORD).unwrap();
        let attempt = DecryptionAttempt::run(descriptor(SchemeId::Primary), &sealed, PASSWORD);
        assert!(matches!(attempt.outcome, AttemptOutcome::ValidationFailure));
        assert!(resolve(&sealed, PASSWORD).unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_stretched_cbc_fallback() {
        let record = sample_record_bytes();
        let payload = stretched_payload(&record, PASSWORD);

        let resolved = resolve(&payload, PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::StretchedCbc);
        assert_eq!(resolved.bytes, record);
    }

    #[test]
    fn test_unsalted_cbc_fallback() {
        let record = sample_record_bytes();
        let payload = unsalted_payload(&record, PASSWORD);

        let resolved = resolve(&payload, PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::UnsaltedCbc);
        assert_eq!(resolved.bytes, record);
    }

    #[test]
    fn test_json_payload_under_cbc() {
        let json = br#"{"name": "legacy vault", "signers": ["a", "b"]}"#;
        let payload = unsalted_payload(json, PASSWORD);

        let resolved = resolve(&payload, PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::UnsaltedCbc);
        assert_eq!(resolved.bytes, json.to_vec());
    }

    #[test]
    fn test_protobuf_json_record_under_cbc() {
        let json = br#"{"name":"legacy","createdAt":"2024-01-01T00:00:00Z","libType":1,"signers":["a","b"]}"#;

        let resolved = resolve(&unsalted_payload(json, PASSWORD), PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::UnsaltedCbc);
        assert_eq!(resolved.bytes, json.to_vec());

        let resolved = resolve(&stretched_payload(json, PASSWORD), PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::StretchedCbc);
    }

    #[test]
    fn test_cbc_wrong_password_fails() {
        let payload = unsalted_payload(&sample_record_bytes(), PASSWORD);
        assert!(resolve(&payload, "wrong").unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_stretched_cbc_wrong_password_fails() {
        let payload = stretched_payload(&sample_record_bytes(), PASSWORD);
        assert!(resolve(&payload, "wrong").unwrap_err().is_decryption_failure());

        let attempt = DecryptionAttempt::run(descriptor(SchemeId::StretchedCbc), &payload, "wrong");
        assert!(matches!(
            attempt.outcome,
            AttemptOutcome::ValidationFailure | AttemptOutcome::CryptoFailure(_)
        ));
    }

    #[test]
    fn test_layout_shorter_than_header_is_too_short() {
        let mut custom = *descriptor(SchemeId::UnsaltedCbc);
        custom.layout.min_len = 0;

        let attempt = DecryptionAttempt::run(&custom, &[0u8; 4], PASSWORD);
        assert!(matches!(
            attempt.outcome,
            AttemptOutcome::CryptoFailure(SchemeError::TooShort { needed: 16, actual: 4 })
        ));
        assert!(resolve_with(&[custom], &[0u8; 4], PASSWORD)
            .unwrap_err()
            .is_decryption_failure());
    }

    #[test]
    fn test_cbc_garbage_with_marker_byte_needs_structure() {
        // Decrypts to bytes that pass the leading-byte sniff but are not a record
        let mut garbage = vec![0x0Au8, 0x7F];
        garbage.extend(std::iter::repeat(0xEE).take(30));
        let payload = unsalted_payload(&garbage, PASSWORD);

        let attempt = DecryptionAttempt::run(descriptor(SchemeId::UnsaltedCbc), &payload, PASSWORD);
        assert!(matches!(attempt.outcome, AttemptOutcome::ValidationFailure));
    }

    #[test]
    fn test_declared_order_breaks_ties() {
        let record = sample_record_bytes();
        let payload = unsalted_payload(&record, PASSWORD);

        let only_unsalted = [*descriptor(SchemeId::UnsaltedCbc)];
        let resolved = resolve_with(&only_unsalted, &payload, PASSWORD).unwrap();
        assert_eq!(resolved.scheme, SchemeId::UnsaltedCbc);

        assert!(resolve_with(&[], &payload, PASSWORD)
            .unwrap_err()
            .is_decryption_failure());
    }

    #[test]
    fn test_debug_hides_plaintext() {
        let resolved = ResolvedPlaintext {
            bytes: b"secret keyshare".to_vec(),
            scheme: SchemeId::Primary,
        };
        let debug = format!("{:?}", resolved);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("15"));
    }
}
