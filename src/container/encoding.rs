//! Base64 handling shared by both envelope layers
//!
//! Vault files are produced by several clients; some wrap the text at fixed
//! column widths and some drop the trailing `=` padding. Decoding strips
//! ASCII whitespace first and accepts padded or unpadded input.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};

use crate::error::{VaultError, VaultResult};

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const CANONICAL: GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Decode standard-alphabet base64, ignoring embedded whitespace
///
/// `layer` names the layer being decoded and is only used in error messages.
pub fn decode_base64(text: &str, layer: &str) -> VaultResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT
        .decode(compact.as_bytes())
        .map_err(|e| VaultError::Encoding(format!("Invalid base64 in {}: {}", layer, e)))
}

/// Encode bytes as padded standard-alphabet base64
pub fn encode_base64(bytes: &[u8]) -> String {
    CANONICAL.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_padded() {
        assert_eq!(decode_base64("aGVsbG8=", "envelope").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_unpadded() {
        assert_eq!(decode_base64("aGVsbG8", "envelope").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        assert_eq!(
            decode_base64("aGVs\r\nbG8g\nd29y bGQ=\n", "envelope").unwrap(),
            b"hello world"
        );
    }

    #[test]
    fn test_invalid_character_names_layer() {
        let err = decode_base64("not*base64", "vault payload").unwrap_err();
        assert!(matches!(err, VaultError::Encoding(_)));
        assert!(err.to_string().contains("vault payload"));
    }

    #[test]
    fn test_encode_matches_standard() {
        assert_eq!(encode_base64(b"hello"), "aGVsbG8=");
    }
}
