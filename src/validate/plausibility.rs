//! Plausibility checks for decrypted payloads
//!
//! A heuristic, not a parser: it only has to tell a meaningful vault record
//! apart from the noise a wrong key produces.

use crate::record::decode_record;

/// Candidates shorter than this are never accepted
pub const MIN_PLAUSIBLE_LEN: usize = 10;

/// Leading bytes a serialized vault record can start with.
///
/// Protobuf field tags for fields 1-4 with varint (`0x08`, `0x10`, `0x18`,
/// `0x20`) or length-delimited (`0x0A`, `0x12`, `0x1A`, `0x22`) wire types.
pub const RECORD_MARKERS: [u8; 8] = [0x08, 0x0A, 0x10, 0x12, 0x18, 0x1A, 0x20, 0x22];

/// Whether the bytes look like a decoded vault record
pub fn looks_valid(candidate: &[u8]) -> bool {
    if candidate.len() < MIN_PLAUSIBLE_LEN {
        return false;
    }
    if RECORD_MARKERS.contains(&candidate[0]) {
        return true;
    }
    is_json_shaped(candidate)
}

/// Whether the bytes are UTF-8 text that starts (after whitespace) with `{`
pub fn is_json_shaped(candidate: &[u8]) -> bool {
    std::str::from_utf8(candidate)
        .map(|text| text.trim_start().starts_with('{'))
        .unwrap_or(false)
}

/// How strictly a scheme's output is checked before it is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// [`looks_valid`] alone. Used where the cipher authenticates.
    Heuristic,
    /// [`looks_valid`] and a successful record decode. Used for
    /// unauthenticated ciphers, whose lenient padding rules let noise through.
    Structural,
}

impl Acceptance {
    pub fn accepts(&self, candidate: &[u8]) -> bool {
        match self {
            Acceptance::Heuristic => looks_valid(candidate),
            Acceptance::Structural => looks_valid(candidate) && decode_record(candidate).is_ok(),
        }
    }
}
