//! Validation of decrypted payloads and decoded records
//!
//! - `plausibility`: the gate that decides whether a decryption scheme
//!   produced meaningful output
//! - `issues`: content checks reported by `vault validate`

pub mod issues;
pub mod plausibility;

pub use issues::{validate_record, ValidationIssue};
pub use plausibility::{is_json_shaped, looks_valid, Acceptance};
