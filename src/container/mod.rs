//! Envelope decoding for vault files
//!
//! Strips both base64 layers and exposes the outer record's fields.

pub mod encoding;
pub mod envelope;

pub use encoding::{decode_base64, encode_base64};
pub use envelope::{decode_container, encode_container, read_container, ContainerMessage, RawContainer};
