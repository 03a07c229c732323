//! Process exit codes

pub const SUCCESS: u8 = 0;
/// Validation issues, failed health checks, or any error without a more specific code
pub const FAILURE: u8 = 1;
pub const DECRYPTION_FAILED: u8 = 2;
/// Bad base64, container or record bytes
pub const MALFORMED_INPUT: u8 = 3;
