//! Cryptographic functions for vultitool
//!
//! Password-derived keys, AES-256 GCM/CBC primitives, the ordered table of
//! decryption schemes and the resolver that walks it.

pub mod encryption;
pub mod key_derivation;
pub mod resolver;
pub mod schemes;
pub mod secure_memory;

pub use key_derivation::{DerivedKey, KeySchedule};
pub use resolver::{resolve, resolve_with, AttemptOutcome, DecryptionAttempt, ResolvedPlaintext};
pub use schemes::{descriptor, seal_primary, SchemeDescriptor, SchemeError, SchemeId, SCHEMES};
pub use secure_memory::SecureString;
