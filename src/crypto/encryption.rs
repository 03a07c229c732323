//! AES-256 cipher primitives
//!
//! AES-256-GCM for the authenticated scheme and a plain AES-256-CBC block
//! loop for the legacy schemes. Padding handling for CBC lives with the
//! scheme descriptors, since each scheme strips it differently.

use aes::cipher::BlockDecrypt;
use aes::{Aes256Dec, Block as AesBlock};
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use super::key_derivation::DerivedKey;
use super::schemes::SchemeError;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Open `ciphertext ‖ tag` with AES-256-GCM
pub fn open_gcm(key: &DerivedKey, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, SchemeError> {
    if nonce.len() != NONCE_SIZE {
        return Err(SchemeError::Cipher(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce.len()
        )));
    }
    if sealed.len() < TAG_SIZE {
        return Err(SchemeError::TooShort {
            needed: NONCE_SIZE + TAG_SIZE,
            actual: NONCE_SIZE + sealed.len(),
        });
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SchemeError::Cipher(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| SchemeError::Authentication)
}

/// Seal plaintext with AES-256-GCM under a fresh random nonce
///
/// Output layout is `nonce ‖ ciphertext ‖ tag`.
pub fn seal_gcm(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>, SchemeError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SchemeError::Cipher(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| SchemeError::Cipher(format!("Encryption failed: {}", e)))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt whole blocks with AES-256-CBC; no padding is removed
pub fn decrypt_cbc(key: &DerivedKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SchemeError> {
    if iv.len() != BLOCK_SIZE {
        return Err(SchemeError::Cipher(format!(
            "Invalid IV size: expected {}, got {}",
            BLOCK_SIZE,
            iv.len()
        )));
    }
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(SchemeError::Cipher(format!(
            "Ciphertext length {} is not a multiple of the block size",
            ciphertext.len()
        )));
    }

    let cipher = Aes256Dec::new_from_slice(key.as_bytes())
        .map_err(|e| SchemeError::Cipher(format!("Failed to create cipher: {}", e)))?;

    let mut previous = [0u8; BLOCK_SIZE];
    previous.copy_from_slice(iv);

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut block = AesBlock::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        plaintext.extend(block.iter().zip(previous.iter()).map(|(b, p)| b ^ p));
        previous.copy_from_slice(chunk);
    }

    Ok(plaintext)
}

/// AES-256-CBC encryption of whole blocks, used to build legacy fixtures
#[cfg(test)]
pub(crate) fn encrypt_cbc(key: &DerivedKey, iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
    use aes::cipher::BlockEncrypt;
    use aes::Aes256Enc;

    assert_eq!(plaintext.len() % BLOCK_SIZE, 0, "fixture must be block aligned");
    let cipher = Aes256Enc::new_from_slice(key.as_bytes()).unwrap();

    let mut previous = *iv;
    let mut ciphertext = Vec::with_capacity(plaintext.len());
    for chunk in plaintext.chunks_exact(BLOCK_SIZE) {
        let mut block = AesBlock::default();
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = chunk[i] ^ previous[i];
        }
        cipher.encrypt_block(&mut block);
        previous.copy_from_slice(&block);
        ciphertext.extend_from_slice(&block);
    }
    ciphertext
}
