//! AES-256-GCM suite.
//!
//! Output format: nonce (12 bytes) || ciphertext || tag (16 bytes).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::{CryptoError, CryptoResult};
use crate::random;

const NONCE_SIZE: usize = 12;

pub(super) fn seal(key: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("AES-GCM key setup failed".into()))?;

    let nonce: [u8; NONCE_SIZE] = random::array()?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::PrimitiveUnavailable("AES-GCM encryption failed".into()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

pub(super) fn open(key: &[u8], blob: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("AES-GCM key setup failed".into()))?;

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthFailure)
}
