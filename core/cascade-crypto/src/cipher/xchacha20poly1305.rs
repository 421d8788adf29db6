//! XChaCha20-Poly1305 suite.
//!
//! The 24-byte extended nonce is safe for random generation with no
//! birthday-bound concern at any realistic message count.
//!
//! Output format: nonce (24 bytes) || ciphertext || tag (16 bytes).

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::error::{CryptoError, CryptoResult};
use crate::random;

const NONCE_SIZE: usize = 24;

pub(super) fn seal(key: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("XChaCha20 key setup failed".into()))?;

    let nonce: [u8; NONCE_SIZE] = random::array()?;
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::PrimitiveUnavailable("XChaCha20 encryption failed".into()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

pub(super) fn open(key: &[u8], blob: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("XChaCha20 key setup failed".into()))?;

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthFailure)
}
