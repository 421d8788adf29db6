//! AEAD cipher suites.
//!
//! Each suite seals to a self-framed blob of `nonce ∥ ciphertext ∥ tag` and
//! opens by verifying authentication before releasing any plaintext. Suites
//! are stateless; [`Algorithm`] dispatches by `match` to the statically
//! linked implementations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};

mod aes_gcm;
mod ctr_hmac;
mod xchacha20poly1305;

/// Supported AEAD suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// AES-256 in Galois/Counter Mode. 12-byte nonce, 16-byte tag.
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// XChaCha20-Poly1305 with its 24-byte extended nonce.
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
    /// Encrypt-then-MAC composite: AES-256-CTR under HMAC-SHA256.
    /// 16-byte IV, 32-byte tag, independent 32-byte cipher and MAC subkeys.
    #[serde(rename = "aes-256-ctr-hmac-sha256")]
    Aes256CtrHmacSha256,
}

impl Algorithm {
    /// Raw key length the suite expects, in bytes.
    pub const fn key_length(&self) -> usize {
        match self {
            Algorithm::Aes256Gcm => 32,
            Algorithm::XChaCha20Poly1305 => 32,
            // 32-byte AES-CTR key followed by a 32-byte HMAC key.
            Algorithm::Aes256CtrHmacSha256 => 64,
        }
    }

    /// Nonce/IV length in bytes.
    pub const fn nonce_length(&self) -> usize {
        match self {
            Algorithm::Aes256Gcm => 12,
            Algorithm::XChaCha20Poly1305 => 24,
            Algorithm::Aes256CtrHmacSha256 => 16,
        }
    }

    /// Authentication tag length in bytes.
    pub const fn tag_length(&self) -> usize {
        match self {
            Algorithm::Aes256Gcm => 16,
            Algorithm::XChaCha20Poly1305 => 16,
            Algorithm::Aes256CtrHmacSha256 => 32,
        }
    }

    /// Bytes a single seal adds on top of the plaintext.
    pub const fn overhead(&self) -> usize {
        self.nonce_length() + self.tag_length()
    }

    /// Smallest blob `open` will even look at (empty plaintext framing).
    pub const fn min_blob_len(&self) -> usize {
        self.overhead()
    }

    /// Encrypts `plaintext` under `key` with a fresh random nonce.
    ///
    /// Returns `nonce ∥ ciphertext ∥ tag`. Two seals of identical inputs
    /// produce distinct blobs because the nonce is drawn from the CSPRNG
    /// on every call.
    pub fn seal(&self, key: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.check_key(key)?;
        match self {
            Algorithm::Aes256Gcm => aes_gcm::seal(key, plaintext),
            Algorithm::XChaCha20Poly1305 => xchacha20poly1305::seal(key, plaintext),
            Algorithm::Aes256CtrHmacSha256 => ctr_hmac::seal(key, plaintext),
        }
    }

    /// Verifies and decrypts a blob produced by [`Algorithm::seal`].
    ///
    /// Any integrity failure — wrong key, modified nonce, body, or tag —
    /// returns [`CryptoError::AuthFailure`] without releasing partial
    /// plaintext. Input shorter than the suite framing is rejected before
    /// any primitive runs.
    pub fn open(&self, key: &[u8], blob: &[u8]) -> CryptoResult<Vec<u8>> {
        self.check_key(key)?;
        if blob.len() < self.min_blob_len() {
            return Err(CryptoError::CiphertextTooShort {
                minimum: self.min_blob_len(),
                actual: blob.len(),
            });
        }
        match self {
            Algorithm::Aes256Gcm => aes_gcm::open(key, blob),
            Algorithm::XChaCha20Poly1305 => xchacha20poly1305::open(key, blob),
            Algorithm::Aes256CtrHmacSha256 => ctr_hmac::open(key, blob),
        }
    }

    fn check_key(&self, key: &[u8]) -> CryptoResult<()> {
        if key.len() != self.key_length() {
            return Err(CryptoError::InvalidKey {
                expected: self.key_length(),
                actual: key.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Aes256Gcm => "aes-256-gcm",
            Algorithm::XChaCha20Poly1305 => "xchacha20-poly1305",
            Algorithm::Aes256CtrHmacSha256 => "aes-256-ctr-hmac-sha256",
        };
        f.write_str(name)
    }
}
