//! AES-256-CTR + HMAC-SHA256 encrypt-then-MAC suite.
//!
//! The 64-byte suite key splits into an AES-256-CTR key and an independent
//! HMAC-SHA256 key. The MAC covers `iv ∥ ciphertext` and is verified in
//! constant time before any decryption runs.
//!
//! Output format: iv (16 bytes) || ciphertext || tag (32 bytes).

use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{CryptoError, CryptoResult};
use crate::random;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

const IV_SIZE: usize = 16;
const TAG_SIZE: usize = 32;
const SUBKEY_SIZE: usize = 32;

pub(super) fn seal(key: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let (enc_key, mac_key) = key.split_at(SUBKEY_SIZE);

    let iv: [u8; IV_SIZE] = random::array()?;
    let mut body = plaintext.to_vec();
    let mut cipher = Aes256Ctr::new_from_slices(enc_key, &iv)
        .map_err(|_| CryptoError::PrimitiveUnavailable("AES-CTR setup failed".into()))?;
    cipher.apply_keystream(&mut body);

    let mut mac = HmacSha256::new_from_slice(mac_key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("HMAC setup failed".into()))?;
    mac.update(&iv);
    mac.update(&body);
    let tag = mac.finalize().into_bytes();

    let mut blob = Vec::with_capacity(IV_SIZE + body.len() + TAG_SIZE);
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&body);
    blob.extend_from_slice(&tag);
    Ok(blob)
}

pub(super) fn open(key: &[u8], blob: &[u8]) -> CryptoResult<Vec<u8>> {
    let (enc_key, mac_key) = key.split_at(SUBKEY_SIZE);

    let (framed, tag) = blob.split_at(blob.len() - TAG_SIZE);
    let (iv, ciphertext) = framed.split_at(IV_SIZE);

    // Authenticate before decrypting. verify_slice compares in constant time.
    let mut mac = HmacSha256::new_from_slice(mac_key)
        .map_err(|_| CryptoError::PrimitiveUnavailable("HMAC setup failed".into()))?;
    mac.update(iv);
    mac.update(ciphertext);
    mac.verify_slice(tag).map_err(|_| CryptoError::AuthFailure)?;

    let mut body = ciphertext.to_vec();
    let mut cipher = Aes256Ctr::new_from_slices(enc_key, iv)
        .map_err(|_| CryptoError::PrimitiveUnavailable("AES-CTR setup failed".into()))?;
    cipher.apply_keystream(&mut body);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<u8> {
        (0u8..64).collect()
    }

    #[test]
    fn roundtrip() {
        let blob = seal(&key(), b"encrypt then mac").unwrap();
        assert_eq!(blob.len(), 16 + 16 + 32);
        assert_eq!(open(&key(), &blob).unwrap(), b"encrypt then mac");
    }

    #[test]
    fn mac_covers_iv() {
        let mut blob = seal(&key(), b"payload").unwrap();
        blob[3] ^= 0x01;
        assert!(matches!(open(&key(), &blob), Err(CryptoError::AuthFailure)));
    }

    #[test]
    fn mac_covers_body_and_tag() {
        let blob = seal(&key(), b"payload").unwrap();
        for i in IV_SIZE..blob.len() {
            let mut bad = blob.clone();
            bad[i] ^= 0x80;
            assert!(matches!(open(&key(), &bad), Err(CryptoError::AuthFailure)));
        }
    }

    #[test]
    fn independent_subkeys() {
        // Same cipher key, different MAC key: auth must fail, proving the
        // MAC key is actually used.
        let k1 = key();
        let mut k2 = key();
        k2[SUBKEY_SIZE] ^= 0xFF;

        let blob = seal(&k1, b"subkey split").unwrap();
        assert!(matches!(open(&k2, &blob), Err(CryptoError::AuthFailure)));
    }
}
