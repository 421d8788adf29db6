//! Domain-separated subkey derivation.
//!
//! HKDF-SHA256 in expand-only mode: the 32-byte root material is already
//! uniform (Argon2id output or CSPRNG), so it is used directly as the PRK
//! with no extract step. The purpose and layer index go into the info
//! string, so changing either yields an independent subkey.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::cipher::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{LayerKey, ROOT_KEY_SIZE};

/// Hierarchy level a subkey is derived for.
///
/// The three purposes are mutually domain-separated: for the same root and
/// layer index, each yields a distinct subkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purpose {
    Password,
    Master,
    Content,
}

impl Purpose {
    fn label(&self) -> &'static str {
        match self {
            Purpose::Password => "password",
            Purpose::Master => "master",
            Purpose::Content => "content",
        }
    }
}

/// Expands `root` into a `length`-byte subkey bound to `(purpose, index)`.
///
/// Deterministic, and prefix-stable: for identical inputs, a shorter
/// request is a prefix of a longer one.
pub fn derive_subkey(
    root: &[u8; ROOT_KEY_SIZE],
    purpose: Purpose,
    index: usize,
    length: usize,
) -> CryptoResult<Vec<u8>> {
    let hk = Hkdf::<Sha256>::from_prk(root)
        .map_err(|_| CryptoError::PrimitiveUnavailable("HKDF rejected root key".into()))?;

    let info = format!("cascade-{}-layer-{}", purpose.label(), index);
    let mut okm = vec![0u8; length];
    hk.expand(info.as_bytes(), &mut okm).map_err(|_| {
        CryptoError::InvalidParameter(format!("subkey length {length} out of HKDF range"))
    })?;
    Ok(okm)
}

/// Derives one [`LayerKey`] per cascade layer from 32 bytes of root
/// material.
///
/// The caller owns `root` and must wipe it as soon as this returns, on
/// success and on error alike.
pub fn derive_layer_keys(
    root: &[u8; ROOT_KEY_SIZE],
    purpose: Purpose,
    layers: &[Algorithm],
) -> CryptoResult<Vec<LayerKey>> {
    layers
        .iter()
        .enumerate()
        .map(|(index, &algorithm)| {
            let raw = derive_subkey(root, purpose, index, algorithm.key_length())?;
            LayerKey::new(algorithm, raw)
        })
        .collect()
}
