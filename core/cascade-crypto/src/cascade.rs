//! Cascade engine: sequential layered seal and open.
//!
//! Sealing folds the suites over the plaintext in configured order; opening
//! unwinds them in reverse, so
//! `open₀ ∘ … ∘ open₉ ∘ seal₉ ∘ … ∘ seal₀ = id`. Intermediate buffers are
//! zeroized on every path because the innermost ones can hold plaintext or
//! key material.

use zeroize::Zeroizing;

use crate::cipher::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::key::LayerKey;

/// Upper bound on cascade depth, bounding worst-case work per operation.
pub const MAX_LAYERS: usize = 10;

/// Validates a layer list at construction time.
pub(crate) fn validate_layers(layers: &[Algorithm]) -> CryptoResult<()> {
    if layers.is_empty() {
        return Err(CryptoError::InvalidConfig("at least one layer"));
    }
    if layers.len() > MAX_LAYERS {
        return Err(CryptoError::InvalidConfig("at most 10 layers"));
    }
    Ok(())
}

/// Seals `plaintext` through every layer in order.
pub(crate) fn seal_layers(layer_keys: &[LayerKey], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut current = Zeroizing::new(plaintext.to_vec());
    for key in layer_keys {
        current = Zeroizing::new(key.algorithm().seal(key.as_bytes(), &current)?);
    }
    Ok(std::mem::take(&mut *current))
}

/// Opens `blob` through every layer in reverse order.
///
/// The first failing layer aborts the whole operation; by construction that
/// is the outermost layer whose framing or tag does not verify.
pub(crate) fn open_layers(layer_keys: &[LayerKey], blob: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut current = Zeroizing::new(blob.to_vec());
    for key in layer_keys.iter().rev() {
        current = Zeroizing::new(key.algorithm().open(key.as_bytes(), &current)?);
    }
    Ok(std::mem::take(&mut *current))
}
