//! Key objects and persistable blobs.
//!
//! [`LayerKey`], [`PasswordKey`] and [`MasterKey`] hold raw key material and
//! exist only in memory: they are zeroized on drop and can be wiped
//! explicitly. Their `Debug` output is redacted. [`EncryptedMasterKey`] and
//! [`EncryptedData`] are the caller-persisted counterparts and carry no
//! secrets.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::password::{PhParams, Salt};

/// Length of the raw root material behind every key hierarchy level.
pub const ROOT_KEY_SIZE: usize = 32;

/// A single cascade layer's key: the suite it belongs to plus raw bytes of
/// exactly `algorithm.key_length()`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct LayerKey {
    #[zeroize(skip)]
    algorithm: Algorithm,
    raw: Vec<u8>,
}

impl LayerKey {
    pub(crate) fn new(algorithm: Algorithm, raw: Vec<u8>) -> CryptoResult<Self> {
        if raw.len() != algorithm.key_length() {
            return Err(CryptoError::InvalidKey {
                expected: algorithm.key_length(),
                actual: raw.len(),
            });
        }
        Ok(Self { algorithm, raw })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with care. This is secret key material; never persist it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Overwrites the key material with zeroes.
    pub fn wipe(&mut self) {
        self.raw.zeroize();
    }
}

impl fmt::Debug for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerKey")
            .field("algorithm", &self.algorithm)
            .field("raw", &"REDACTED")
            .finish()
    }
}

/// Session key rederived from the user's password.
///
/// `salt` and `params` must be persisted by the caller to rederive the same
/// key next session; the layer keys themselves never leave memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PasswordKey {
    #[zeroize(skip)]
    salt: Salt,
    #[zeroize(skip)]
    params: PhParams,
    layer_keys: Vec<LayerKey>,
}

impl PasswordKey {
    pub(crate) fn new(salt: Salt, params: PhParams, layer_keys: Vec<LayerKey>) -> Self {
        Self {
            salt,
            params,
            layer_keys,
        }
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn params(&self) -> &PhParams {
        &self.params
    }

    pub(crate) fn layer_keys(&self) -> &[LayerKey] {
        &self.layer_keys
    }

    /// Wipes every contained layer key.
    pub fn wipe(&mut self) {
        for key in &mut self.layer_keys {
            key.wipe();
        }
    }
}

impl fmt::Debug for PasswordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordKey")
            .field("salt", &self.salt)
            .field("params", &self.params)
            .field("layer_keys", &"REDACTED")
            .finish()
    }
}

/// Session master key. Never persisted; its encrypted form is
/// [`EncryptedMasterKey`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    layer_keys: Vec<LayerKey>,
}

impl MasterKey {
    pub(crate) fn new(layer_keys: Vec<LayerKey>) -> Self {
        Self { layer_keys }
    }

    pub(crate) fn layer_keys(&self) -> &[LayerKey] {
        &self.layer_keys
    }

    /// Wipes every contained layer key.
    pub fn wipe(&mut self) {
        for key in &mut self.layer_keys {
            key.wipe();
        }
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("layer_keys", &"REDACTED")
            .finish()
    }
}

/// Raw master material sealed through the password cascade. Opaque and
/// caller-persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMasterKey(pub Vec<u8>);

impl EncryptedMasterKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.0)
    }

    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| CryptoError::InvalidParameter("invalid base64 blob".into()))?;
        Ok(Self(bytes))
    }
}

/// One encrypted item: the per-item content key wrapped by the master
/// cascade, and the payload sealed by the content cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// 32 bytes of content-key material sealed with the master layer keys.
    pub wrapped_content_key: Vec<u8>,
    /// The plaintext sealed with the per-item content layer keys.
    pub ciphertext: Vec<u8>,
}
