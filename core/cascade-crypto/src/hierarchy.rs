//! Three-level key hierarchy: PasswordKey → MasterKey → ContentKey.
//!
//! [`Cascade`] is the configured instance behind the whole public API. The
//! password level wraps the master level, the master level wraps a fresh
//! content key per item, and only the content level ever touches user data.
//! Rotating the password therefore rewraps one 32-byte secret instead of
//! re-encrypting the data set.

use tracing::debug;
use zeroize::Zeroizing;

use crate::cascade::{open_layers, seal_layers, validate_layers};
use crate::cipher::Algorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::kdf::{derive_layer_keys, Purpose};
use crate::key::{EncryptedData, EncryptedMasterKey, LayerKey, MasterKey, PasswordKey, ROOT_KEY_SIZE};
use crate::password::{hash_password, PhParams, Salt};
use crate::random;

/// A configured cascade instance.
///
/// Immutable after construction and safe to share for the lifetime of the
/// program; operations never mutate the instance or any key passed in.
pub struct Cascade {
    layers: Vec<Algorithm>,
}

impl Cascade {
    /// Validates the layer list once and returns the instance.
    ///
    /// Rejects empty lists and lists longer than
    /// [`MAX_LAYERS`](crate::MAX_LAYERS) with [`CryptoError::InvalidConfig`].
    pub fn new(layers: Vec<Algorithm>) -> CryptoResult<Self> {
        validate_layers(&layers)?;
        Ok(Self { layers })
    }

    /// The configured layer list, outermost seal last.
    pub fn layers(&self) -> &[Algorithm] {
        &self.layers
    }

    /// Total bytes one pass through the cascade adds to a plaintext.
    pub fn overhead(&self) -> usize {
        self.layers.iter().map(|l| l.overhead()).sum()
    }

    /// Exact length of a wrapped key blob produced by this configuration.
    pub fn wrapped_key_len(&self) -> usize {
        ROOT_KEY_SIZE + self.overhead()
    }

    /// Exact ciphertext length for a plaintext of `plaintext_len` bytes.
    pub fn encrypted_len(&self, plaintext_len: usize) -> usize {
        plaintext_len + self.overhead()
    }

    /// Stretches `password` into a [`PasswordKey`] for this configuration.
    ///
    /// When `salt` is `None` a fresh one is generated and returned inside
    /// the key; persist it (with the params) to rederive the same key in a
    /// later session.
    pub fn derive_password_key(
        &self,
        password: impl AsRef<[u8]>,
        params: &PhParams,
        salt: Option<Salt>,
    ) -> CryptoResult<PasswordKey> {
        params.validate()?;
        let salt = match salt {
            Some(salt) => salt,
            None => Salt::random()?,
        };

        let base = hash_password(password.as_ref(), &salt, params)?;
        let layer_keys = derive_layer_keys(&base, Purpose::Password, &self.layers)?;

        debug!("derived password key for {} cascade layer(s)", self.layers.len());
        Ok(PasswordKey::new(salt, *params, layer_keys))
    }

    /// Generates a fresh master key and returns it alongside its encrypted
    /// form, sealed through the password cascade.
    pub fn generate_master_key(
        &self,
        password_key: &PasswordKey,
    ) -> CryptoResult<(MasterKey, EncryptedMasterKey)> {
        self.check_key_shape(password_key.layer_keys())?;

        let raw: Zeroizing<[u8; ROOT_KEY_SIZE]> = Zeroizing::new(random::array()?);
        let layer_keys = derive_layer_keys(&raw, Purpose::Master, &self.layers)?;
        let sealed = seal_layers(password_key.layer_keys(), &raw[..])?;

        debug!("generated master key, wrapped blob is {} bytes", sealed.len());
        Ok((MasterKey::new(layer_keys), EncryptedMasterKey::from_bytes(sealed)))
    }

    /// Recovers the master key from its encrypted form.
    ///
    /// A wrong password or any tampering with the blob surfaces as
    /// [`CryptoError::WrongPasswordOrTampered`].
    pub fn unlock_master_key(
        &self,
        encrypted: &EncryptedMasterKey,
        password_key: &PasswordKey,
    ) -> CryptoResult<MasterKey> {
        self.check_key_shape(password_key.layer_keys())?;

        let raw = open_layers(password_key.layer_keys(), encrypted.as_bytes())
            .map_err(|e| e.into_tamper_error(CryptoError::WrongPasswordOrTampered))?;
        let root = into_root(Zeroizing::new(raw))?;
        let layer_keys = derive_layer_keys(&root, Purpose::Master, &self.layers)?;

        debug!("unlocked master key through {} layer(s)", self.layers.len());
        Ok(MasterKey::new(layer_keys))
    }

    /// Encrypts `plaintext` under a fresh per-item content key.
    ///
    /// The content key material is wrapped with the master cascade and
    /// returned inside the result; nothing about the item is retained.
    pub fn encrypt(&self, plaintext: &[u8], master_key: &MasterKey) -> CryptoResult<EncryptedData> {
        self.check_key_shape(master_key.layer_keys())?;

        let raw: Zeroizing<[u8; ROOT_KEY_SIZE]> = Zeroizing::new(random::array()?);
        let content_keys = derive_layer_keys(&raw, Purpose::Content, &self.layers)?;

        let wrapped_content_key = seal_layers(master_key.layer_keys(), &raw[..])?;
        let ciphertext = seal_layers(&content_keys, plaintext)?;

        debug!(
            "encrypted {} plaintext byte(s) into {} ciphertext byte(s)",
            plaintext.len(),
            ciphertext.len()
        );
        Ok(EncryptedData {
            wrapped_content_key,
            ciphertext,
        })
    }

    /// Unwraps the content key and decrypts the payload.
    ///
    /// A wrong master key or tampering with either blob surfaces as
    /// [`CryptoError::WrongKeyOrTampered`]; the wrapped key is checked
    /// before the ciphertext is touched.
    pub fn decrypt(&self, data: &EncryptedData, master_key: &MasterKey) -> CryptoResult<Vec<u8>> {
        self.check_key_shape(master_key.layer_keys())?;

        let raw = open_layers(master_key.layer_keys(), &data.wrapped_content_key)
            .map_err(|e| e.into_tamper_error(CryptoError::WrongKeyOrTampered))?;
        let root = into_root(Zeroizing::new(raw))?;
        let content_keys = derive_layer_keys(&root, Purpose::Content, &self.layers)?;

        open_layers(&content_keys, &data.ciphertext)
            .map_err(|e| e.into_tamper_error(CryptoError::WrongKeyOrTampered))
    }

    /// Rewraps the master key under a new password key.
    ///
    /// Only the wrapper changes: the master key itself is not rotated, so
    /// previously encrypted data stays readable without re-encryption.
    pub fn change_password(
        &self,
        encrypted: &EncryptedMasterKey,
        old_password_key: &PasswordKey,
        new_password_key: &PasswordKey,
    ) -> CryptoResult<EncryptedMasterKey> {
        self.check_key_shape(old_password_key.layer_keys())?;
        self.check_key_shape(new_password_key.layer_keys())?;

        let raw = open_layers(old_password_key.layer_keys(), encrypted.as_bytes())
            .map_err(|e| e.into_tamper_error(CryptoError::WrongPasswordOrTampered))?;
        let raw = Zeroizing::new(raw);
        let sealed = seal_layers(new_password_key.layer_keys(), &raw)?;

        debug!("rewrapped master key under new password");
        Ok(EncryptedMasterKey::from_bytes(sealed))
    }

    /// Wipes every layer key inside a password key.
    pub fn wipe_password_key(&self, password_key: &mut PasswordKey) {
        password_key.wipe();
    }

    /// Wipes every layer key inside a master key.
    pub fn wipe_master_key(&self, master_key: &mut MasterKey) {
        master_key.wipe();
    }

    /// Rejects keys whose layer list does not match this configuration
    /// element for element.
    fn check_key_shape(&self, layer_keys: &[LayerKey]) -> CryptoResult<()> {
        let matches = layer_keys.len() == self.layers.len()
            && layer_keys
                .iter()
                .zip(&self.layers)
                .all(|(key, &layer)| key.algorithm() == layer);
        if !matches {
            return Err(CryptoError::InvalidParameter(
                "key was derived for a different cascade configuration".into(),
            ));
        }
        Ok(())
    }
}

fn into_root(raw: Zeroizing<Vec<u8>>) -> CryptoResult<Zeroizing<[u8; ROOT_KEY_SIZE]>> {
    if raw.len() != ROOT_KEY_SIZE {
        return Err(CryptoError::InvalidKey {
            expected: ROOT_KEY_SIZE,
            actual: raw.len(),
        });
    }
    let mut root = Zeroizing::new([0u8; ROOT_KEY_SIZE]);
    root.copy_from_slice(&raw);
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_at_construction() {
        assert!(Cascade::new(vec![]).is_err());
        assert!(Cascade::new(vec![Algorithm::Aes256Gcm; 11]).is_err());
        assert!(Cascade::new(vec![Algorithm::Aes256Gcm]).is_ok());
    }

    #[test]
    fn mismatched_key_rejected() {
        let one = Cascade::new(vec![Algorithm::Aes256Gcm]).unwrap();
        let two = Cascade::new(vec![Algorithm::Aes256Gcm, Algorithm::XChaCha20Poly1305]).unwrap();

        let pk = one
            .derive_password_key(b"pw", &PhParams::INTERACTIVE, None)
            .unwrap();
        assert!(matches!(
            two.generate_master_key(&pk),
            Err(CryptoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn overhead_accounting() {
        let cascade = Cascade::new(vec![
            Algorithm::Aes256Gcm,
            Algorithm::XChaCha20Poly1305,
            Algorithm::Aes256CtrHmacSha256,
        ])
        .unwrap();
        assert_eq!(cascade.overhead(), 28 + 40 + 48);
        assert_eq!(cascade.wrapped_key_len(), 32 + 116);
        assert_eq!(cascade.encrypted_len(100), 216);
    }
}
