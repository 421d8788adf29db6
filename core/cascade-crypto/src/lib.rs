//! Cascading authenticated encryption with a three-level key hierarchy.
//!
//! Plaintext is sealed through an ordered sequence of one to ten
//! independent AEAD layers, each with its own derived key. Keys live in a
//! three-level hierarchy:
//!
//! 1. **Password Key**: stretched from the user's password with Argon2id.
//!    Never stored; rederived each session from the persisted salt and
//!    cost parameters.
//!
//! 2. **Master Key**: 32 random bytes, stored only sealed through the
//!    password cascade. Changing the password rewraps this one blob
//!    without touching any data.
//!
//! 3. **Content Key**: fresh 32 random bytes per encrypted item, wrapped
//!    with the master cascade and stored alongside the ciphertext.
//!
//! Every level expands its 32-byte root into per-layer subkeys via
//! HKDF-SHA256 with strict `(purpose, layer index)` domain separation, so
//! no two layers anywhere in the hierarchy share a key.
//!
//! Root material and layer keys are zeroized on every exit path; key
//! types redact their `Debug` output.

mod cascade;
mod cipher;
mod error;
mod hierarchy;
mod kdf;
mod key;
mod password;
mod random;

pub use cascade::MAX_LAYERS;
pub use cipher::Algorithm;
pub use error::{CryptoError, CryptoResult};
pub use hierarchy::Cascade;
pub use kdf::{derive_layer_keys, derive_subkey, Purpose};
pub use key::{
    EncryptedData, EncryptedMasterKey, LayerKey, MasterKey, PasswordKey, ROOT_KEY_SIZE,
};
pub use password::{hash_password, PhParams, Salt, BASE_KEY_SIZE, SALT_SIZE};
