//! Error types for the cascade crypto core.

use thiserror::Error;

/// Result type for cascade crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cascade crypto operations.
///
/// Authentication failures are deliberately uniform: no error carries the
/// index of the cascade layer that rejected the input, and no message ever
/// contains plaintext or key material.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The cascade layer list is empty, too long, or otherwise unusable.
    #[error("invalid cascade configuration: {0}")]
    InvalidConfig(&'static str),

    /// A caller-supplied parameter is malformed (wrong salt length,
    /// password-hash cost below the floor, mismatched key object, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An AEAD key has the wrong length for its suite.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// An `open` input is smaller than the suite's minimum framing.
    #[error("ciphertext too short: need at least {minimum} bytes, got {actual}")]
    CiphertextTooShort { minimum: usize, actual: usize },

    /// An AEAD authentication or integrity check failed.
    #[error("authentication failed")]
    AuthFailure,

    /// The password cascade rejected an encrypted master key.
    #[error("wrong password or tampered master key")]
    WrongPasswordOrTampered,

    /// The master or content cascade rejected encrypted data.
    #[error("wrong key or tampered data")]
    WrongKeyOrTampered,

    /// The operating system CSPRNG refused to produce bytes.
    #[error("system randomness unavailable")]
    RandomnessUnavailable,

    /// The crypto backend refused an operation it should support.
    #[error("crypto backend unavailable: {0}")]
    PrimitiveUnavailable(String),
}

impl CryptoError {
    /// Collapses layer-level rejection (failed authentication or truncated
    /// framing) into the operation-level error, leaving misuse errors such
    /// as [`CryptoError::InvalidKey`] intact.
    pub(crate) fn into_tamper_error(self, unified: CryptoError) -> CryptoError {
        match self {
            CryptoError::AuthFailure | CryptoError::CiphertextTooShort { .. } => unified,
            other => other,
        }
    }
}
