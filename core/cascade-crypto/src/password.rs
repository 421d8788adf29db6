//! Password stretching with Argon2id.
//!
//! Turns a low-entropy password into a 32-byte uniform base key. The
//! password is accepted as raw bytes, so a textual password hashed as UTF-8
//! produces the same key as its pre-encoded byte string.

use argon2::{Algorithm as ArgonAlgorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::random;

/// Argon2id salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Length of the stretched base key in bytes.
pub const BASE_KEY_SIZE: usize = 32;

/// Random salt for password hashing.
///
/// Salts are not secret; they are persisted alongside the encrypted master
/// key so the password key can be rederived in a later session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh random salt.
    pub fn random() -> CryptoResult<Self> {
        Ok(Self(random::array()?))
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a salt from a slice, rejecting any length other than
    /// [`SALT_SIZE`].
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let arr: [u8; SALT_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidParameter(format!(
                "salt must be {SALT_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Argon2id cost parameters.
///
/// The presets follow the usual interactive / moderate / sensitive split:
/// unlocking with `INTERACTIVE` should stay under ~200 ms on commodity
/// hardware, `MODERATE` around half a second, `SENSITIVE` multiple seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhParams {
    /// Memory cost in KiB.
    pub m_cost_kib: u32,
    /// Number of passes over memory.
    pub t_cost: u32,
    /// Degree of parallelism.
    pub p_cost: u32,
}

impl PhParams {
    /// For unlock flows where the user is waiting.
    pub const INTERACTIVE: Self = Self {
        m_cost_kib: 19 * 1024,
        t_cost: 2,
        p_cost: 1,
    };

    /// Balanced default.
    pub const MODERATE: Self = Self {
        m_cost_kib: 64 * 1024,
        t_cost: 3,
        p_cost: 1,
    };

    /// For rarely-unlocked, high-value secrets.
    pub const SENSITIVE: Self = Self {
        m_cost_kib: 256 * 1024,
        t_cost: 4,
        p_cost: 1,
    };

    /// Cost floor. Anything below is rejected outright rather than silently
    /// producing a weak key.
    pub const MIN_M_COST_KIB: u32 = 8 * 1024;
    pub const MIN_T_COST: u32 = 1;
    pub const MIN_P_COST: u32 = 1;

    /// Rejects parameters below the cost floor with
    /// [`CryptoError::InvalidParameter`].
    pub fn validate(&self) -> CryptoResult<()> {
        if self.m_cost_kib < Self::MIN_M_COST_KIB {
            return Err(CryptoError::InvalidParameter(format!(
                "memory cost {} KiB below floor of {} KiB",
                self.m_cost_kib,
                Self::MIN_M_COST_KIB
            )));
        }
        if self.t_cost < Self::MIN_T_COST {
            return Err(CryptoError::InvalidParameter(format!(
                "time cost {} below floor of {}",
                self.t_cost,
                Self::MIN_T_COST
            )));
        }
        if self.p_cost < Self::MIN_P_COST {
            return Err(CryptoError::InvalidParameter(format!(
                "parallelism {} below floor of {}",
                self.p_cost,
                Self::MIN_P_COST
            )));
        }
        Ok(())
    }
}

impl Default for PhParams {
    fn default() -> Self {
        Self::MODERATE
    }
}

/// Stretches `password` into a 32-byte base key with Argon2id.
///
/// The output is wiped when the returned buffer is dropped.
pub fn hash_password(
    password: &[u8],
    salt: &Salt,
    params: &PhParams,
) -> CryptoResult<Zeroizing<[u8; BASE_KEY_SIZE]>> {
    params.validate()?;

    let argon_params = Params::new(
        params.m_cost_kib,
        params.t_cost,
        params.p_cost,
        Some(BASE_KEY_SIZE),
    )
    .map_err(|e| CryptoError::InvalidParameter(format!("argon2 rejected parameters: {e}")))?;

    let argon2 = Argon2::new(ArgonAlgorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new([0u8; BASE_KEY_SIZE]);
    argon2
        .hash_password_into(password, salt.as_bytes(), &mut key[..])
        .map_err(|e| CryptoError::PrimitiveUnavailable(format!("argon2id failed: {e}")))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let salt = Salt::from_bytes([7u8; SALT_SIZE]);
        let a = hash_password(b"hunter2", &salt, &PhParams::INTERACTIVE).unwrap();
        let b = hash_password(b"hunter2", &salt, &PhParams::INTERACTIVE).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn different_salt_different_key() {
        let a = hash_password(
            b"hunter2",
            &Salt::from_bytes([1u8; SALT_SIZE]),
            &PhParams::INTERACTIVE,
        )
        .unwrap();
        let b = hash_password(
            b"hunter2",
            &Salt::from_bytes([2u8; SALT_SIZE]),
            &PhParams::INTERACTIVE,
        )
        .unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn text_and_bytes_agree() {
        let salt = Salt::from_bytes([9u8; SALT_SIZE]);
        let from_str = hash_password("pässword".as_bytes(), &salt, &PhParams::INTERACTIVE).unwrap();
        let from_bytes = hash_password(
            &[0x70, 0xc3, 0xa4, 0x73, 0x73, 0x77, 0x6f, 0x72, 0x64],
            &salt,
            &PhParams::INTERACTIVE,
        )
        .unwrap();
        assert_eq!(*from_str, *from_bytes);
    }

    #[test]
    fn below_floor_params_rejected() {
        let salt = Salt::from_bytes([0u8; SALT_SIZE]);
        let weak = PhParams {
            m_cost_kib: 1024,
            t_cost: 1,
            p_cost: 1,
        };
        let err = hash_password(b"pw", &salt, &weak).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidParameter(_)));

        let zero_time = PhParams {
            m_cost_kib: PhParams::MIN_M_COST_KIB,
            t_cost: 0,
            p_cost: 1,
        };
        assert!(zero_time.validate().is_err());
    }

    #[test]
    fn wrong_salt_length_rejected() {
        assert!(Salt::from_slice(&[0u8; 15]).is_err());
        assert!(Salt::from_slice(&[0u8; 17]).is_err());
        assert!(Salt::from_slice(&[0u8; SALT_SIZE]).is_ok());
    }

    #[test]
    fn presets_are_ordered_by_cost() {
        assert!(PhParams::INTERACTIVE.m_cost_kib < PhParams::MODERATE.m_cost_kib);
        assert!(PhParams::MODERATE.m_cost_kib < PhParams::SENSITIVE.m_cost_kib);
        PhParams::INTERACTIVE.validate().unwrap();
        PhParams::MODERATE.validate().unwrap();
        PhParams::SENSITIVE.validate().unwrap();
    }
}
