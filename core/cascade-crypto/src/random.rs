//! Secure random byte generation.
//!
//! Wraps the OS entropy source (`/dev/urandom` on Unix, `BCryptGenRandom`
//! on Windows). Every failure surfaces as
//! [`CryptoError::RandomnessUnavailable`]; there is no fallback source.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};

/// Fills `dest` with cryptographically secure random bytes.
pub(crate) fn fill(dest: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|_| CryptoError::RandomnessUnavailable)
}

/// Generates a fixed-size array of random bytes.
pub(crate) fn array<const N: usize>() -> CryptoResult<[u8; N]> {
    let mut buf = [0u8; N];
    fill(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_produces_nonzero_distinct_buffers() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        fill(&mut a).unwrap();
        fill(&mut b).unwrap();

        assert!(!a.iter().all(|&x| x == 0));
        assert_ne!(a, b);
    }

    #[test]
    fn array_is_fresh_each_call() {
        let a: [u8; 16] = array().unwrap();
        let b: [u8; 16] = array().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_fill_is_a_no_op() {
        let mut empty: [u8; 0] = [];
        assert!(fill(&mut empty).is_ok());
    }
}
