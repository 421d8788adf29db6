//! End-to-end cascade scenarios with pinned ciphertext lengths.
//!
//! The layer list fully determines the wire layout, so these tests pin the
//! exact byte counts a given configuration must produce.

use cascade_crypto::{Algorithm, Cascade, CryptoError, PhParams};

fn test_params() -> PhParams {
    // Floor-cost parameters keep the Argon2id work small in tests.
    PhParams {
        m_cost_kib: PhParams::MIN_M_COST_KIB,
        t_cost: 1,
        p_cost: 1,
    }
}

#[test]
fn single_layer_aes_gcm_hello_cascade() {
    let cascade = Cascade::new(vec![Algorithm::Aes256Gcm]).unwrap();
    let pk = cascade
        .derive_password_key(b"single-layer", &test_params(), None)
        .unwrap();
    let (mk, _) = cascade.generate_master_key(&pk).unwrap();

    let data = cascade.encrypt("Hello, Cascade!".as_bytes(), &mk).unwrap();
    // 12-byte nonce + 15 plaintext bytes + 16-byte tag.
    assert_eq!(data.ciphertext.len(), 12 + 15 + 16);
    assert_eq!(data.wrapped_content_key.len(), 32 + 12 + 16);

    let plaintext = cascade.decrypt(&data, &mk).unwrap();
    assert_eq!(plaintext, "Hello, Cascade!".as_bytes());
}

#[test]
fn two_layer_empty_plaintext() {
    let cascade = Cascade::new(vec![Algorithm::Aes256Gcm, Algorithm::XChaCha20Poly1305]).unwrap();
    let pk = cascade
        .derive_password_key(b"two-layer", &test_params(), None)
        .unwrap();
    let (mk, _) = cascade.generate_master_key(&pk).unwrap();

    let data = cascade.encrypt(b"", &mk).unwrap();
    // Inner AES-GCM frames the empty plaintext, outer XChaCha20 frames that.
    assert_eq!(data.ciphertext.len(), (0 + 16 + 12) + 16 + 24);

    let plaintext = cascade.decrypt(&data, &mk).unwrap();
    assert!(plaintext.is_empty());
}

#[test]
fn five_layer_all_aes_gcm() {
    let cascade = Cascade::new(vec![Algorithm::Aes256Gcm; 5]).unwrap();
    let pk = cascade
        .derive_password_key(b"five-layer", &test_params(), None)
        .unwrap();
    let (mk, _) = cascade.generate_master_key(&pk).unwrap();

    let data = cascade.encrypt(b"Five layers deep", &mk).unwrap();
    assert_eq!(data.ciphertext.len(), 16 + 5 * 28);
    assert_eq!(cascade.decrypt(&data, &mk).unwrap(), b"Five layers deep");

    let mut tampered = data.clone();
    let last = tampered.ciphertext.len() - 1;
    tampered.ciphertext[last] ^= 0x01;
    assert!(matches!(
        cascade.decrypt(&tampered, &mk),
        Err(CryptoError::WrongKeyOrTampered)
    ));
}

#[test]
fn expansion_matches_sum_of_layer_overheads() {
    let configs: [&[Algorithm]; 4] = [
        &[Algorithm::Aes256Gcm],
        &[Algorithm::XChaCha20Poly1305],
        &[Algorithm::Aes256CtrHmacSha256, Algorithm::Aes256Gcm],
        &[
            Algorithm::Aes256Gcm,
            Algorithm::XChaCha20Poly1305,
            Algorithm::Aes256CtrHmacSha256,
        ],
    ];

    for layers in configs {
        let cascade = Cascade::new(layers.to_vec()).unwrap();
        let pk = cascade
            .derive_password_key(b"expansion", &test_params(), None)
            .unwrap();
        let (mk, _) = cascade.generate_master_key(&pk).unwrap();

        let plaintext = vec![0x77u8; 257];
        let data = cascade.encrypt(&plaintext, &mk).unwrap();

        let overhead: usize = layers.iter().map(|l| l.overhead()).sum();
        assert_eq!(data.ciphertext.len(), plaintext.len() + overhead);
        assert_eq!(data.ciphertext.len(), cascade.encrypted_len(plaintext.len()));
        assert_eq!(data.wrapped_content_key.len(), cascade.wrapped_key_len());
    }
}

#[test]
fn max_depth_cascade_roundtrips() {
    let cascade = Cascade::new(vec![Algorithm::XChaCha20Poly1305; 10]).unwrap();
    let pk = cascade
        .derive_password_key(b"ten-deep", &test_params(), None)
        .unwrap();
    let (mk, _) = cascade.generate_master_key(&pk).unwrap();

    let data = cascade.encrypt(b"bounded worst case", &mk).unwrap();
    assert_eq!(cascade.decrypt(&data, &mk).unwrap(), b"bounded worst case");
}

#[test]
fn rejected_configurations() {
    assert!(matches!(
        Cascade::new(vec![]),
        Err(CryptoError::InvalidConfig("at least one layer"))
    ));
    assert!(matches!(
        Cascade::new(vec![Algorithm::Aes256Gcm; 11]),
        Err(CryptoError::InvalidConfig("at most 10 layers"))
    ));
}
