use blowfish::{Blowfish, CryptoEntropy, EntropySource, Error};

struct Counter(u8);

impl EntropySource for Counter {
    fn fill(&mut self, dest: &mut [u8]) -> blowfish::Result<()> {
        for b in dest.iter_mut() {
            *b = self.0;
        }
        self.0 = self.0.wrapping_add(1);
        Ok(())
    }
}

#[test]
fn ecb_round_trip_lengths() {
    let cipher = Blowfish::with_key(b"ecb round trip").unwrap();
    for len in 0..40 {
        let data: Vec<u8> = (0..len as u8).collect();
        let ct = cipher.encrypt_ecb(&data);
        assert_eq!(ct.len() % 8, 0);
        assert!(ct.len() > data.len());
        assert_eq!(cipher.decrypt_ecb(&ct).unwrap(), data);
    }
}

#[test]
fn ecb_is_deterministic() {
    let cipher = Blowfish::with_key(b"same key").unwrap();
    let ct = cipher.encrypt_ecb(b"repeat!!repeat!!");
    assert_eq!(ct[..8], ct[8..16]);
    assert_eq!(ct, cipher.encrypt_ecb(b"repeat!!repeat!!"));
}

#[test]
fn ecb_rejects_partial_blocks() {
    let cipher = Blowfish::with_key(b"key").unwrap();
    let mut ct = cipher.encrypt_ecb(b"some data");
    ct.pop();
    assert_eq!(
        cipher.decrypt_ecb(&ct),
        Err(Error::InvalidCiphertextLength { len: 15 })
    );
}

#[test]
fn cbc_round_trip_lengths() {
    let mut cipher = Blowfish::with_key(b"cbc round trip").unwrap();
    for len in 0..40 {
        let data: Vec<u8> = (0..len as u8).rev().collect();
        let ct = cipher.encrypt_cbc(&data).unwrap();
        assert_eq!(ct.len() % 8, 0);
        assert!(ct.len() >= data.len() + 16);
        assert_eq!(cipher.decrypt_cbc(&ct).unwrap(), data);
    }
}

#[test]
fn cbc_fresh_iv_every_call() {
    let mut cipher = Blowfish::with_key(b"fresh").unwrap();
    let first = cipher.encrypt_cbc(b"same plaintext").unwrap();
    let second = cipher.encrypt_cbc(b"same plaintext").unwrap();
    assert_ne!(first, second);
    assert_ne!(first[..8], second[..8]);
}

#[test]
fn cbc_draws_from_injected_source() {
    let mut cipher = Blowfish::with_key(b"counter").unwrap();
    let mut source = Counter(1);
    let a = cipher.encrypt_cbc_with(b"x", &mut source).unwrap();
    let b = cipher.encrypt_cbc_with(b"x", &mut source).unwrap();
    assert_eq!(a[..8], [1u8; 8]);
    assert_eq!(b[..8], [2u8; 8]);
    assert_eq!(cipher.iv(), [2u8; 8]);
}

#[test]
fn cbc_reproducible_with_same_iv() {
    let mut cipher = Blowfish::with_key(b"same iv").unwrap();
    cipher.set_iv([7; 8]);
    let a = cipher.encrypt_cbc(b"payload").unwrap();
    cipher.set_iv([7; 8]);
    let b = cipher.encrypt_cbc(b"payload").unwrap();
    assert_eq!(a, b);
}

#[test]
fn cbc_with_seeded_rng() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut cipher = Blowfish::with_key(b"seeded").unwrap();
    let mut rng = CryptoEntropy(StdRng::seed_from_u64(42));
    let ct = cipher.encrypt_cbc_with(b"seeded data", &mut rng).unwrap();
    assert_eq!(cipher.decrypt_cbc(&ct).unwrap(), b"seeded data");
}

#[test]
fn cbc_rejects_bad_lengths() {
    let cipher = Blowfish::with_key(b"key").unwrap();
    assert_eq!(
        cipher.decrypt_cbc(&[0u8; 8]),
        Err(Error::InvalidCiphertextLength { len: 8 })
    );
    assert_eq!(
        cipher.decrypt_cbc(&[0u8; 20]),
        Err(Error::InvalidCiphertextLength { len: 20 })
    );
}

#[test]
fn tampered_iv_changes_first_block() {
    let mut cipher = Blowfish::with_key(b"tamper").unwrap();
    let mut ct = cipher.encrypt_cbc(b"ABCDEFGH12345678").unwrap();
    ct[0] ^= 0x01;
    let pt = cipher.decrypt_cbc(&ct).unwrap();
    assert_eq!(pt[0], b'A' ^ 0x01);
    assert_eq!(&pt[1..], b"BCDEFGH12345678");
}

#[test]
fn hex_api() {
    let mut cipher = Blowfish::with_text_key("FEDCBA9876543210").unwrap();
    cipher.set_iv([0xab; 8]);
    let encoded = cipher.encrypt_cbc_hex(b"BlowwFIshhhhhhhhhhh!").unwrap();
    assert!(encoded.starts_with("ABABABABABABABAB"));
    assert!(encoded.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    assert_eq!(encoded.len(), 2 * (8 + 24 + 8));

    assert_eq!(cipher.decrypt_cbc_hex(&encoded).unwrap(), b"BlowwFIshhhhhhhhhhh!");
    assert_eq!(
        cipher.decrypt_cbc_hex(&encoded.to_lowercase()).unwrap(),
        b"BlowwFIshhhhhhhhhhh!"
    );
    assert_eq!(
        cipher.decrypt_cbc_hex(&encoded[1..]),
        Err(Error::InvalidHexInput)
    );
}

#[test]
fn key_length_bounds() {
    assert_eq!(
        Blowfish::with_key(&[0u8; 57]).unwrap_err(),
        Error::InvalidKeyLength { len: 57 }
    );
    assert_eq!(
        Blowfish::with_key(&[]).unwrap_err(),
        Error::InvalidKeyLength { len: 0 }
    );
    assert!(Blowfish::with_key(&[0u8; 56]).is_ok());
    assert!(Blowfish::with_key(&[0u8; 1]).is_ok());
    assert_eq!(
        Blowfish::with_text_key("ABC").unwrap_err(),
        Error::InvalidHexInput
    );
    assert_eq!(
        Blowfish::with_text_key("").unwrap_err(),
        Error::InvalidKeyLength { len: 0 }
    );
}

#[test]
fn one_shot_decrypt() {
    let key = b"host supplied key";
    let mut cipher = Blowfish::with_key(key).unwrap();
    let ct = cipher.encrypt_cbc(b"from the host side").unwrap();
    assert_eq!(blowfish::decrypt_cbc(&ct, key).unwrap(), b"from the host side");
    assert_eq!(
        blowfish::decrypt_cbc(&ct, &[0u8; 60]),
        Err(Error::InvalidKeyLength { len: 60 })
    );
}

#[test]
fn instances_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Blowfish>();
}
