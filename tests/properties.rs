//! Property-based round trips over keys, blocks and buffers.

use blowfish::Blowfish;
use proptest::prelude::*;

fn key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=56)
}

fn data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=100)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn block_round_trip(key in key(), block in any::<u64>()) {
        let cipher = Blowfish::with_key(&key).unwrap();
        let encrypted = cipher.encrypt_block(block);
        prop_assert_eq!(cipher.encrypt_block(block), encrypted);
        prop_assert_eq!(cipher.decrypt_block(encrypted), block);
    }

    #[test]
    fn ecb_round_trip(key in key(), data in data()) {
        let cipher = Blowfish::with_key(&key).unwrap();
        let ct = cipher.encrypt_ecb(&data);
        prop_assert_eq!(ct.len(), (data.len() / 8 + 1) * 8 + if data.len() % 8 == 0 { 0 } else { 8 });
        prop_assert_eq!(cipher.decrypt_ecb(&ct).unwrap(), data);
    }

    #[test]
    fn cbc_round_trip(key in key(), iv in any::<[u8; 8]>(), data in data()) {
        let mut cipher = Blowfish::with_key(&key).unwrap();
        cipher.set_iv(iv);
        let ct = cipher.encrypt_cbc(&data).unwrap();
        prop_assert_eq!(&ct[..8], &iv[..]);
        prop_assert_eq!(cipher.decrypt_cbc(&ct).unwrap(), data);
    }

    #[test]
    fn extended_rounds_round_trip(key in key(), half in 1usize..=128, block in any::<u64>()) {
        let cipher = Blowfish::with_rounds(&key, half * 2).unwrap();
        prop_assert_eq!(cipher.decrypt_block(cipher.encrypt_block(block)), block);
    }
}
