use blowfish::block_cipher_trait::BlockCipher;
use blowfish::generic_array::GenericArray;
use blowfish::{Blowfish, SeedTables};

fn block_from_str(s: &str) -> u64 {
    u64::from_str_radix(s, 16).unwrap()
}

/// Runs every `KEY=`/`PT=`/`CT=` record in `vectors`, returning how many
/// were checked. `PT` and `KEY` carry over to later records until replaced.
fn check_vectors(vectors: &str) -> usize {
    let mut pt = None;
    let mut key = None;
    let mut checked = 0;
    for line in vectors.lines() {
        let mut parts = line.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("PT"), Some(v)) => pt = Some(block_from_str(v)),
            (Some("KEY"), Some(v)) => key = Some(v),
            (Some("CT"), Some(v)) => {
                let cipher = Blowfish::with_text_key(key.unwrap()).unwrap();
                let plain = pt.unwrap();
                let truth = block_from_str(v);
                let encrypted = cipher.encrypt_block(plain);
                let decrypted = cipher.decrypt_block(encrypted);
                assert_eq!(encrypted, truth, "key {}", key.unwrap());
                assert_eq!(decrypted, plain, "key {}", key.unwrap());
                checked += 1;
            }
            _ => {}
        }
    }
    checked
}

#[test]
fn standard_vectors() {
    assert_eq!(check_vectors(include_str!("ecb_vectors.txt")), 16);
}

#[test]
fn variable_key_length() {
    assert_eq!(check_vectors(include_str!("set_key_vectors.txt")), 8);
}

#[test]
fn zero_key_zero_block() {
    let cipher = Blowfish::with_key(&[0u8; 8]).unwrap();
    assert_eq!(cipher.encrypt_block(0), 0x4ef9_9745_6198_dd78);
}

#[test]
fn block_cipher_trait() {
    let key = hex::decode("FEDCBA9876543210").unwrap();
    let cipher = <Blowfish as BlockCipher>::new_varkey(&key).unwrap();
    let mut block = GenericArray::clone_from_slice(&hex::decode("0123456789ABCDEF").unwrap());
    BlockCipher::encrypt_block(&cipher, &mut block);
    assert_eq!(block.to_vec(), hex::decode("0ACEAB0FC6A0A28D").unwrap());
    BlockCipher::decrypt_block(&cipher, &mut block);
    assert_eq!(block.to_vec(), hex::decode("0123456789ABCDEF").unwrap());
}

#[test]
fn cbc_chaining() {
    // Schneier's CBC vector; the first three blocks are whole plaintext
    // blocks, so they are unaffected by the padding scheme.
    let mut cipher = Blowfish::with_text_key("0123456789ABCDEFF0E1D2C3B4A59687").unwrap();
    let iv = hex::decode("FEDCBA9876543210").unwrap();
    let mut iv_block = [0u8; 8];
    iv_block.copy_from_slice(&iv);
    cipher.set_iv(iv_block);

    let data = b"7654321 Now is the time for \0";
    let ct = cipher.encrypt_cbc(data).unwrap();
    assert_eq!(ct.len(), 8 + 32 + 8);
    assert_eq!(ct[..8], iv[..]);
    assert_eq!(
        ct[8..32],
        hex::decode("6B77B4D63006DEE605B156E27403979358DEB9E7154616D9").unwrap()[..]
    );
    assert_eq!(cipher.decrypt_cbc(&ct).unwrap(), &data[..]);
}

#[test]
fn stringmist_zero_key_zero_block() {
    let cipher = Blowfish::with_tables(&[0u8; 8], SeedTables::StringMist).unwrap();
    let encrypted = cipher.encrypt_block(0);
    assert_eq!(encrypted, 0x43d2_a740_286c_f52e);
    assert_eq!(cipher.decrypt_block(encrypted), 0);
}

#[test]
fn stringmist_plugin_ciphertext() {
    // 32-byte key 01..20, IV "StrMist!", as written by the plugin's build
    // step: one block less filler than this crate's own padding
    let key: Vec<u8> = (1..=32).collect();
    let ct = hex::decode(
        "5374724D6973742111819B8F284DFACA13D0F0EF1500BDD710F5E927ACB44655DDDFCB6A1CDD6569",
    )
    .unwrap();

    let pt = blowfish::decrypt_cbc_with_tables(&ct, &key, SeedTables::StringMist).unwrap();
    assert_eq!(pt, b"hello, obfuscated world");

    // the published constants do not recover it
    let wrong = blowfish::decrypt_cbc(&ct, &key).unwrap();
    assert_ne!(wrong, b"hello, obfuscated world");
}

#[test]
fn stringmist_round_trip() {
    let key: Vec<u8> = (1..=32).collect();
    let mut cipher = Blowfish::with_tables(&key, SeedTables::StringMist).unwrap();
    let ct = cipher.encrypt_cbc(b"round trip").unwrap();
    assert_eq!(
        blowfish::decrypt_cbc_with_tables(&ct, &key, SeedTables::StringMist).unwrap(),
        b"round trip"
    );
}
