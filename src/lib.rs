//! # Blowfish
//!
//! `blowfish-cipher` is an implementation of Bruce Schneier's
//! [Blowfish cipher](https://www.schneier.com/academic/blowfish/), a
//! 16-round Feistel network over 64-bit blocks with a key-dependent
//! schedule, for keys of 1 to 56 bytes.
//!
//! On top of the block transform it provides padded ECB and CBC modes over
//! arbitrary byte buffers. Padding fills with the last data byte XOR `0xCC`
//! and CBC output carries its random IV as the first block, which keeps it
//! interoperable with the widely copied public-domain C++ Blowfish class.
//! It is validated against Schneier's published test vectors.
//!
//! For easy interoperation with Rust crypto this crate implements
//! the `BlockCipher` trait from the `block-cipher-trait` crate.
//!
//! ```
//! let mut bf = blowfish::Blowfish::with_text_key("FEDCBA9876543210").unwrap();
//! let ciphertext = bf.encrypt_cbc(b"attack at dawn").unwrap();
//! assert_eq!(bf.decrypt_cbc(&ciphertext).unwrap(), b"attack at dawn");
//! ```

mod entropy;
mod error;
mod keys;
mod modes;
mod padding;
mod tables;
mod transforms;

pub use block_cipher_trait;
pub use block_cipher_trait::generic_array;
pub use generic_array::typenum;

pub use entropy::{CryptoEntropy, EntropySource, OsEntropy};
pub use error::{Error, Result};
pub use padding::PAD_MASK;
pub use tables::SeedTables;

use std::fmt;

use block_cipher_trait::{BlockCipher, InvalidKeyLength};
use generic_array::GenericArray;
use typenum::{U1, U56, U8};
use zeroize::Zeroize;

use transforms::{join_block, read_halves, split_block, write_halves};

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 8;
/// Standard round count.
pub const ROUNDS: usize = 16;
/// Largest supported round count; the seed tables run out beyond it.
pub const MAX_ROUNDS: usize = 256;
/// Longest accepted key.
pub const MAX_KEY_BYTES: usize = 56;

/// The Blowfish cipher instance
///
/// Owns one key schedule and one CBC IV slot. The schedule never changes
/// after construction. The IV is single use: every CBC encryption consumes
/// it, so the next one either gets a fresh [`set_iv`](Blowfish::set_iv) or
/// draws a random IV.
///
/// Key schedule and IV are wiped when the instance is dropped.
pub struct Blowfish {
    state: keys::CipherState,
    iv: [u8; BLOCK_SIZE],
    iv_set: bool,
}

impl Blowfish {
    /// Constructs a 16-round instance from 1 to 56 bytes of key material.
    pub fn with_key(key: &[u8]) -> Result<Blowfish> {
        Blowfish::with_rounds(key, ROUNDS)
    }

    /// Constructs an instance with a non-standard, even round count of at
    /// most [`MAX_ROUNDS`]. Only 16 rounds interoperate with other Blowfish
    /// implementations.
    pub fn with_rounds(key: &[u8], rounds: usize) -> Result<Blowfish> {
        Blowfish::build(key, rounds, SeedTables::Standard)
    }

    /// Constructs a 16-round instance whose key schedule starts from `seed`
    /// instead of the published constants.
    pub fn with_tables(key: &[u8], seed: SeedTables) -> Result<Blowfish> {
        Blowfish::build(key, ROUNDS, seed)
    }

    fn build(key: &[u8], rounds: usize, seed: SeedTables) -> Result<Blowfish> {
        keys::check_key(key)?;
        keys::check_rounds(rounds)?;
        Ok(Blowfish::from_state(keys::derive_state(key, rounds, seed)))
    }

    /// Constructs an instance from a hexadecimal key, two digits per byte,
    /// e.g. `"FEDCBA9876543210"`.
    pub fn with_text_key(key: &str) -> Result<Blowfish> {
        let binary_key = keys::parse_text_key(key)?;
        Blowfish::with_key(&binary_key)
    }

    fn from_state(state: keys::CipherState) -> Blowfish {
        Blowfish {
            state,
            iv: [0; BLOCK_SIZE],
            iv_set: false,
        }
    }

    /// Number of Feistel rounds this instance runs.
    pub fn rounds(&self) -> usize {
        self.state.rounds()
    }

    /// Easy encryption of a block stored in a big-endian 64-bit integer
    pub fn encrypt_block(&self, block: u64) -> u64 {
        let (l, r) = split_block(block);
        join_block(self.state.encipher(l, r))
    }

    /// Easy decryption of a block stored in a big-endian 64-bit integer
    pub fn decrypt_block(&self, block: u64) -> u64 {
        let (l, r) = split_block(block);
        join_block(self.state.decipher(l, r))
    }

    /// Pads `data` and encrypts every block independently.
    ///
    /// Identical plaintext blocks give identical ciphertext blocks; prefer
    /// CBC unless ECB is specifically required.
    pub fn encrypt_ecb(&self, data: &[u8]) -> Vec<u8> {
        modes::encrypt_ecb(&self.state, data)
    }

    /// Decrypts ECB output and strips its padding.
    pub fn decrypt_ecb(&self, data: &[u8]) -> Result<Vec<u8>> {
        modes::decrypt_ecb(&self.state, data)
    }

    /// CBC-encrypts `data` under the pending IV, or a fresh one from the
    /// operating system if none is set. The result starts with the IV block.
    pub fn encrypt_cbc(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_cbc_with(data, &mut OsEntropy)
    }

    /// Like [`encrypt_cbc`](Blowfish::encrypt_cbc), drawing a missing IV
    /// from `rng`.
    pub fn encrypt_cbc_with<E: EntropySource + ?Sized>(
        &mut self,
        data: &[u8],
        rng: &mut E,
    ) -> Result<Vec<u8>> {
        if !self.iv_set {
            self.set_random_iv_with(rng)?;
        }
        self.iv_set = false;
        Ok(modes::encrypt_cbc(&self.state, &self.iv, data))
    }

    /// Decrypts CBC output produced by [`encrypt_cbc`](Blowfish::encrypt_cbc).
    /// The IV is read from the first block; the IV slot is left alone.
    pub fn decrypt_cbc(&self, data: &[u8]) -> Result<Vec<u8>> {
        modes::decrypt_cbc(&self.state, data)
    }

    /// CBC-encrypts `data` and returns it as uppercase hex.
    pub fn encrypt_cbc_hex(&mut self, data: &[u8]) -> Result<String> {
        Ok(hex::encode_upper(self.encrypt_cbc(data)?))
    }

    /// Decrypts hex-encoded CBC output, upper or lower case.
    pub fn decrypt_cbc_hex(&self, data: &str) -> Result<Vec<u8>> {
        let binary = hex::decode(data)?;
        self.decrypt_cbc(&binary)
    }

    /// Uses `iv` for the next CBC encryption only.
    pub fn set_iv(&mut self, iv: [u8; BLOCK_SIZE]) {
        self.iv = iv;
        self.iv_set = true;
    }

    /// Draws the next CBC IV from the operating system.
    pub fn set_random_iv(&mut self) -> Result<()> {
        self.set_random_iv_with(&mut OsEntropy)
    }

    /// Draws the next CBC IV from `rng`.
    pub fn set_random_iv_with<E: EntropySource + ?Sized>(&mut self, rng: &mut E) -> Result<()> {
        let mut iv = [0u8; BLOCK_SIZE];
        rng.fill(&mut iv)?;
        self.set_iv(iv);
        Ok(())
    }

    /// The pending IV, or the one used by the last CBC encryption.
    pub fn iv(&self) -> [u8; BLOCK_SIZE] {
        self.iv
    }

    /// Whether an IV is waiting for the next CBC encryption.
    pub fn iv_is_set(&self) -> bool {
        self.iv_set
    }
}

impl fmt::Debug for Blowfish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blowfish")
            .field("rounds", &self.rounds())
            .field("iv_set", &self.iv_set)
            .finish()
    }
}

impl Drop for Blowfish {
    fn drop(&mut self) {
        self.iv.zeroize();
    }
}

/// Decrypts CBC `ciphertext` under a 16-round schedule for `key`, returning
/// the plaintext as a new buffer.
///
/// This is the one-shot entry point used by host applications that only ship
/// ciphertext and key across a foreign-function boundary.
pub fn decrypt_cbc(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    decrypt_cbc_with_tables(ciphertext, key, SeedTables::Standard)
}

/// Like [`decrypt_cbc`], with the key schedule seeded from `seed`.
pub fn decrypt_cbc_with_tables(
    ciphertext: &[u8],
    key: &[u8],
    seed: SeedTables,
) -> Result<Vec<u8>> {
    Blowfish::with_tables(key, seed)?.decrypt_cbc(ciphertext)
}

/// Implements BlockCipher with 448-bit keys as the fixed key length; shorter
/// keys go through `new_varkey`.
impl BlockCipher for Blowfish {
    type KeySize = U56;
    type BlockSize = U8;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U56>) -> Self {
        Blowfish::from_state(keys::derive_state(key, ROUNDS, SeedTables::Standard))
    }

    fn new_varkey(key: &[u8]) -> std::result::Result<Self, InvalidKeyLength> {
        Blowfish::with_key(key).map_err(|_| InvalidKeyLength)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let (l, r) = read_halves(block);
        write_halves(block, self.state.encipher(l, r));
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let (l, r) = read_halves(block);
        write_halves(block, self.state.decipher(l, r));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl EntropySource for Broken {
        fn fill(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::EntropySourceFailure("closed".into()))
        }
    }

    #[test]
    fn iv_is_consumed_by_encryption() {
        let mut bf = Blowfish::with_key(b"iv lifecycle").unwrap();
        assert!(!bf.iv_is_set());
        bf.set_iv([3; 8]);
        assert!(bf.iv_is_set());
        let ct = bf.encrypt_cbc(b"data").unwrap();
        assert_eq!(ct[..8], [3; 8]);
        assert!(!bf.iv_is_set());
        assert_eq!(bf.iv(), [3; 8]);
    }

    #[test]
    fn missing_iv_with_failing_source_aborts() {
        let mut bf = Blowfish::with_key(b"no entropy").unwrap();
        assert_eq!(
            bf.encrypt_cbc_with(b"data", &mut Broken),
            Err(Error::EntropySourceFailure("closed".into()))
        );
        assert!(!bf.iv_is_set());
    }

    #[test]
    fn explicit_iv_skips_the_source() {
        let mut bf = Blowfish::with_key(b"no entropy").unwrap();
        bf.set_iv([0; 8]);
        assert!(bf.encrypt_cbc_with(b"data", &mut Broken).is_ok());
    }

    #[test]
    fn block_trait_matches_u64_interface() {
        let bf = <Blowfish as BlockCipher>::new_varkey(b"trait key").unwrap();
        let mut block = GenericArray::clone_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        BlockCipher::encrypt_block(&bf, &mut block);
        let expected = bf.encrypt_block(0x0102_0304_0506_0708);
        assert_eq!(block.as_slice(), &expected.to_be_bytes());
        BlockCipher::decrypt_block(&bf, &mut block);
        assert_eq!(block.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn block_trait_rejects_bad_keys() {
        assert!(<Blowfish as BlockCipher>::new_varkey(&[]).is_err());
        assert!(<Blowfish as BlockCipher>::new_varkey(&[0; 57]).is_err());
        let key = GenericArray::clone_from_slice(&[0x42; 56]);
        let fixed = <Blowfish as BlockCipher>::new(&key);
        let var = Blowfish::with_key(&[0x42; 56]).unwrap();
        assert_eq!(fixed.encrypt_block(7), var.encrypt_block(7));
    }

    #[test]
    fn extended_rounds() {
        let standard = Blowfish::with_key(b"rounds").unwrap();
        let long = Blowfish::with_rounds(b"rounds", 32).unwrap();
        assert_eq!(long.rounds(), 32);
        let ct = long.encrypt_block(0xdead_beef_cafe_f00d);
        assert_ne!(ct, standard.encrypt_block(0xdead_beef_cafe_f00d));
        assert_eq!(long.decrypt_block(ct), 0xdead_beef_cafe_f00d);
        assert_eq!(
            Blowfish::with_rounds(b"rounds", 17).err(),
            Some(Error::InvalidRounds { rounds: 17 })
        );
    }
}
