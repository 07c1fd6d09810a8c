//! ECB and CBC drivers over padded byte streams.
//!
//! CBC output is `IV || C1 || C2 ...`: the IV travels in the clear as the
//! first ciphertext block and decryption reads it back from there.

use crate::error::{Error, Result};
use crate::keys::CipherState;
use crate::padding::{pad, unpad};
use crate::transforms::{read_halves, write_halves, xor_in_place};
use crate::BLOCK_SIZE;

/// Block transform selected once per driver call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Encipher,
    Decipher,
}

impl Direction {
    fn apply(self, state: &CipherState, block: &mut [u8]) {
        let (l, r) = read_halves(block);
        let out = match self {
            Direction::Encipher => state.encipher(l, r),
            Direction::Decipher => state.decipher(l, r),
        };
        write_halves(block, out);
    }
}

fn crypt_blocks(state: &CipherState, buf: &mut [u8], direction: Direction) {
    for block in buf.chunks_exact_mut(BLOCK_SIZE) {
        direction.apply(state, block);
    }
}

pub(crate) fn encrypt_ecb(state: &CipherState, data: &[u8]) -> Vec<u8> {
    let mut buf = pad(data, false);
    crypt_blocks(state, &mut buf, Direction::Encipher);
    buf
}

pub(crate) fn decrypt_ecb(state: &CipherState, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertextLength { len: data.len() });
    }
    let mut buf = data.to_vec();
    crypt_blocks(state, &mut buf, Direction::Decipher);
    let len = unpad(&buf, 0);
    buf.truncate(len);
    Ok(buf)
}

pub(crate) fn encrypt_cbc(state: &CipherState, iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Vec<u8> {
    let mut buf = pad(data, true);
    buf[..BLOCK_SIZE].copy_from_slice(iv);

    for start in (BLOCK_SIZE..buf.len()).step_by(BLOCK_SIZE) {
        let (done, rest) = buf.split_at_mut(start);
        let block = &mut rest[..BLOCK_SIZE];
        // chain against the previous ciphertext block, not the plaintext
        xor_in_place(block, &done[start - BLOCK_SIZE..]);
        Direction::Encipher.apply(state, block);
    }
    buf
}

pub(crate) fn decrypt_cbc(state: &CipherState, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 * BLOCK_SIZE || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertextLength { len: data.len() });
    }
    let mut buf = data.to_vec();
    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&buf[..BLOCK_SIZE]);

    for block in buf[BLOCK_SIZE..].chunks_exact_mut(BLOCK_SIZE) {
        // deciphering overwrites the block, keep its ciphertext for the next one
        let mut next_iv = [0u8; BLOCK_SIZE];
        next_iv.copy_from_slice(block);
        Direction::Decipher.apply(state, block);
        xor_in_place(block, &iv);
        iv = next_iv;
    }

    let end = unpad(&buf, BLOCK_SIZE);
    buf.truncate(end);
    buf.drain(..BLOCK_SIZE);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_state;
    use crate::tables::SeedTables;

    fn state() -> CipherState {
        derive_state(b"modes", 16, SeedTables::Standard)
    }

    #[test]
    fn ecb_blocks_are_independent() {
        let state = state();
        let ct = encrypt_ecb(&state, b"ABCDEFGHABCDEFGH");
        assert_eq!(ct.len(), 24);
        assert_eq!(ct[..8], ct[8..16]);
        assert_eq!(decrypt_ecb(&state, &ct).unwrap(), b"ABCDEFGHABCDEFGH");
    }

    #[test]
    fn ecb_rejects_unaligned() {
        let state = state();
        assert_eq!(
            decrypt_ecb(&state, &[0u8; 9]),
            Err(Error::InvalidCiphertextLength { len: 9 })
        );
        assert_eq!(
            decrypt_ecb(&state, &[]),
            Err(Error::InvalidCiphertextLength { len: 0 })
        );
    }

    #[test]
    fn cbc_layout() {
        let state = state();
        let iv = [9u8; 8];
        let ct = encrypt_cbc(&state, &iv, b"ABCDEFGHABCDEFGH");
        assert_eq!(ct.len(), 32);
        assert_eq!(ct[..8], iv);
        // chaining hides the repeated plaintext block
        assert_ne!(ct[8..16], ct[16..24]);
        assert_eq!(decrypt_cbc(&state, &ct).unwrap(), b"ABCDEFGHABCDEFGH");
    }

    #[test]
    fn cbc_first_block_matches_manual_chain() {
        let state = state();
        let iv = [0x5au8; 8];
        let ct = encrypt_cbc(&state, &iv, b"12345678");

        let mut block = *b"12345678";
        xor_in_place(&mut block, &iv);
        Direction::Encipher.apply(&state, &mut block);
        assert_eq!(ct[8..16], block);
    }

    #[test]
    fn cbc_rejects_short_or_unaligned() {
        let state = state();
        for &len in &[0usize, 8, 15, 17] {
            assert_eq!(
                decrypt_cbc(&state, &vec![0u8; len]),
                Err(Error::InvalidCiphertextLength { len })
            );
        }
    }

    #[test]
    fn cbc_empty_plaintext() {
        let state = state();
        let ct = encrypt_cbc(&state, &[1u8; 8], &[]);
        assert_eq!(ct.len(), 16);
        assert_eq!(decrypt_cbc(&state, &ct).unwrap(), Vec::<u8>::new());
    }
}
