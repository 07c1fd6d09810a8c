use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::tables::{self, SBoxes, SeedTables};
use crate::transforms::{decipher, encipher};
use crate::{MAX_KEY_BYTES, MAX_ROUNDS};

/// Per-instance key schedule: the live round keys and the four key-dependent
/// substitution tables. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct CipherState {
    p: [u32; MAX_ROUNDS + 2],
    s: SBoxes,
    rounds: usize,
}

impl CipherState {
    /// The `rounds + 2` round keys in use.
    pub(crate) fn round_keys(&self) -> &[u32] {
        &self.p[..self.rounds + 2]
    }

    pub(crate) fn rounds(&self) -> usize {
        self.rounds
    }

    pub(crate) fn encipher(&self, l: u32, r: u32) -> (u32, u32) {
        encipher(self.round_keys(), &self.s, l, r)
    }

    pub(crate) fn decipher(&self, l: u32, r: u32) -> (u32, u32) {
        decipher(self.round_keys(), &self.s, l, r)
    }
}

pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() || key.len() > MAX_KEY_BYTES {
        return Err(Error::InvalidKeyLength { len: key.len() });
    }
    Ok(())
}

pub(crate) fn check_rounds(rounds: usize) -> Result<()> {
    if rounds == 0 || rounds % 2 == 1 || rounds > MAX_ROUNDS {
        return Err(Error::InvalidRounds { rounds });
    }
    Ok(())
}

/// Decodes a big-endian hexadecimal key such as `"FEDCBA9876543210"`,
/// two digits per byte.
pub(crate) fn parse_text_key(key: &str) -> Result<Zeroizing<Vec<u8>>> {
    Ok(Zeroizing::new(hex::decode(key)?))
}

/// Runs the Blowfish key expansion from the `seed` constants. `key` and
/// `rounds` must already have passed [`check_key`] and [`check_rounds`].
pub(crate) fn derive_state(key: &[u8], rounds: usize, seed: SeedTables) -> CipherState {
    let mut state = CipherState {
        p: *seed.round_keys(),
        s: *seed.sboxes(),
        rounds,
    };

    // short keys repeat
    let mut key_bytes = key.iter().cycle();
    for word in &mut state.p[..rounds + 2] {
        *word ^= key_bytes
            .by_ref()
            .take(4)
            .fold(0u32, |d, &b| d << 8 | u32::from(b));
    }

    let (mut l, mut r) = (0u32, 0u32);
    for i in (0..rounds + 2).step_by(2) {
        let (nl, nr) = state.encipher(l, r);
        l = nl;
        r = nr;
        state.p[i] = l;
        state.p[i + 1] = r;
    }
    for t in 0..4 {
        for i in (0..tables::SBOX_ENTRIES).step_by(2) {
            let (nl, nr) = state.encipher(l, r);
            l = nl;
            r = nr;
            state.s[t][i] = l;
            state.s[t][i + 1] = r;
        }
    }

    state
}
