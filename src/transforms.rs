use byteorder::{BigEndian, ByteOrder};

use crate::tables::SBoxes;

/// Blowfish round function: the four bytes of `x`, most significant first,
/// index S0..S3 and are combined as `((S0 + S1) ^ S2) + S3`.
pub(crate) fn feistel(s: &SBoxes, x: u32) -> u32 {
    let a = s[0][(x >> 24) as usize];
    let b = s[1][(x >> 16 & 0xff) as usize];
    let c = s[2][(x >> 8 & 0xff) as usize];
    let d = s[3][(x & 0xff) as usize];
    (a.wrapping_add(b) ^ c).wrapping_add(d)
}

/// Enciphers the halves `(l, r)` with the round keys `p`, which hold
/// `rounds + 2` words.
pub(crate) fn encipher(p: &[u32], s: &SBoxes, mut l: u32, mut r: u32) -> (u32, u32) {
    let rounds = p.len() - 2;
    l ^= p[0];
    for i in (0..rounds).step_by(2) {
        r ^= feistel(s, l) ^ p[i + 1];
        l ^= feistel(s, r) ^ p[i + 2];
    }
    r ^= p[rounds + 1];
    (r, l)
}

/// Inverse of [`encipher`]: walks the round keys from high to low.
pub(crate) fn decipher(p: &[u32], s: &SBoxes, mut l: u32, mut r: u32) -> (u32, u32) {
    let rounds = p.len() - 2;
    l ^= p[rounds + 1];
    for i in (1..=rounds / 2).rev().map(|half| half * 2) {
        r ^= feistel(s, l) ^ p[i];
        l ^= feistel(s, r) ^ p[i - 1];
    }
    r ^= p[0];
    (r, l)
}

pub(crate) fn split_block(block: u64) -> (u32, u32) {
    ((block >> 32) as u32, block as u32)
}

pub(crate) fn join_block((l, r): (u32, u32)) -> u64 {
    u64::from(l) << 32 | u64::from(r)
}

pub(crate) fn read_halves(block: &[u8]) -> (u32, u32) {
    (BigEndian::read_u32(&block[..4]), BigEndian::read_u32(&block[4..8]))
}

pub(crate) fn write_halves(block: &mut [u8], (l, r): (u32, u32)) {
    BigEndian::write_u32(&mut block[..4], l);
    BigEndian::write_u32(&mut block[4..8], r);
}

pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
