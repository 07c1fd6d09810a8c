//! Length-free padding.
//!
//! Encryption always appends at least one whole block of filler. The filler
//! byte is the last genuine byte XOR `0xCC`, so it is guaranteed to differ
//! from the byte it follows and decryption can find the boundary by scanning
//! backwards over the run of equal trailing bytes.
//!
//! No length is recorded anywhere. A decrypted buffer whose tail was not
//! written by [`pad`] (another padder, a wrong key) loses its final run of
//! equal bytes instead of being rejected. Existing ciphertexts depend on the
//! format, so it is kept as is.

use crate::BLOCK_SIZE;

/// XORed into the last genuine byte to produce the filler byte.
pub const PAD_MASK: u8 = 0xCC;

/// Copies `data` into a fresh block-aligned buffer followed by filler.
///
/// With `iv_slot` the buffer starts with an extra zeroed block that the
/// caller overwrites with the IV.
pub(crate) fn pad(data: &[u8], iv_slot: bool) -> Vec<u8> {
    let offset = if iv_slot { BLOCK_SIZE } else { 0 };
    let aligned = (data.len() + BLOCK_SIZE - 1) / BLOCK_SIZE * BLOCK_SIZE;
    let padded_len = offset + aligned + BLOCK_SIZE;

    let fill = data.last().copied().unwrap_or(0) ^ PAD_MASK;
    let mut buf = vec![fill; padded_len];
    for b in &mut buf[..offset] {
        *b = 0;
    }
    buf[offset..offset + data.len()].copy_from_slice(data);
    buf
}

/// Returns the logical length of a decrypted buffer: the index of the first
/// byte, scanning back from the end, that differs from the final byte.
///
/// The scan never moves below `floor`, which keeps it out of a leading IV
/// block.
pub(crate) fn unpad(buf: &[u8], floor: usize) -> usize {
    let last = match buf.last() {
        Some(&b) => b,
        None => return 0,
    };
    let mut end = buf.len();
    while end > floor && buf[end - 1] == last {
        end -= 1;
    }
    end
}
