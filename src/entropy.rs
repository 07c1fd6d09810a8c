//! Randomness for CBC initialization vectors.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Source of IV bytes. A failed read aborts the encryption that asked for
/// it; nothing falls back to a fixed IV.
pub trait EntropySource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system's random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::EntropySourceFailure(e.to_string()))
    }
}

/// Adapts any cryptographic `rand` generator, e.g. a seeded ChaCha for
/// reproducible tests.
#[derive(Debug)]
pub struct CryptoEntropy<R>(pub R);

impl<R: RngCore + CryptoRng> EntropySource for CryptoEntropy<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| Error::EntropySourceFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_fills() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsEntropy.fill(&mut a).unwrap();
        OsEntropy.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn adapts_rand_generators() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut first = CryptoEntropy(StdRng::seed_from_u64(7));
        let mut second = CryptoEntropy(StdRng::seed_from_u64(7));
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        first.fill(&mut a).unwrap();
        second.fill(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
