//! Error types for the Blowfish crate.

use thiserror::Error;

/// Errors produced by key setup and the byte-stream modes.
///
/// Every error aborts the whole call: no partial output is returned and no
/// half-initialized cipher is handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Key material is empty or longer than 56 bytes.
    #[error("key length {len} is outside 1..=56 bytes")]
    InvalidKeyLength { len: usize },

    /// Round count is zero, odd, or larger than 256.
    #[error("round count {rounds} must be even and between 2 and 256")]
    InvalidRounds { rounds: usize },

    /// A hexadecimal string had odd length or a non-hex digit.
    #[error("invalid hexadecimal input")]
    InvalidHexInput,

    /// Ciphertext is not block aligned, or too short to carry its IV block.
    #[error("ciphertext length {len} is not a valid padded length")]
    InvalidCiphertextLength { len: usize },

    /// The random IV could not be read.
    #[error("entropy source failed: {0}")]
    EntropySourceFailure(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Error::InvalidHexInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::InvalidKeyLength { len: 57 }.to_string(),
            "key length 57 is outside 1..=56 bytes"
        );
        assert_eq!(
            Error::InvalidCiphertextLength { len: 9 }.to_string(),
            "ciphertext length 9 is not a valid padded length"
        );
        assert_eq!(Error::InvalidHexInput.to_string(), "invalid hexadecimal input");
    }

    #[test]
    fn hex_errors_collapse() {
        let err: Error = hex::decode("abc").unwrap_err().into();
        assert_eq!(err, Error::InvalidHexInput);
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err, Error::InvalidHexInput);
    }
}
