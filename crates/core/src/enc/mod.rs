//! Base58check encoding with the ledger's alphabet: classic addresses, seeds, public keys and
//! extended (X-) addresses.

use thiserror::Error;

/// Base58check plumbing
pub mod bases;

/// Classic account addresses and public keys
pub mod addresses;

/// Family seeds
pub mod seed;

/// Extended addresses, carrying a destination tag
pub mod xaddress;

pub use addresses::*;
pub use bases::*;
pub use seed::*;
pub use xaddress::*;

/// Errors encountered while decoding an encoded string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The trailing 4-byte checksum does not match the payload.
    #[error("Checksum mismatch")]
    ChecksumMismatch,

    /// A character outside the 58-character alphabet.
    #[error("Invalid character {0:?}")]
    InvalidAlphabet(char),

    /// A wrong version prefix, payload length, or payload layout.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// `Result` alias for encoding errors
pub type EncodingResult<T> = Result<T, EncodingError>;
