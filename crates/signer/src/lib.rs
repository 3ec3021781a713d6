//! # XRPL Signer
//!
//! Signs and verifies transactions built with `xrpl-core`.
//!
//! Signing walks a transaction through four states. `Unsigned` checks the required fields and
//! serializes the signing fields. `Prefixed` prepends the domain separator for single or
//! multi-signing. `Digested` holds the SHA-512-half digest. `Signed` holds the signature. Each
//! state can only be reached from the one before it, so a signature is never computed over
//! unprefixed or partially serialized data.
//!
//! Most callers want the functions in `sign`: `sign`, `multi_sign`, `combine` and `verify`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Curve backends: secp256k1 ECDSA and ed25519
pub mod curve;

/// The signing state machine
pub mod engine;

/// Private and public keys
pub mod keys;

/// Single- and multi-signing, and verification
pub mod sign;

pub use engine::*;
pub use keys::*;
pub use sign::*;

use thiserror::Error;
use xrpl_core::{enc::EncodingError, ser::SerError, types::AccountId};

/// Errors for this library
#[derive(Debug, Error)]
pub enum SignerError {
    /// The private key's tag byte names no supported algorithm
    #[error("Unsupported key type tag {0:#04x}")]
    UnsupportedKeyType(u8),

    /// Combining zero multi-signatures
    #[error("Cannot combine an empty signer list")]
    EmptySignerList,

    /// Two multi-signatures from the same account
    #[error("Duplicate signer {0}")]
    DuplicateSigner(AccountId),

    /// A field the operation requires is absent
    #[error("Missing required field {0}")]
    MissingField(&'static str),

    /// Key bytes that do not form a valid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A signature that does not verify, or does not parse
    #[error("Invalid signature")]
    InvalidSignature,

    /// A secp256k1 signature with a high S value
    #[error("Non-canonical signature")]
    NonCanonicalSignature,

    /// A `Signers` array not sorted strictly ascending by account
    #[error("Signers are not sorted by account")]
    NonCanonicalSignerOrder,

    /// Error bubbled up from the codec
    #[error(transparent)]
    SerError(#[from] SerError),

    /// Error bubbled up from the address codec
    #[error(transparent)]
    EncodingError(#[from] EncodingError),
}

/// `Result` alias for signer errors
pub type SignerResult<T> = Result<T, SignerError>;
