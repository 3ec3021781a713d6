//! Holds utilites for working with cryptographic digests, and disambiguating digests via marker
//! traits.
//!
//! Transaction IDs, signing digests and ledger object keys are all 32 bytes wide. Wrapping them
//! in marked newtypes prevents passing one where another is expected.

/// Marked hashes
pub mod marked;

/// The half-width SHA-512 digest used throughout the ledger protocol
pub mod half;

/// The 4-byte domain separators prepended before hashing
pub mod prefix;

pub use half::*;
pub use marked::*;
pub use prefix::*;
