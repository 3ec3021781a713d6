//! The two signature algorithms. Both take the 32-byte secret, never the tagged key.
//!
//! secp256k1 signs the 32-byte signing digest. ed25519 signs the full prefixed message, and
//! hashes it internally.

/// ECDSA over secp256k1
pub mod secp256k1;

/// EdDSA over ed25519
pub mod ed25519;
