//! # XRPL Core
//!
//! `xrpl-core` contains the canonical binary codec used by the `xrpl-signer` and `xrpl-tx`
//! crates.
//!
//! ## Crate Layout
//!
//! ### Buffer
//!
//! `ByteBuffer` is the growable, value-comparable byte sequence that every codec writes into.
//! It renders as upper-case hex and can be destroyed (zeroized) in place. `SecretBuffer` is a
//! scope guard that destroys its buffer when dropped, and holds all seed and key material.
//!
//! ### Definitions
//!
//! The `definitions` module is the static field table. Each field has a type code and a field
//! code, and the pair `(type code, field code)` defines the canonical order in which fields are
//! serialized. Getting the order wrong does not fail locally, it silently produces a different
//! hash, so the serializer always derives order from this table.
//!
//! ### Types
//!
//! One codec per protocol type, all implementing the `ByteFormat` trait from `ser`. The closed
//! `FieldValue` enum tags a value with its protocol type.
//!
//! ### Binary
//!
//! The table-driven serializer. It turns an `StObject` into canonical bytes and back, and
//! computes transaction hashes.
//!
//! ### Enc
//!
//! Base58check address encoding with the ledger's alphabet: classic account addresses, seeds,
//! public keys and extended (X-) addresses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[doc(hidden)]
pub use hex;

#[macro_use]
pub mod macros;

pub mod binary;
pub mod buffer;
pub mod defaults;
pub mod definitions;
pub mod enc;
pub mod hashes;
pub mod ser;
pub mod types;

pub use binary::*;
pub use buffer::*;
pub use definitions::{FieldDefinition, TypeCode};
pub use hashes::*;
pub use ser::*;
pub use types::*;
