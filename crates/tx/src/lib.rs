//! # XRPL Tx
//!
//! Typed builders for the transactions this workspace models: `Payment` and `EscrowFinish`.
//! Builders check cross-field rules when `build` is called, so an invalid transaction never
//! reaches the serializer. Every transaction converts to and from an `StObject`.
//!
//! ```
//! use xrpl_tx::prelude::*;
//! use xrpl_core::types::{AccountId, Amount};
//!
//! let account: AccountId = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse().unwrap();
//! let destination: AccountId = "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS".parse().unwrap();
//!
//! let payment = PaymentBuilder::new(account)
//!     .destination(destination)
//!     .amount(Amount::Drops(1_000_000))
//!     .fee(12)
//!     .sequence(1)
//!     .build()
//!     .unwrap();
//! let fields = payment.to_fields().unwrap();
//! assert_eq!(fields.get_u32("Sequence"), Some(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Fields shared by every transaction, and the builder trait
pub mod common;

/// PREIMAGE-SHA-256 crypto-conditions
pub mod condition;

/// Escrow finish
pub mod escrow;

/// Payment
pub mod payment;

/// Common imports
pub mod prelude;

use thiserror::Error;
use xrpl_core::{definitions::TransactionType, ser::SerError, types::StObject};

pub use common::*;
pub use condition::*;
pub use escrow::*;
pub use payment::*;

/// Errors for this library
#[derive(Debug, Error)]
pub enum TxError {
    /// A required field was never set
    #[error("Missing required field {0}")]
    MissingField(&'static str),

    /// A fulfillment was supplied without its condition
    #[error("If a fulfillment is specified, the corresponding condition must also be specified")]
    FulfillmentWithoutCondition,

    /// A condition was supplied without its fulfillment
    #[error("If a condition is specified, the corresponding fulfillment must also be specified")]
    ConditionWithoutFulfillment,

    /// The fee is below the minimum the transaction requires
    #[error("Fee of {fee} drops is below the minimum of {minimum}")]
    FeeTooLow {
        /// The supplied fee
        fee: u64,
        /// The minimum fee
        minimum: u64,
    },

    /// Fields of another transaction type
    #[error("Expected a {expected} transaction. Got type code {got}")]
    WrongTransactionType {
        /// The type being parsed
        expected: TransactionType,
        /// The type code found
        got: u16,
    },

    /// Crypto-condition DER that does not parse
    #[error("Malformed crypto-condition: {0}")]
    MalformedCondition(String),

    /// A field holding an unusable value
    #[error("Invalid value for {0}")]
    InvalidField(&'static str),

    /// Error bubbled up from the codec
    #[error(transparent)]
    SerError(#[from] SerError),
}

impl From<der::Error> for TxError {
    fn from(e: der::Error) -> Self {
        TxError::MalformedCondition(e.to_string())
    }
}

/// `Result` alias for transaction errors
pub type TxResult<T> = Result<T, TxError>;

/// A typed transaction.
pub trait Transaction: Sized {
    /// The transaction type
    const TRANSACTION_TYPE: TransactionType;

    /// The fields every transaction carries
    fn common(&self) -> &CommonFields;

    /// Insert the type-specific fields
    fn write_specific(&self, fields: &mut StObject) -> TxResult<()>;

    /// Parse the type-specific fields, and validate them against `common`
    fn read_specific(common: CommonFields, fields: &StObject) -> TxResult<Self>;

    /// The transaction as a field map, ready for signing
    fn to_fields(&self) -> TxResult<StObject> {
        let mut fields = StObject::new();
        fields.insert("TransactionType", Self::TRANSACTION_TYPE.code())?;
        self.common().write_fields(&mut fields)?;
        self.write_specific(&mut fields)?;
        Ok(fields)
    }

    /// Parse a field map, as decoded from a `tx_blob`
    fn from_fields(fields: &StObject) -> TxResult<Self> {
        let code = fields
            .get_u16("TransactionType")
            .ok_or(TxError::MissingField("TransactionType"))?;
        if code != Self::TRANSACTION_TYPE.code() {
            return Err(TxError::WrongTransactionType {
                expected: Self::TRANSACTION_TYPE,
                got: code,
            });
        }
        Self::read_specific(CommonFields::from_fields(fields)?, fields)
    }
}
