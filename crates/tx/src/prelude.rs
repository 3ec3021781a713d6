pub use crate::{
    common::{CommonFields, Memo, TxBuilder},
    condition::{PreimageSha256Condition, PreimageSha256Fulfillment},
    escrow::{escrow_finish_fee, EscrowFinish, EscrowFinishBuilder},
    payment::{Payment, PaymentBuilder},
    Transaction, TxError, TxResult,
};
