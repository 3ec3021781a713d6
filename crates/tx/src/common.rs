use xrpl_core::{
    hashes::Hash256,
    types::{AccountId, Amount, Blob, FieldValue, StArray, StObject},
};

use crate::{Transaction, TxError, TxResult};

/// A memo attached to a transaction. Each part is arbitrary bytes. By convention the type and
/// format are UTF-8 text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memo {
    /// `MemoType`
    pub memo_type: Option<Vec<u8>>,
    /// `MemoData`
    pub memo_data: Option<Vec<u8>>,
    /// `MemoFormat`
    pub memo_format: Option<Vec<u8>>,
}

impl Memo {
    /// A memo carrying only data
    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            memo_data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Set the memo type
    pub fn with_type(mut self, memo_type: impl Into<Vec<u8>>) -> Self {
        self.memo_type = Some(memo_type.into());
        self
    }

    /// Set the memo format
    pub fn with_format(mut self, memo_format: impl Into<Vec<u8>>) -> Self {
        self.memo_format = Some(memo_format.into());
        self
    }

    fn to_object(&self) -> TxResult<StObject> {
        let mut memo = StObject::new();
        if let Some(t) = &self.memo_type {
            memo.insert("MemoType", Blob::from(&t[..]))?;
        }
        if let Some(d) = &self.memo_data {
            memo.insert("MemoData", Blob::from(&d[..]))?;
        }
        if let Some(f) = &self.memo_format {
            memo.insert("MemoFormat", Blob::from(&f[..]))?;
        }
        Ok(memo)
    }

    fn from_object(memo: &StObject) -> Self {
        let part = |name| memo.get_blob(name).map(|b| b.items().to_vec());
        Self {
            memo_type: part("MemoType"),
            memo_data: part("MemoData"),
            memo_format: part("MemoFormat"),
        }
    }
}

/// The fields every transaction carries.
///
/// `fee` is in drops. A transaction consuming a ticket keeps `sequence` at 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonFields {
    /// The sending account
    pub account: AccountId,
    /// The fee, in drops
    pub fee: u64,
    /// The account sequence number
    pub sequence: u32,
    /// Transaction flags. An explicit 0 is kept on the wire
    pub flags: Option<u32>,
    /// The last ledger this transaction may appear in
    pub last_ledger_sequence: Option<u32>,
    /// An arbitrary tag identifying the sender's reason or sub-account
    pub source_tag: Option<u32>,
    /// A ticket to consume instead of a sequence number
    pub ticket_sequence: Option<u32>,
    /// The public key that signs this transaction. Filled in by the signer when unset
    pub signing_public_key: Option<Vec<u8>>,
    /// Attached memos
    pub memos: Vec<Memo>,
    /// The chain this transaction is intended for
    pub network_id: Option<u32>,
    /// Only valid if the account's last transaction has this hash
    pub account_txn_id: Option<Hash256>,
}

impl CommonFields {
    /// Fields for `account`, with every optional field unset
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            fee: 0,
            sequence: 0,
            flags: None,
            last_ledger_sequence: None,
            source_tag: None,
            ticket_sequence: None,
            signing_public_key: None,
            memos: vec![],
            network_id: None,
            account_txn_id: None,
        }
    }

    /// Insert the common fields into a field map
    pub fn write_fields(&self, fields: &mut StObject) -> TxResult<()> {
        fields.insert("Account", self.account)?;
        fields.insert("Fee", Amount::Drops(fee_as_drops(self.fee)?))?;
        fields.insert("Sequence", self.sequence)?;
        if let Some(v) = self.flags {
            fields.insert("Flags", v)?;
        }
        if let Some(v) = self.last_ledger_sequence {
            fields.insert("LastLedgerSequence", v)?;
        }
        if let Some(v) = self.source_tag {
            fields.insert("SourceTag", v)?;
        }
        if let Some(v) = self.ticket_sequence {
            fields.insert("TicketSequence", v)?;
        }
        if let Some(key) = &self.signing_public_key {
            fields.insert("SigningPubKey", Blob::from(&key[..]))?;
        }
        if !self.memos.is_empty() {
            let mut memos = StArray::new();
            for memo in self.memos.iter() {
                memos.push("Memo", memo.to_object()?)?;
            }
            fields.insert("Memos", memos)?;
        }
        if let Some(v) = self.network_id {
            fields.insert("NetworkID", v)?;
        }
        if let Some(v) = self.account_txn_id {
            fields.insert("AccountTxnID", v)?;
        }
        Ok(())
    }

    /// The flags, or 0 when unset
    pub fn flag_bits(&self) -> u32 {
        self.flags.unwrap_or(0)
    }

    /// Read the common fields out of a field map
    pub fn from_fields(fields: &StObject) -> TxResult<Self> {
        let account = *fields
            .get_account("Account")
            .ok_or(TxError::MissingField("Account"))?;
        let fee = fields
            .get_amount("Fee")
            .ok_or(TxError::MissingField("Fee"))?
            .as_drops()
            .and_then(|d| u64::try_from(d).ok())
            .ok_or(TxError::InvalidField("Fee"))?;
        let memos = match fields.get_array("Memos") {
            Some(array) => array
                .elements()
                .iter()
                .map(|(_, memo)| Memo::from_object(memo))
                .collect(),
            None => vec![],
        };
        let account_txn_id = match fields.get("AccountTxnID") {
            Some(FieldValue::Hash256(h)) => Some(*h),
            _ => None,
        };
        Ok(Self {
            account,
            fee,
            sequence: fields.get_u32("Sequence").unwrap_or(0),
            flags: fields.get_u32("Flags"),
            last_ledger_sequence: fields.get_u32("LastLedgerSequence"),
            source_tag: fields.get_u32("SourceTag"),
            ticket_sequence: fields.get_u32("TicketSequence"),
            signing_public_key: fields.get_blob("SigningPubKey").map(|b| b.items().to_vec()),
            memos,
            network_id: fields.get_u32("NetworkID"),
            account_txn_id,
        })
    }
}

fn fee_as_drops(fee: u64) -> TxResult<i64> {
    i64::try_from(fee).map_err(|_| TxError::InvalidField("Fee"))
}

/// A builder-pattern interface for constructing transactions. Implementations accumulate
/// type-specific data through their own chained setters. The common fields are set through
/// the provided methods here, and `build()` checks the result before producing a
/// `Transaction`.
pub trait TxBuilder: Sized {
    /// The transaction type produced
    type Transaction: Transaction;

    /// Mutable access to the accumulated common fields
    fn common_mut(&mut self) -> &mut CommonFields;

    /// Set the fee, in drops
    fn fee(mut self, drops: u64) -> Self {
        self.common_mut().fee = drops;
        self
    }

    /// Set the account sequence number
    fn sequence(mut self, sequence: u32) -> Self {
        self.common_mut().sequence = sequence;
        self
    }

    /// Set the transaction flags
    fn flags(mut self, flags: u32) -> Self {
        self.common_mut().flags = Some(flags);
        self
    }

    /// Set the last ledger this transaction may appear in
    fn last_ledger_sequence(mut self, ledger: u32) -> Self {
        self.common_mut().last_ledger_sequence = Some(ledger);
        self
    }

    /// Set the source tag
    fn source_tag(mut self, tag: u32) -> Self {
        self.common_mut().source_tag = Some(tag);
        self
    }

    /// Consume a ticket. The sequence number is set to 0.
    fn ticket_sequence(mut self, ticket: u32) -> Self {
        let common = self.common_mut();
        common.ticket_sequence = Some(ticket);
        common.sequence = 0;
        self
    }

    /// Set the public key that will sign
    fn signing_public_key(mut self, key: &[u8]) -> Self {
        self.common_mut().signing_public_key = Some(key.to_vec());
        self
    }

    /// Attach a memo
    fn memo(mut self, memo: Memo) -> Self {
        self.common_mut().memos.push(memo);
        self
    }

    /// Set the network id
    fn network_id(mut self, network_id: u32) -> Self {
        self.common_mut().network_id = Some(network_id);
        self
    }

    /// Require the account's previous transaction to have this hash
    fn account_txn_id(mut self, id: Hash256) -> Self {
        self.common_mut().account_txn_id = Some(id);
        self
    }

    /// Check the accumulated data and produce the transaction
    fn build(self) -> TxResult<Self::Transaction>;
}
