use xrpl_core::{
    definitions::TransactionType,
    hashes::Hash256,
    types::{AccountId, Amount, FieldValue, PathSet, StObject},
};

use crate::{CommonFields, Transaction, TxBuilder, TxError, TxResult};

/// Do not use the default path. Only the supplied paths are tried.
pub const TF_NO_DIRECT_RIPPLE: u32 = 0x0001_0000;
/// Deliver less than `Amount` rather than fail
pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;
/// Only take paths at or above the quality of `Amount / SendMax`
pub const TF_LIMIT_QUALITY: u32 = 0x0004_0000;

/// A payment of native or issued currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    common: CommonFields,
    destination: AccountId,
    amount: Amount,
    destination_tag: Option<u32>,
    send_max: Option<Amount>,
    deliver_min: Option<Amount>,
    invoice_id: Option<Hash256>,
    paths: Option<PathSet>,
}

impl Payment {
    /// The receiving account
    pub fn destination(&self) -> &AccountId {
        &self.destination
    }

    /// The amount to deliver
    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// The destination tag
    pub fn destination_tag(&self) -> Option<u32> {
        self.destination_tag
    }

    /// The most the sender is willing to spend
    pub fn send_max(&self) -> Option<&Amount> {
        self.send_max.as_ref()
    }

    /// The least a partial payment may deliver
    pub fn deliver_min(&self) -> Option<&Amount> {
        self.deliver_min.as_ref()
    }

    /// An arbitrary reference for the payment
    pub fn invoice_id(&self) -> Option<&Hash256> {
        self.invoice_id.as_ref()
    }

    /// Explicit paths
    pub fn paths(&self) -> Option<&PathSet> {
        self.paths.as_ref()
    }
}

impl Transaction for Payment {
    const TRANSACTION_TYPE: TransactionType = TransactionType::Payment;

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn write_specific(&self, fields: &mut StObject) -> TxResult<()> {
        fields.insert("Destination", self.destination)?;
        fields.insert("Amount", self.amount)?;
        if let Some(tag) = self.destination_tag {
            fields.insert("DestinationTag", tag)?;
        }
        if let Some(send_max) = self.send_max {
            fields.insert("SendMax", send_max)?;
        }
        if let Some(deliver_min) = self.deliver_min {
            fields.insert("DeliverMin", deliver_min)?;
        }
        if let Some(id) = self.invoice_id {
            fields.insert("InvoiceID", id)?;
        }
        if let Some(paths) = &self.paths {
            fields.insert("Paths", paths.clone())?;
        }
        Ok(())
    }

    fn read_specific(common: CommonFields, fields: &StObject) -> TxResult<Self> {
        let mut builder = PaymentBuilder {
            common,
            destination: fields.get_account("Destination").copied(),
            amount: fields.get_amount("Amount").copied(),
            destination_tag: fields.get_u32("DestinationTag"),
            send_max: fields.get_amount("SendMax").copied(),
            deliver_min: fields.get_amount("DeliverMin").copied(),
            invoice_id: None,
            paths: None,
        };
        if let Some(FieldValue::Hash256(id)) = fields.get("InvoiceID") {
            builder.invoice_id = Some(*id);
        }
        if let Some(FieldValue::PathSet(paths)) = fields.get("Paths") {
            builder.paths = Some(paths.clone());
        }
        builder.build()
    }
}

/// Accumulates a `Payment`.
#[derive(Clone, Debug)]
pub struct PaymentBuilder {
    common: CommonFields,
    destination: Option<AccountId>,
    amount: Option<Amount>,
    destination_tag: Option<u32>,
    send_max: Option<Amount>,
    deliver_min: Option<Amount>,
    invoice_id: Option<Hash256>,
    paths: Option<PathSet>,
}

impl PaymentBuilder {
    /// Start a payment from `account`
    pub fn new(account: AccountId) -> Self {
        Self {
            common: CommonFields::new(account),
            destination: None,
            amount: None,
            destination_tag: None,
            send_max: None,
            deliver_min: None,
            invoice_id: None,
            paths: None,
        }
    }

    /// Set the receiving account
    pub fn destination(mut self, destination: AccountId) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Set the amount to deliver
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the destination tag
    pub fn destination_tag(mut self, tag: u32) -> Self {
        self.destination_tag = Some(tag);
        self
    }

    /// Set the spending limit for a cross-currency payment
    pub fn send_max(mut self, send_max: Amount) -> Self {
        self.send_max = Some(send_max);
        self
    }

    /// Set the minimum delivery of a partial payment
    pub fn deliver_min(mut self, deliver_min: Amount) -> Self {
        self.deliver_min = Some(deliver_min);
        self
    }

    /// Set the invoice id
    pub fn invoice_id(mut self, id: Hash256) -> Self {
        self.invoice_id = Some(id);
        self
    }

    /// Set explicit paths
    pub fn paths(mut self, paths: PathSet) -> Self {
        self.paths = Some(paths);
        self
    }
}

fn is_positive(amount: &Amount) -> bool {
    match amount {
        Amount::Drops(d) => *d > 0,
        Amount::Issued(i) => !i.value.is_zero() && !i.value.is_negative(),
    }
}

impl TxBuilder for PaymentBuilder {
    type Transaction = Payment;

    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn build(self) -> TxResult<Payment> {
        let destination = self.destination.ok_or(TxError::MissingField("Destination"))?;
        let amount = self.amount.ok_or(TxError::MissingField("Amount"))?;
        if !is_positive(&amount) {
            return Err(TxError::InvalidField("Amount"));
        }
        if let Some(send_max) = &self.send_max {
            if !is_positive(send_max) {
                return Err(TxError::InvalidField("SendMax"));
            }
        }
        if let Some(deliver_min) = &self.deliver_min {
            if self.common.flag_bits() & TF_PARTIAL_PAYMENT == 0 || !is_positive(deliver_min) {
                return Err(TxError::InvalidField("DeliverMin"));
            }
        }
        Ok(Payment {
            common: self.common,
            destination,
            amount,
            destination_tag: self.destination_tag,
            send_max: self.send_max,
            deliver_min: self.deliver_min,
            invoice_id: self.invoice_id,
            paths: self.paths,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use xrpl_core::{binary, types::PathStep};

    fn alice() -> AccountId {
        "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse().unwrap()
    }

    fn bob() -> AccountId {
        "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS".parse().unwrap()
    }

    #[test]
    fn it_builds_a_native_payment() {
        let payment = PaymentBuilder::new(alice())
            .destination(bob())
            .amount(Amount::Drops(1_000))
            .fee(12)
            .sequence(1)
            .destination_tag(99)
            .build()
            .unwrap();
        let fields = payment.to_fields().unwrap();
        assert_eq!(fields.get_u16("TransactionType"), Some(0));
        assert_eq!(fields.get_account("Destination"), Some(&bob()));
        assert_eq!(fields.get_u32("DestinationTag"), Some(99));
        assert!(!fields.contains("SendMax"));
        assert_eq!(Payment::from_fields(&fields).unwrap(), payment);
    }

    #[test]
    fn it_carries_issued_amounts_and_paths() {
        let usd = Amount::issued("1.5", "USD", bob()).unwrap();
        let step = PathStep {
            account: Some(bob()),
            ..Default::default()
        };
        let payment = PaymentBuilder::new(alice())
            .destination(bob())
            .amount(usd)
            .send_max(Amount::Drops(2_000_000))
            .paths(PathSet(vec![vec![step]]))
            .invoice_id(Hash256::from([1u8; 32]))
            .fee(12)
            .sequence(3)
            .build()
            .unwrap();
        let fields = payment.to_fields().unwrap();
        let blob = binary::serialize(&fields, &binary::SerializeOptions::ALL).unwrap();
        let decoded = binary::deserialize(&blob).unwrap();
        assert_eq!(Payment::from_fields(&decoded).unwrap(), payment);
    }

    #[test]
    fn it_requires_destination_and_amount() {
        match PaymentBuilder::new(alice()).amount(Amount::Drops(1)).build() {
            Err(TxError::MissingField("Destination")) => {}
            other => panic!("expected MissingField, got {:?}", other),
        }
        match PaymentBuilder::new(alice()).destination(bob()).build() {
            Err(TxError::MissingField("Amount")) => {}
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_non_positive_amounts() {
        match PaymentBuilder::new(alice())
            .destination(bob())
            .amount(Amount::Drops(0))
            .build()
        {
            Err(TxError::InvalidField("Amount")) => {}
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn it_requires_the_partial_flag_for_deliver_min() {
        let builder = PaymentBuilder::new(alice())
            .destination(bob())
            .amount(Amount::Drops(1_000))
            .deliver_min(Amount::Drops(500));
        match builder.clone().build() {
            Err(TxError::InvalidField("DeliverMin")) => {}
            other => panic!("expected InvalidField, got {:?}", other),
        }
        let payment = builder.flags(TF_PARTIAL_PAYMENT).build().unwrap();
        assert_eq!(payment.deliver_min(), Some(&Amount::Drops(500)));
    }

    #[test]
    fn it_refuses_other_transaction_types() {
        let fields = StObject::new()
            .with("TransactionType", TransactionType::EscrowFinish.code())
            .unwrap();
        match Payment::from_fields(&fields) {
            Err(TxError::WrongTransactionType { got: 2, .. }) => {}
            other => panic!("expected WrongTransactionType, got {:?}", other),
        }
    }
}
