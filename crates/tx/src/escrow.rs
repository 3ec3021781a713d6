use xrpl_core::{
    definitions::TransactionType,
    types::{AccountId, Blob, StObject},
};

use crate::{
    CommonFields, PreimageSha256Condition, PreimageSha256Fulfillment, Transaction, TxBuilder,
    TxError, TxResult,
};

/// The lowest fee, in drops, an escrow finish carrying a fulfillment may pay
pub const MIN_FULFILLMENT_FEE: u64 = 330;

/// The fee required to finish an escrow with `fulfillment`, given the ledger's base fee in
/// drops. `base + 320 + 10 * (cost / 16)`, with integer division.
pub fn escrow_finish_fee(base_fee: u64, fulfillment: &PreimageSha256Fulfillment) -> u64 {
    let fee = base_fee
        .saturating_add(320)
        .saturating_add((fulfillment.cost() / 16).saturating_mul(10));
    tracing::trace!(base_fee, cost = fulfillment.cost(), fee, "escrow finish fee");
    fee
}

/// Deliver the funds held in an escrow.
///
/// A conditional escrow needs both its condition and a matching fulfillment. Whether the
/// fulfillment actually satisfies the condition is checked by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscrowFinish {
    common: CommonFields,
    owner: AccountId,
    offer_sequence: u32,
    condition: Option<PreimageSha256Condition>,
    fulfillment: Option<PreimageSha256Fulfillment>,
}

impl EscrowFinish {
    /// The account that created the escrow
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// The sequence number of the escrow create transaction
    pub fn offer_sequence(&self) -> u32 {
        self.offer_sequence
    }

    /// The escrow's condition
    pub fn condition(&self) -> Option<&PreimageSha256Condition> {
        self.condition.as_ref()
    }

    /// The fulfillment of the condition
    pub fn fulfillment(&self) -> Option<&PreimageSha256Fulfillment> {
        self.fulfillment.as_ref()
    }
}

impl Transaction for EscrowFinish {
    const TRANSACTION_TYPE: TransactionType = TransactionType::EscrowFinish;

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn write_specific(&self, fields: &mut StObject) -> TxResult<()> {
        fields.insert("Owner", self.owner)?;
        fields.insert("OfferSequence", self.offer_sequence)?;
        if let Some(condition) = &self.condition {
            fields.insert("Condition", Blob::new(condition.to_der()?))?;
        }
        if let Some(fulfillment) = &self.fulfillment {
            fields.insert("Fulfillment", Blob::new(fulfillment.to_der()?))?;
        }
        Ok(())
    }

    fn read_specific(common: CommonFields, fields: &StObject) -> TxResult<Self> {
        let condition = fields
            .get_blob("Condition")
            .map(|b| PreimageSha256Condition::from_der(b.items()))
            .transpose()?;
        let fulfillment = fields
            .get_blob("Fulfillment")
            .map(|b| PreimageSha256Fulfillment::from_der(b.items()))
            .transpose()?;
        EscrowFinishBuilder {
            common,
            owner: fields.get_account("Owner").copied(),
            offer_sequence: fields.get_u32("OfferSequence"),
            condition,
            fulfillment,
        }
        .build()
    }
}

/// Accumulates an `EscrowFinish`. `build` enforces the condition and fulfillment pairing and
/// the minimum fee for a fulfillment.
#[derive(Clone, Debug)]
pub struct EscrowFinishBuilder {
    common: CommonFields,
    owner: Option<AccountId>,
    offer_sequence: Option<u32>,
    condition: Option<PreimageSha256Condition>,
    fulfillment: Option<PreimageSha256Fulfillment>,
}

impl EscrowFinishBuilder {
    /// Start an escrow finish submitted by `account`
    pub fn new(account: AccountId) -> Self {
        Self {
            common: CommonFields::new(account),
            owner: None,
            offer_sequence: None,
            condition: None,
            fulfillment: None,
        }
    }

    /// Set the escrow owner
    pub fn owner(mut self, owner: AccountId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the sequence number of the escrow create transaction
    pub fn offer_sequence(mut self, sequence: u32) -> Self {
        self.offer_sequence = Some(sequence);
        self
    }

    /// Set the escrow's condition
    pub fn condition(mut self, condition: PreimageSha256Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the fulfillment
    pub fn fulfillment(mut self, fulfillment: PreimageSha256Fulfillment) -> Self {
        self.fulfillment = Some(fulfillment);
        self
    }

    /// Set the fulfillment along with the condition it derives, and a fee of
    /// `escrow_finish_fee(base_fee, ..)`
    pub fn fulfill(self, base_fee: u64, fulfillment: PreimageSha256Fulfillment) -> Self {
        let fee = escrow_finish_fee(base_fee, &fulfillment);
        self.condition(fulfillment.condition())
            .fulfillment(fulfillment)
            .fee(fee)
    }
}

impl TxBuilder for EscrowFinishBuilder {
    type Transaction = EscrowFinish;

    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn build(self) -> TxResult<EscrowFinish> {
        let owner = self.owner.ok_or(TxError::MissingField("Owner"))?;
        let offer_sequence = self
            .offer_sequence
            .ok_or(TxError::MissingField("OfferSequence"))?;

        if self.fulfillment.is_some() {
            if self.condition.is_none() {
                return Err(TxError::FulfillmentWithoutCondition);
            }
            if self.common.fee < MIN_FULFILLMENT_FEE {
                return Err(TxError::FeeTooLow {
                    fee: self.common.fee,
                    minimum: MIN_FULFILLMENT_FEE,
                });
            }
        }
        if self.condition.is_some() && self.fulfillment.is_none() {
            return Err(TxError::ConditionWithoutFulfillment);
        }

        Ok(EscrowFinish {
            common: self.common,
            owner,
            offer_sequence,
            condition: self.condition,
            fulfillment: self.fulfillment,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn alice() -> AccountId {
        "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse().unwrap()
    }

    fn base() -> EscrowFinishBuilder {
        EscrowFinishBuilder::new(alice())
            .owner(alice())
            .offer_sequence(7)
            .sequence(8)
    }

    #[test]
    fn it_computes_the_fulfillment_fee() {
        let fulfillment = PreimageSha256Fulfillment::new(vec![0u8; 32]);
        assert_eq!(escrow_finish_fee(10, &fulfillment), 350);
        assert_eq!(escrow_finish_fee(10, &PreimageSha256Fulfillment::new(vec![0u8; 15])), 330);
        assert_eq!(escrow_finish_fee(12, &PreimageSha256Fulfillment::new(vec![0u8; 47])), 352);
    }

    #[test]
    fn it_builds_an_unconditional_finish() {
        let finish = base().fee(10).build().unwrap();
        let fields = finish.to_fields().unwrap();
        assert_eq!(fields.get_u16("TransactionType"), Some(2));
        assert_eq!(fields.get_u32("OfferSequence"), Some(7));
        assert!(!fields.contains("Condition"));
        assert_eq!(EscrowFinish::from_fields(&fields).unwrap(), finish);
    }

    #[test]
    fn it_builds_a_conditional_finish() {
        let fulfillment = PreimageSha256Fulfillment::new(b"open sesame".to_vec());
        let finish = base().fulfill(10, fulfillment.clone()).build().unwrap();
        assert_eq!(finish.common().fee, 330);
        assert_eq!(finish.fulfillment(), Some(&fulfillment));

        let fields = finish.to_fields().unwrap();
        assert_eq!(
            fields.get_blob("Fulfillment").unwrap().items(),
            &fulfillment.to_der().unwrap()[..]
        );
        assert_eq!(EscrowFinish::from_fields(&fields).unwrap(), finish);
    }

    #[test]
    fn it_rejects_a_condition_without_fulfillment() {
        let condition = PreimageSha256Fulfillment::new(vec![1u8; 32]).condition();
        match base().fee(400).condition(condition).build() {
            Err(TxError::ConditionWithoutFulfillment) => {}
            other => panic!("expected ConditionWithoutFulfillment, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_a_fulfillment_without_condition() {
        let fulfillment = PreimageSha256Fulfillment::new(vec![1u8; 32]);
        match base().fee(400).fulfillment(fulfillment).build() {
            Err(TxError::FulfillmentWithoutCondition) => {}
            other => panic!("expected FulfillmentWithoutCondition, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_a_low_fee_with_fulfillment() {
        let fulfillment = PreimageSha256Fulfillment::new(vec![1u8; 32]);
        let builder = base()
            .condition(fulfillment.condition())
            .fulfillment(fulfillment);
        match builder.clone().fee(329).build() {
            Err(TxError::FeeTooLow { fee: 329, minimum: 330 }) => {}
            other => panic!("expected FeeTooLow, got {:?}", other),
        }
        assert!(builder.fee(330).build().is_ok());
    }

    #[test]
    fn it_requires_owner_and_offer_sequence() {
        match EscrowFinishBuilder::new(alice()).offer_sequence(1).build() {
            Err(TxError::MissingField("Owner")) => {}
            other => panic!("expected MissingField, got {:?}", other),
        }
        match EscrowFinishBuilder::new(alice()).owner(alice()).build() {
            Err(TxError::MissingField("OfferSequence")) => {}
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn it_validates_parsed_fields_too() {
        let fulfillment = PreimageSha256Fulfillment::new(vec![1u8; 32]);
        let finish = base().fulfill(10, fulfillment).build().unwrap();
        let mut fields = finish.to_fields().unwrap();
        fields.remove("Condition");
        match EscrowFinish::from_fields(&fields) {
            Err(TxError::FulfillmentWithoutCondition) => {}
            other => panic!("expected FulfillmentWithoutCondition, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn fulfilled_builders_always_pay_enough(len in 0usize..2048, base_fee in 0u64..1_000) {
            let fulfillment = PreimageSha256Fulfillment::new(vec![0x5a; len]);
            let finish = base().fulfill(base_fee, fulfillment).build().unwrap();
            prop_assert!(finish.common().fee >= MIN_FULFILLMENT_FEE);
            prop_assert_eq!(finish.common().fee, base_fee + 320 + 10 * (len as u64 / 16));
        }
    }
}
