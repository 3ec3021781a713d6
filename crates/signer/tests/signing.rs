use xrpl_core::{
    binary,
    enc::KeyType,
    types::{AccountId, Amount, StArray},
};
use xrpl_signer::{multi_sign_all, sign, verify, PrivateKey, SignerError};
use xrpl_tx::prelude::*;

const LEDGER_TX: &str = "120000228000000024001F772E201B00C6848061400000003B9ACA0068400000000000000C732102356E89059A75438887F9FEE2056A2890DB82A68353BE9C0C0C8F89C0018B37FC74473045022100AA15E1F82455712B7D3CE138F6B913238CFBFF56DCB3E2DE39624EE4C639F190022003A04CE739D93DF23BB7F646E274191F550AC73975737FA5436BCF8FEF29E4DD8114F667B0CA50CC7709A220B0561B85E53A48461FA8831456BBB3839CED789D379033941D5610C65622B19D";

fn account(s: &str) -> AccountId {
    s.parse().unwrap()
}

fn key(key_type: KeyType, fill: u8) -> PrivateKey {
    PrivateKey::from_secret(key_type, &[fill; 32]).unwrap()
}

fn payment_from(sender: AccountId) -> Payment {
    PaymentBuilder::new(sender)
        .destination(account("r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS"))
        .amount(Amount::Drops(25_000_000))
        .fee(12)
        .sequence(4)
        .last_ledger_sequence(90_000_000)
        .build()
        .unwrap()
}

#[test]
fn it_verifies_a_transaction_from_the_ledger() {
    let fields = binary::deserialize_hex(LEDGER_TX).unwrap();
    verify(&fields).unwrap();

    let mut tampered = fields.clone();
    tampered.insert("Sequence", 2062127u32).unwrap();
    match verify(&tampered) {
        Err(SignerError::InvalidSignature) => {}
        other => panic!("expected InvalidSignature, got {:?}", other),
    }
}

#[test]
fn it_signs_builder_output_with_both_key_types() {
    for (key_type, fill) in [(KeyType::Secp256k1, 0x11u8), (KeyType::Ed25519, 0x22)] {
        let key = key(key_type, fill);
        let sender = key.public_key().unwrap().account_id();
        let payment = payment_from(sender);

        let signed = sign(&payment.to_fields().unwrap(), &key).unwrap();
        verify(signed.fields()).unwrap();

        let parsed = binary::deserialize_hex(signed.tx_blob()).unwrap();
        assert_eq!(&parsed, signed.fields());
        assert_eq!(binary::hash_transaction(&parsed).unwrap(), signed.hash());

        let round_trip = Payment::from_fields(&parsed).unwrap();
        assert_eq!(round_trip.destination(), payment.destination());
        assert_eq!(round_trip.amount(), payment.amount());
    }
}

#[test]
fn it_signs_deterministically_with_secp256k1() {
    let key = key(KeyType::Secp256k1, 0x33);
    let fields = payment_from(key.public_key().unwrap().account_id())
        .to_fields()
        .unwrap();
    let first = sign(&fields, &key).unwrap();
    let second = sign(&fields, &key).unwrap();
    assert_eq!(first.tx_blob(), second.tx_blob());
}

#[test]
fn it_multi_signs_in_canonical_order() {
    let keys = [
        key(KeyType::Secp256k1, 0x44),
        key(KeyType::Ed25519, 0x55),
        key(KeyType::Secp256k1, 0x66),
    ];
    let signers: Vec<(AccountId, &PrivateKey)> = keys
        .iter()
        .map(|k| (k.public_key().unwrap().account_id(), k))
        .collect();

    let sender = account("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe");
    let fields = payment_from(sender).to_fields().unwrap();
    let signed = multi_sign_all(&fields, &signers).unwrap();
    verify(signed.fields()).unwrap();

    let array = signed.fields().get_array("Signers").unwrap();
    assert_eq!(array.len(), 3);
    let accounts: Vec<AccountId> = array
        .elements()
        .iter()
        .map(|(_, s)| *s.get_account("Account").unwrap())
        .collect();
    let mut sorted = accounts.clone();
    sorted.sort();
    assert_eq!(accounts, sorted);
    assert!(signed.fields().get_blob("SigningPubKey").unwrap().is_empty());

    let mut reversed = StArray::new();
    for (wrapper, signer) in array.elements().iter().rev() {
        reversed.push(wrapper, signer.clone()).unwrap();
    }
    let mut shuffled = signed.fields().clone();
    shuffled.insert("Signers", reversed).unwrap();
    match verify(&shuffled) {
        Err(SignerError::NonCanonicalSignerOrder) => {}
        other => panic!("expected NonCanonicalSignerOrder, got {:?}", other),
    }
}

#[test]
fn it_refuses_to_sign_incomplete_transactions() {
    let key = key(KeyType::Ed25519, 0x77);
    let mut fields = payment_from(key.public_key().unwrap().account_id())
        .to_fields()
        .unwrap();
    fields.remove("Fee");
    match sign(&fields, &key) {
        Err(SignerError::MissingField("Fee")) => {}
        other => panic!("expected MissingField, got {:?}", other),
    }
}
