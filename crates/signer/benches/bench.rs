use criterion::{criterion_group, criterion_main, Criterion};
use xrpl_core::{binary, enc::KeyType, types::{AccountId, Amount, StObject}};
use xrpl_signer::{sign, verify, PrivateKey};
use xrpl_tx::prelude::*;

fn payment(sender: AccountId) -> StObject {
    let destination: AccountId = "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS".parse().unwrap();
    PaymentBuilder::new(sender)
        .destination(destination)
        .amount(Amount::Drops(1_000_000))
        .fee(12)
        .sequence(1)
        .build()
        .unwrap()
        .to_fields()
        .unwrap()
}

pub fn bench_serialize(c: &mut Criterion) {
    let fields = payment("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse().unwrap());
    let blob = binary::serialize_hex(&fields).unwrap();

    c.bench_function("serialize_payment", |b| b.iter(|| binary::serialize_hex(&fields).unwrap()));
    c.bench_function("deserialize_payment", |b| b.iter(|| binary::deserialize_hex(&blob).unwrap()));
}

pub fn bench_sign(c: &mut Criterion) {
    for (name, key_type) in [("secp256k1", KeyType::Secp256k1), ("ed25519", KeyType::Ed25519)] {
        let key = PrivateKey::from_secret(key_type, &[7u8; 32]).unwrap();
        let fields = payment(key.public_key().unwrap().account_id());
        let signed = sign(&fields, &key).unwrap();

        c.bench_function(&format!("sign_{}", name), |b| b.iter(|| sign(&fields, &key).unwrap()));
        c.bench_function(&format!("verify_{}", name), |b| {
            b.iter(|| verify(signed.fields()).unwrap())
        });
    }
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = bench_serialize, bench_sign
}
criterion_main!(benches);
