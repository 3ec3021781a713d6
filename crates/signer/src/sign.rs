//! Single-signing, multi-signing and verification.

use tracing::debug;

use xrpl_core::{
    binary::{hash_transaction, serialize_hex},
    hashes::{Hash256, HashPrefix},
    types::{AccountId, Blob, StArray, StObject},
};

use crate::{
    engine::Unsigned,
    keys::{PrivateKey, PublicKey},
    SignerError, SignerResult,
};

/// A signed transaction: the final fields, the `tx_blob` to submit, and the transaction hash.
/// Only produced by signing, and immutable.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    fields: StObject,
    tx_blob: String,
    hash: Hash256,
}

impl SignedTransaction {
    fn new(fields: StObject) -> SignerResult<Self> {
        let tx_blob = serialize_hex(&fields)?;
        let hash = hash_transaction(&fields)?;
        debug!(hash = %hash, bytes = tx_blob.len() / 2, "assembled signed transaction");
        Ok(Self {
            fields,
            tx_blob,
            hash,
        })
    }

    /// The signed fields
    pub fn fields(&self) -> &StObject {
        &self.fields
    }

    /// The full serialization as upper-case hex
    pub fn tx_blob(&self) -> &str {
        &self.tx_blob
    }

    /// The transaction ID
    pub fn hash(&self) -> Hash256 {
        self.hash
    }
}

/// One multi-signature: a signature by `public_key` on behalf of `account`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    account: AccountId,
    public_key: PublicKey,
    signature: Vec<u8>,
}

impl Signer {
    /// The account signing
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// The key that produced the signature
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    fn to_object(&self) -> SignerResult<StObject> {
        Ok(StObject::new()
            .with("Account", self.account)?
            .with("SigningPubKey", Blob::from(&self.public_key.as_bytes()[..]))?
            .with("TxnSignature", Blob::from(self.signature.clone()))?)
    }
}

/// Sign `fields` with a single key. `SigningPubKey` and `TxnSignature` are set from the key
/// and the signature.
pub fn sign(fields: &StObject, key: &PrivateKey) -> SignerResult<SignedTransaction> {
    let public_key = key.public_key()?;
    let mut fields = fields.clone();
    fields.remove("TxnSignature");
    fields.remove("Signers");
    fields.insert("SigningPubKey", Blob::from(&public_key.as_bytes()[..]))?;

    let signed = Unsigned::new(fields)?
        .prefix(HashPrefix::TransactionSign)
        .digest()
        .sign(key)?;
    let (mut fields, _, signature) = signed.into_parts();
    fields.insert("TxnSignature", Blob::from(signature))?;
    SignedTransaction::new(fields)
}

fn multi_signing_fields(fields: &StObject) -> SignerResult<StObject> {
    let mut fields = fields.clone();
    fields.remove("TxnSignature");
    fields.remove("Signers");
    fields.insert("SigningPubKey", Blob::null())?;
    Ok(fields)
}

/// Produce one multi-signature on behalf of `signer_account`. The signing data has an empty
/// `SigningPubKey` and ends with the signer's account.
pub fn multi_sign(
    fields: &StObject,
    key: &PrivateKey,
    signer_account: &AccountId,
) -> SignerResult<Signer> {
    let signed = Unsigned::new(multi_signing_fields(fields)?)?
        .prefix_for_signer(signer_account)
        .digest()
        .sign(key)?;
    let (_, public_key, signature) = signed.into_parts();
    debug!(signer = %signer_account, "produced multi-signature");
    Ok(Signer {
        account: *signer_account,
        public_key,
        signature,
    })
}

/// Attach multi-signatures to `fields`. Signers are sorted ascending by account.
pub fn combine(fields: &StObject, mut signers: Vec<Signer>) -> SignerResult<SignedTransaction> {
    if signers.is_empty() {
        return Err(SignerError::EmptySignerList);
    }
    signers.sort_by(|a, b| a.account.cmp(&b.account));
    if let Some(pair) = signers.windows(2).find(|w| w[0].account == w[1].account) {
        return Err(SignerError::DuplicateSigner(pair[0].account));
    }

    let mut array = StArray::new();
    for signer in signers.iter() {
        array.push("Signer", signer.to_object()?)?;
    }
    let mut fields = multi_signing_fields(fields)?;
    fields.insert("Signers", array)?;
    debug!(signers = signers.len(), "combined multi-signatures");
    SignedTransaction::new(fields)
}

/// Multi-sign with every `(account, key)` pair and combine the results.
pub fn multi_sign_all(
    fields: &StObject,
    signers: &[(AccountId, &PrivateKey)],
) -> SignerResult<SignedTransaction> {
    let signatures = signers
        .iter()
        .map(|(account, key)| multi_sign(fields, key, account))
        .collect::<SignerResult<Vec<_>>>()?;
    combine(fields, signatures)
}

fn public_key_field(fields: &StObject) -> SignerResult<PublicKey> {
    let blob = fields
        .get_blob("SigningPubKey")
        .ok_or(SignerError::MissingField("SigningPubKey"))?;
    PublicKey::from_slice(blob.items())
}

fn signature_field(fields: &StObject) -> SignerResult<&Blob> {
    fields
        .get_blob("TxnSignature")
        .ok_or(SignerError::MissingField("TxnSignature"))
}

/// Verify a signed transaction, single- or multi-signed. Multi-signed transactions must list
/// their signers strictly ascending by account, and every signature must verify.
pub fn verify(fields: &StObject) -> SignerResult<()> {
    let signers = match fields.get_array("Signers") {
        None => {
            let public_key = public_key_field(fields)?;
            let signature = signature_field(fields)?;
            return Unsigned::new(fields.clone())?
                .prefix(HashPrefix::TransactionSign)
                .digest()
                .verify(&public_key, signature.items());
        }
        Some(signers) => signers,
    };

    if signers.is_empty() {
        return Err(SignerError::EmptySignerList);
    }
    if fields.get_blob("SigningPubKey").map_or(false, |b| !b.is_empty()) {
        return Err(SignerError::InvalidSignature);
    }
    let mut previous: Option<AccountId> = None;
    for (_, signer) in signers.elements() {
        let account = *signer
            .get_account("Account")
            .ok_or(SignerError::MissingField("Account"))?;
        if previous.map_or(false, |p| p >= account) {
            return Err(SignerError::NonCanonicalSignerOrder);
        }
        previous = Some(account);

        let public_key = public_key_field(signer)?;
        let signature = signature_field(signer)?;
        Unsigned::new(multi_signing_fields(fields)?)?
            .prefix_for_signer(&account)
            .digest()
            .verify(&public_key, signature.items())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use xrpl_core::{enc::KeyType, types::Amount};

    fn payment() -> StObject {
        StObject::new()
            .with("TransactionType", 0u16)
            .unwrap()
            .with(
                "Account",
                "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse::<AccountId>().unwrap(),
            )
            .unwrap()
            .with(
                "Destination",
                "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS".parse::<AccountId>().unwrap(),
            )
            .unwrap()
            .with("Amount", Amount::Drops(1_000_000))
            .unwrap()
            .with("Fee", Amount::Drops(12))
            .unwrap()
            .with("Sequence", 1u32)
            .unwrap()
    }

    #[test]
    fn it_signs_and_verifies_with_both_algorithms() {
        for key_type in [KeyType::Secp256k1, KeyType::Ed25519] {
            let key = PrivateKey::generate(key_type).unwrap();
            let signed = sign(&payment(), &key).unwrap();
            verify(signed.fields()).unwrap();
            assert_eq!(
                signed.fields().get_blob("SigningPubKey").unwrap().items(),
                &key.public_key().unwrap().as_bytes()[..]
            );

            let mut tampered = signed.fields().clone();
            tampered.insert("Amount", Amount::Drops(2_000_000)).unwrap();
            match verify(&tampered) {
                Err(SignerError::InvalidSignature) => {}
                other => panic!("expected InvalidSignature, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_rejects_unsupported_keys_before_signing() {
        let mut bytes = [9u8; 33];
        bytes[0] = 0x02;
        let key = PrivateKey::from_tagged_bytes(&bytes).unwrap();
        match sign(&payment(), &key) {
            Err(SignerError::UnsupportedKeyType(0x02)) => {}
            other => panic!("expected UnsupportedKeyType, got {:?}", other),
        }
    }

    #[test]
    fn it_requires_signers_to_combine() {
        match combine(&payment(), vec![]) {
            Err(SignerError::EmptySignerList) => {}
            other => panic!("expected EmptySignerList, got {:?}", other),
        }
        let key = PrivateKey::generate(KeyType::Ed25519).unwrap();
        let account = key.public_key().unwrap().account_id();
        let a = multi_sign(&payment(), &key, &account).unwrap();
        match combine(&payment(), vec![a.clone(), a]) {
            Err(SignerError::DuplicateSigner(dup)) => assert_eq!(dup, account),
            other => panic!("expected DuplicateSigner, got {:?}", other),
        }
    }
}
