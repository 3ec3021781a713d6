//! The signing state machine: `Unsigned -> Prefixed -> Digested -> Signed`.

use tracing::trace;

use xrpl_core::{
    binary::serialize_for_signing,
    buffer::ByteBuffer,
    enc::KeyType,
    hashes::{sha512_half, Hash256, HashPrefix},
    types::{AccountId, StObject},
};

use crate::{
    curve,
    keys::{PrivateKey, PublicKey},
    SignerError, SignerResult,
};

/// A transaction whose required fields are present, with its signing fields serialized.
#[derive(Debug, Clone)]
pub struct Unsigned {
    fields: StObject,
    bytes: ByteBuffer,
}

/// Signing bytes behind a domain separator, and for multi-signing, followed by the signer's
/// account.
#[derive(Debug, Clone)]
pub struct Prefixed {
    fields: StObject,
    message: ByteBuffer,
}

/// A prefixed message and its SHA-512-half digest.
#[derive(Debug, Clone)]
pub struct Digested {
    fields: StObject,
    message: ByteBuffer,
    digest: Hash256,
}

/// A signature over a digested message.
#[derive(Debug, Clone)]
pub struct Signed {
    fields: StObject,
    public_key: PublicKey,
    signature: Vec<u8>,
}

impl Unsigned {
    /// Check the required fields and serialize the signing fields. Fails before any hashing
    /// if `TransactionType`, `Account`, `Fee`, or both of `Sequence` and `TicketSequence` are
    /// missing.
    pub fn new(fields: StObject) -> SignerResult<Self> {
        for name in ["TransactionType", "Account", "Fee"] {
            if !fields.contains(name) {
                return Err(SignerError::MissingField(name));
            }
        }
        if !fields.contains("Sequence") && !fields.contains("TicketSequence") {
            return Err(SignerError::MissingField("Sequence"));
        }
        let bytes = serialize_for_signing(&fields)?;
        Ok(Self { fields, bytes })
    }

    /// The serialized signing fields
    pub fn bytes(&self) -> &ByteBuffer {
        &self.bytes
    }

    /// Prepend a 4-byte hash prefix.
    pub fn prefix(self, prefix: HashPrefix) -> Prefixed {
        let mut message = ByteBuffer::of_bytes(&prefix.bytes());
        message.append_buffer(&self.bytes);
        Prefixed {
            fields: self.fields,
            message,
        }
    }

    /// Prepend the multi-signing prefix and append the signer's account.
    pub fn prefix_for_signer(self, signer: &AccountId) -> Prefixed {
        let mut prefixed = self.prefix(HashPrefix::TransactionMultiSign);
        prefixed.message.extend_from_slice(signer.as_bytes());
        prefixed
    }
}

impl Prefixed {
    /// The prefixed message
    pub fn message(&self) -> &ByteBuffer {
        &self.message
    }

    /// Compute the SHA-512-half digest of the message.
    pub fn digest(self) -> Digested {
        let digest = sha512_half(self.message.as_slice());
        trace!(digest = %digest, "computed signing digest");
        Digested {
            fields: self.fields,
            message: self.message,
            digest,
        }
    }
}

impl Digested {
    /// The signing digest
    pub fn digest(&self) -> Hash256 {
        self.digest
    }

    /// Sign with the algorithm named by the key's tag. secp256k1 signs the digest, ed25519
    /// signs the prefixed message.
    pub fn sign(self, key: &PrivateKey) -> SignerResult<Signed> {
        let key_type = key.key_type()?;
        let public_key = key.public_key()?;
        let secret = key.secret();
        let signature = match key_type {
            KeyType::Secp256k1 => curve::secp256k1::sign_digest(&secret, self.digest.as_bytes())?,
            KeyType::Ed25519 => curve::ed25519::sign_message(&secret, self.message.as_slice())?,
        };
        trace!(key_type = %key_type, "signed digest");
        Ok(Signed {
            fields: self.fields,
            public_key,
            signature,
        })
    }

    /// Verify a signature by `public_key` over this message.
    pub fn verify(&self, public_key: &PublicKey, signature: &[u8]) -> SignerResult<()> {
        match public_key.key_type() {
            KeyType::Secp256k1 => {
                curve::secp256k1::verify_digest(public_key, self.digest.as_bytes(), signature)
            }
            KeyType::Ed25519 => {
                curve::ed25519::verify_message(public_key, self.message.as_slice(), signature)
            }
        }
    }
}

impl Signed {
    /// The signing public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The signature bytes. DER for secp256k1, 64 raw bytes for ed25519.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Consume the state, returning the fields, public key and signature.
    pub fn into_parts(self) -> (StObject, PublicKey, Vec<u8>) {
        (self.fields, self.public_key, self.signature)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use xrpl_core::types::{Amount, Blob};

    fn minimal() -> StObject {
        StObject::new()
            .with("TransactionType", 0u16)
            .unwrap()
            .with(
                "Account",
                "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse::<AccountId>().unwrap(),
            )
            .unwrap()
            .with("Fee", Amount::Drops(12))
            .unwrap()
            .with("Sequence", 1u32)
            .unwrap()
    }

    #[test]
    fn it_fails_fast_on_missing_fields() {
        for name in ["TransactionType", "Account", "Fee"] {
            let mut fields = minimal();
            fields.remove(name);
            match Unsigned::new(fields) {
                Err(SignerError::MissingField(missing)) => assert_eq!(missing, name),
                other => panic!("expected MissingField, got {:?}", other),
            }
        }
        let mut fields = minimal();
        fields.remove("Sequence");
        assert!(matches!(Unsigned::new(fields.clone()), Err(SignerError::MissingField("Sequence"))));
        fields.insert("TicketSequence", 7u32).unwrap();
        assert!(Unsigned::new(fields).is_ok());
    }

    #[test]
    fn it_prefixes_single_and_multi_signing_data() {
        let unsigned = Unsigned::new(minimal()).unwrap();
        let body = unsigned.bytes().clone();

        let single = unsigned.clone().prefix(HashPrefix::TransactionSign);
        assert_eq!(&single.message().as_slice()[..4], b"STX\0");
        assert_eq!(&single.message().as_slice()[4..], body.as_slice());

        let signer: AccountId = "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS".parse().unwrap();
        let multi = unsigned.prefix_for_signer(&signer);
        let m = multi.message().as_slice();
        assert_eq!(&m[..4], b"SMT\0");
        assert_eq!(&m[m.len() - 20..], signer.as_bytes());

        let digested = multi.clone().digest();
        assert_eq!(digested.digest(), sha512_half(m));
    }

    #[test]
    fn it_excludes_signatures_from_the_signing_bytes() {
        let plain = Unsigned::new(minimal()).unwrap();
        let signed = Unsigned::new(
            minimal()
                .with("TxnSignature", Blob::new(vec![1, 2, 3]))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(plain.bytes(), signed.bytes());
    }
}
