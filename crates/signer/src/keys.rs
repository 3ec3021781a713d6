use std::fmt;

use rand::RngCore;
use zeroize::Zeroizing;

use xrpl_core::{buffer::SecretBuffer, enc::KeyType, types::AccountId};

use crate::{curve, SignerError, SignerResult};

/// Tag byte of secp256k1 private keys
pub const SECP256K1_TAG: u8 = 0x00;

/// Tag byte of ed25519 keys, private and public
pub const ED25519_TAG: u8 = 0xED;

const SECRET_LENGTH: usize = 32;

/// A tagged private key: a tag byte followed by the 32-byte secret. The tag selects the
/// signing algorithm. The bytes live in a `SecretBuffer` and are destroyed when the key drops.
pub struct PrivateKey {
    secret: SecretBuffer,
}

impl PrivateKey {
    /// Wrap tagged key bytes. The tag is checked when the key is used.
    pub fn from_tagged_bytes(bytes: &[u8]) -> SignerResult<Self> {
        if bytes.len() != SECRET_LENGTH + 1 {
            return Err(SignerError::InvalidKey(format!(
                "tagged private keys are 33 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            secret: SecretBuffer::new(bytes),
        })
    }

    /// Tag a 32-byte secret for `key_type`. Fails if the secret is not a valid scalar.
    pub fn from_secret(key_type: KeyType, secret: &[u8]) -> SignerResult<Self> {
        if secret.len() != SECRET_LENGTH {
            return Err(SignerError::InvalidKey(format!(
                "secrets are 32 bytes, got {}",
                secret.len()
            )));
        }
        let mut tagged = Zeroizing::new([0u8; SECRET_LENGTH + 1]);
        tagged[0] = match key_type {
            KeyType::Secp256k1 => SECP256K1_TAG,
            KeyType::Ed25519 => ED25519_TAG,
        };
        tagged[1..].copy_from_slice(secret);
        let key = Self::from_tagged_bytes(&tagged[..])?;
        key.public_key()?;
        Ok(key)
    }

    /// Generate a fresh key from the OS random source.
    pub fn generate(key_type: KeyType) -> SignerResult<Self> {
        let mut rng = rand::rngs::OsRng;
        loop {
            let mut secret = Zeroizing::new([0u8; SECRET_LENGTH]);
            rng.fill_bytes(&mut secret[..]);
            match Self::from_secret(key_type, &secret[..]) {
                Err(SignerError::InvalidKey(_)) => continue,
                other => return other,
            }
        }
    }

    /// The algorithm named by the tag byte.
    pub fn key_type(&self) -> SignerResult<KeyType> {
        match self.secret.get(0)? {
            SECP256K1_TAG => Ok(KeyType::Secp256k1),
            ED25519_TAG => Ok(KeyType::Ed25519),
            tag => Err(SignerError::UnsupportedKeyType(tag)),
        }
    }

    /// The untagged 32-byte secret, in a zeroizing wrapper
    pub(crate) fn secret(&self) -> Zeroizing<[u8; SECRET_LENGTH]> {
        let mut out = Zeroizing::new([0u8; SECRET_LENGTH]);
        out.copy_from_slice(&self.secret.as_slice()[1..]);
        out
    }

    /// Derive the public key
    pub fn public_key(&self) -> SignerResult<PublicKey> {
        match self.key_type()? {
            KeyType::Secp256k1 => curve::secp256k1::public_key(&self.secret()),
            KeyType::Ed25519 => curve::ed25519::public_key(&self.secret()),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(redacted)")
    }
}

/// A 33-byte public key. Compressed SEC1 for secp256k1, `0xED` followed by the 32-byte point
/// for ed25519.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Parse and validate 33 public key bytes
    pub fn from_slice(bytes: &[u8]) -> SignerResult<Self> {
        if bytes.len() != 33 {
            return Err(SignerError::InvalidKey(format!(
                "public keys are 33 bytes, got {}",
                bytes.len()
            )));
        }
        let mut buf = [0u8; 33];
        buf.copy_from_slice(bytes);
        let key = Self(buf);
        match key.key_type() {
            KeyType::Secp256k1 => curve::secp256k1::check_public_key(&key)?,
            KeyType::Ed25519 => curve::ed25519::check_public_key(&key)?,
        }
        Ok(key)
    }

    pub(crate) fn from_array(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// The algorithm, read from the leading byte
    pub fn key_type(&self) -> KeyType {
        if self.0[0] == ED25519_TAG {
            KeyType::Ed25519
        } else {
            KeyType::Secp256k1
        }
    }

    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Upper-case hex, the form used in `SigningPubKey`
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// The account the key controls as its master key
    pub fn account_id(&self) -> AccountId {
        AccountId::from_public_key(&self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}
