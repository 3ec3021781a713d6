use std::fmt;

use zeroize::Zeroize;

use crate::{
    buffer::SecretBuffer,
    enc::{decode_base58check, encode_base58check, EncodingError, EncodingResult},
};

/// Version byte of secp256k1 family seeds (`s...`)
pub const SECP256K1_SEED_VERSION: [u8; 1] = [0x21];

/// Version prefix of ed25519 family seeds (`sEd...`)
pub const ED25519_SEED_VERSION: [u8; 3] = [0x01, 0xE1, 0x4B];

/// Seed entropy length in bytes
pub const SEED_LENGTH: usize = 16;

/// The signing algorithm a key or seed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// ECDSA over secp256k1
    Secp256k1,
    /// EdDSA over ed25519
    Ed25519,
}

impl KeyType {
    fn seed_version(&self) -> &'static [u8] {
        match self {
            KeyType::Secp256k1 => &SECP256K1_SEED_VERSION,
            KeyType::Ed25519 => &ED25519_SEED_VERSION,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Secp256k1 => f.write_str("secp256k1"),
            KeyType::Ed25519 => f.write_str("ed25519"),
        }
    }
}

/// Encode 16 bytes of seed entropy.
pub fn encode_seed(entropy: &[u8], key_type: KeyType) -> EncodingResult<String> {
    if entropy.len() != SEED_LENGTH {
        return Err(EncodingError::InvalidFormat(format!(
            "seed entropy is 16 bytes, got {}",
            entropy.len()
        )));
    }
    Ok(encode_base58check(key_type.seed_version(), entropy))
}

/// Decode a seed. The key type is recovered from the version prefix. The entropy is returned
/// in a `SecretBuffer`, and the intermediate decode buffer is zeroized.
pub fn decode_seed(s: &str) -> EncodingResult<(SecretBuffer, KeyType)> {
    let mut data = decode_base58check(s)?;
    let result = split_seed(&data);
    data.zeroize();
    result
}

fn split_seed(data: &[u8]) -> EncodingResult<(SecretBuffer, KeyType)> {
    for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
        let version = key_type.seed_version();
        if data.len() == version.len() + SEED_LENGTH && data.starts_with(version) {
            return Ok((SecretBuffer::new(&data[version.len()..]), key_type));
        }
    }
    Err(EncodingError::InvalidFormat(
        "not a secp256k1 or ed25519 seed".to_owned(),
    ))
}
