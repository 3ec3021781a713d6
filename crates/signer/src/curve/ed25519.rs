use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::{
    keys::{PublicKey, ED25519_TAG},
    SignerError, SignerResult,
};

fn verifying_key(key: &PublicKey) -> SignerResult<VerifyingKey> {
    let bytes = key.as_bytes();
    if bytes[0] != ED25519_TAG {
        return Err(SignerError::InvalidKey("missing the 0xED prefix".to_owned()));
    }
    let mut point = [0u8; 32];
    point.copy_from_slice(&bytes[1..]);
    VerifyingKey::from_bytes(&point)
        .map_err(|_| SignerError::InvalidKey("not an ed25519 point".to_owned()))
}

/// The prefixed public key for a secret
pub fn public_key(secret: &[u8; 32]) -> SignerResult<PublicKey> {
    let key = SigningKey::from_bytes(secret);
    let mut bytes = [0u8; 33];
    bytes[0] = ED25519_TAG;
    bytes[1..].copy_from_slice(key.verifying_key().as_bytes());
    Ok(PublicKey::from_array(bytes))
}

/// Check that the bytes are a prefixed point on the curve
pub fn check_public_key(key: &PublicKey) -> SignerResult<()> {
    verifying_key(key).map(|_| ())
}

/// Sign a message. Returns the 64-byte signature.
pub fn sign_message(secret: &[u8; 32], message: &[u8]) -> SignerResult<Vec<u8>> {
    let key = SigningKey::from_bytes(secret);
    Ok(key.sign(message).to_bytes().to_vec())
}

/// Verify a 64-byte signature over a message.
pub fn verify_message(key: &PublicKey, message: &[u8], signature: &[u8]) -> SignerResult<()> {
    let signature = Signature::from_slice(signature).map_err(|_| SignerError::InvalidSignature)?;
    verifying_key(key)?
        .verify_strict(message, &signature)
        .map_err(|_| SignerError::InvalidSignature)
}
