use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature, SigningKey, VerifyingKey,
};

use crate::{keys::PublicKey, SignerError, SignerResult};

fn signing_key(secret: &[u8; 32]) -> SignerResult<SigningKey> {
    SigningKey::from_slice(secret)
        .map_err(|_| SignerError::InvalidKey("secp256k1 secret out of range".to_owned()))
}

fn verifying_key(key: &PublicKey) -> SignerResult<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(key.as_bytes())
        .map_err(|_| SignerError::InvalidKey("not a secp256k1 point".to_owned()))
}

/// The compressed public key for a secret
pub fn public_key(secret: &[u8; 32]) -> SignerResult<PublicKey> {
    let key = signing_key(secret)?;
    let point = key.verifying_key().to_encoded_point(true);
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(point.as_bytes());
    Ok(PublicKey::from_array(bytes))
}

/// Check that the bytes are a compressed point on the curve
pub fn check_public_key(key: &PublicKey) -> SignerResult<()> {
    if !matches!(key.as_bytes()[0], 0x02 | 0x03) {
        return Err(SignerError::InvalidKey("not a compressed point".to_owned()));
    }
    verifying_key(key).map(|_| ())
}

/// Sign a 32-byte digest. The nonce is derived per RFC 6979, the signature is normalized to
/// low S and DER encoded.
pub fn sign_digest(secret: &[u8; 32], digest: &[u8; 32]) -> SignerResult<Vec<u8>> {
    let key = signing_key(secret)?;
    let signature: Signature = key
        .sign_prehash(digest)
        .map_err(|_| SignerError::InvalidSignature)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER signature over a 32-byte digest. High-S signatures are rejected.
pub fn verify_digest(key: &PublicKey, digest: &[u8; 32], der: &[u8]) -> SignerResult<()> {
    let signature = Signature::from_der(der).map_err(|_| SignerError::InvalidSignature)?;
    if signature.normalize_s().is_some() {
        return Err(SignerError::NonCanonicalSignature);
    }
    verifying_key(key)?
        .verify_prehash(digest, &signature)
        .map_err(|_| SignerError::InvalidSignature)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_signs_deterministically_with_low_s() {
        let secret = [0x11u8; 32];
        let digest = [0x22u8; 32];
        let a = sign_digest(&secret, &digest).unwrap();
        let b = sign_digest(&secret, &digest).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0], 0x30);

        let key = public_key(&secret).unwrap();
        verify_digest(&key, &digest, &a).unwrap();
        match verify_digest(&key, &[0x23u8; 32], &a) {
            Err(SignerError::InvalidSignature) => {}
            other => panic!("expected InvalidSignature, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_high_s() {
        let secret = [0x11u8; 32];
        let digest = [0x22u8; 32];
        let der = sign_digest(&secret, &digest).unwrap();
        let low = Signature::from_der(&der).unwrap();
        let (r, s) = low.split_scalars();
        let high = Signature::from_scalars(r, -*s).unwrap();
        let key = public_key(&secret).unwrap();
        match verify_digest(&key, &digest, high.to_der().as_bytes()) {
            Err(SignerError::NonCanonicalSignature) => {}
            other => panic!("expected NonCanonicalSignature, got {:?}", other),
        }
    }
}
