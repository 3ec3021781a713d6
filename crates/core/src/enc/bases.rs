use bs58::{decode::Error as Bs58Error, Alphabet};

use crate::enc::{EncodingError, EncodingResult};

impl From<Bs58Error> for EncodingError {
    fn from(e: Bs58Error) -> Self {
        match e {
            Bs58Error::InvalidCharacter { character, .. } => {
                EncodingError::InvalidAlphabet(character)
            }
            Bs58Error::NonAsciiCharacter { .. } => EncodingError::InvalidAlphabet('?'),
            Bs58Error::InvalidChecksum { .. } | Bs58Error::NoChecksum => {
                EncodingError::ChecksumMismatch
            }
            other => EncodingError::InvalidFormat(other.to_string()),
        }
    }
}

/// Encode `version || payload` with a trailing double-SHA-256 checksum.
pub fn encode_base58check(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len());
    data.extend_from_slice(version);
    data.extend_from_slice(payload);
    bs58::encode(data)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check()
        .into_string()
}

/// Decode a checksummed string and return everything before the checksum.
pub fn decode_base58check(s: &str) -> EncodingResult<Vec<u8>> {
    Ok(bs58::decode(s)
        .with_alphabet(Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()?)
}

/// Decode a checksummed string, check its version prefix and payload length, and return the
/// payload.
pub fn decode_versioned(s: &str, version: &[u8], payload_len: usize) -> EncodingResult<Vec<u8>> {
    let data = decode_base58check(s)?;
    if data.len() != version.len() + payload_len {
        return Err(EncodingError::InvalidFormat(format!(
            "expected {} payload bytes, got {}",
            payload_len,
            data.len().saturating_sub(version.len())
        )));
    }
    if !data.starts_with(version) {
        return Err(EncodingError::InvalidFormat(format!(
            "unexpected version prefix {}",
            hex::encode_upper(&data[..version.len()])
        )));
    }
    Ok(data[version.len()..].to_vec())
}
