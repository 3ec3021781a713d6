use std::fmt;

use crate::{
    defaults::{Network, DEFAULT_NETWORK},
    enc::{decode_account, decode_base58check, encode_account, encode_base58check},
    enc::{EncodingError, EncodingResult},
    types::AccountId,
};

const PAYLOAD_LENGTH: usize = 31;
const FLAG_NO_TAG: u8 = 0;
const FLAG_TAG: u8 = 1;

/// A decoded extended address: an account, an optional destination tag and a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedAddress {
    /// The account
    pub account: AccountId,
    /// The destination tag, if any
    pub tag: Option<u32>,
    /// The network the address is meant for
    pub network: Network,
}

impl ExtendedAddress {
    /// Assemble an extended address for the default network
    pub fn new(account: AccountId, tag: Option<u32>) -> Self {
        Self {
            account,
            tag,
            network: DEFAULT_NETWORK,
        }
    }

    /// True if the address is meant for a test network
    pub fn is_test(&self) -> bool {
        self.network.is_test()
    }
}

impl fmt::Display for ExtendedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_extended_address(
            &self.account,
            self.tag,
            self.network.is_test(),
        ))
    }
}

impl std::str::FromStr for ExtendedAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_extended_address(s)
    }
}

/// Encode an account and optional tag as an extended (X-) address.
///
/// The payload is the network prefix, the account, a tag flag, the tag as a little-endian
/// `u32`, and 4 reserved zero bytes.
pub fn encode_extended_address(account: &AccountId, tag: Option<u32>, is_test: bool) -> String {
    let network = if is_test {
        Network::Testnet
    } else {
        Network::Mainnet
    };
    let mut payload = Vec::with_capacity(PAYLOAD_LENGTH);
    payload.extend_from_slice(account.as_bytes());
    payload.push(if tag.is_some() { FLAG_TAG } else { FLAG_NO_TAG });
    payload.extend_from_slice(&tag.unwrap_or(0).to_le_bytes());
    payload.extend_from_slice(&[0u8; 4]);
    encode_base58check(&network.xaddress_prefix(), &payload)
}

/// Decode an extended (X-) address.
pub fn decode_extended_address(s: &str) -> EncodingResult<ExtendedAddress> {
    let data = decode_base58check(s)?;
    if data.len() != PAYLOAD_LENGTH {
        return Err(EncodingError::InvalidFormat(format!(
            "extended address payloads are 31 bytes, got {}",
            data.len()
        )));
    }
    let network = Network::from_xaddress_prefix(&data[..2]).ok_or_else(|| {
        EncodingError::InvalidFormat(format!(
            "unknown network prefix {}",
            hex::encode_upper(&data[..2])
        ))
    })?;
    let account = AccountId::from_slice(&data[2..22])
        .map_err(|e| EncodingError::InvalidFormat(e.to_string()))?;
    let mut tag_bytes = [0u8; 4];
    tag_bytes.copy_from_slice(&data[23..27]);
    let raw_tag = u32::from_le_bytes(tag_bytes);
    if data[27..] != [0u8; 4] {
        return Err(EncodingError::InvalidFormat(
            "reserved tag bytes are not zero".to_owned(),
        ));
    }
    let tag = match data[22] {
        FLAG_NO_TAG if raw_tag == 0 => None,
        FLAG_NO_TAG => {
            return Err(EncodingError::InvalidFormat(
                "tag present without the tag flag".to_owned(),
            ))
        }
        FLAG_TAG => Some(raw_tag),
        flag => {
            return Err(EncodingError::InvalidFormat(format!(
                "unknown tag flag {}",
                flag
            )))
        }
    };
    Ok(ExtendedAddress {
        account,
        tag,
        network,
    })
}

/// Convert a classic address and optional tag to an extended address.
pub fn classic_to_extended(classic: &str, tag: Option<u32>, is_test: bool) -> EncodingResult<String> {
    let account = decode_account(classic)?;
    Ok(encode_extended_address(&account, tag, is_test))
}

/// Convert an extended address back to its classic address, tag and network.
pub fn extended_to_classic(extended: &str) -> EncodingResult<(String, Option<u32>, Network)> {
    let decoded = decode_extended_address(extended)?;
    Ok((encode_account(&decoded.account), decoded.tag, decoded.network))
}

/// True if `s` decodes as an extended address.
pub fn is_valid_extended_address(s: &str) -> bool {
    decode_extended_address(s).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    const CLASSIC: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    #[test]
    fn it_encodes_extended_addresses() {
        let cases = [
            (None, false, "XV5kHfQmzDQjbFNv4jX3FX9Y7ig5QhpKGEFCq4mdLfhdxMq"),
            (Some(12345), false, "XV5kHfQmzDQjbFNv4jX3FX9Y7ig5Qh3NstjmNwF2okoHtjP"),
            (Some(12345), true, "TVeG6DZkiwxmsLrXeYEu5WuSxJDWud8Grh6DXihfQLCNxAz"),
            (Some(u32::MAX), false, "XV5kHfQmzDQjbFNv4jX3FX9Y7ig5QhByeFjtTknKR4fGf5S"),
        ];
        for case in cases.iter() {
            let x = classic_to_extended(CLASSIC, case.0, case.1).unwrap();
            assert_eq!(x, case.2);
            assert!(is_valid_extended_address(&x));

            let (classic, tag, network) = extended_to_classic(&x).unwrap();
            assert_eq!(classic, CLASSIC);
            assert_eq!(tag, case.0);
            assert_eq!(network.is_test(), case.1);

            let parsed: ExtendedAddress = x.parse().unwrap();
            assert_eq!(parsed.to_string(), x);
        }
    }

    #[test]
    fn it_distinguishes_zero_tags_from_no_tag() {
        let account = decode_account(CLASSIC).unwrap();
        let zero = encode_extended_address(&account, Some(0), false);
        let none = encode_extended_address(&account, None, false);
        assert_ne!(zero, none);
        assert_eq!(decode_extended_address(&zero).unwrap().tag, Some(0));
        assert_eq!(decode_extended_address(&none).unwrap().tag, None);
    }

    #[test]
    fn it_rejects_malformed_payloads() {
        let account = decode_account(CLASSIC).unwrap();
        let mut payload = account.as_bytes().to_vec();
        payload.extend_from_slice(&[0, 1, 0, 0, 0, 0, 0, 0, 0]);
        let tag_without_flag = encode_base58check(&[0x05, 0x44], &payload);

        let mut payload = account.as_bytes().to_vec();
        payload.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0, 0]);
        let unknown_flag = encode_base58check(&[0x05, 0x44], &payload);

        let mut payload = account.as_bytes().to_vec();
        payload.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 1]);
        let reserved_set = encode_base58check(&[0x05, 0x44], &payload);

        let mut payload = account.as_bytes().to_vec();
        payload.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let unknown_prefix = encode_base58check(&[0x05, 0x45], &payload);

        for bad in [tag_without_flag, unknown_flag, reserved_set, unknown_prefix, CLASSIC.to_owned()] {
            match decode_extended_address(&bad) {
                Err(EncodingError::InvalidFormat(_)) => {}
                other => panic!("expected InvalidFormat for {}, got {:?}", bad, other),
            }
            assert!(!is_valid_extended_address(&bad));
        }

        match decode_extended_address("XV5kHfQmzDQjbFNv4jX3FX9Y7ig5QhpKGEFCq4mdLfhdxMr") {
            Err(EncodingError::ChecksumMismatch) => {}
            other => panic!("expected ChecksumMismatch, got {:?}", other),
        }
    }
}
