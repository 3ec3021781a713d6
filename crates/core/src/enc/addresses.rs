use crate::{
    enc::{decode_versioned, encode_base58check, EncodingError, EncodingResult},
    types::AccountId,
};

/// Version byte of classic account addresses
pub const ACCOUNT_ID_VERSION: [u8; 1] = [0x00];

/// Version byte of node (validator) public keys
pub const NODE_PUBLIC_KEY_VERSION: [u8; 1] = [0x1C];

/// Version byte of account public keys
pub const ACCOUNT_PUBLIC_KEY_VERSION: [u8; 1] = [0x23];

const PUBLIC_KEY_LENGTH: usize = 33;

/// Encode an account as a classic `r...` address.
///
/// ```
/// use xrpl_core::{enc::encode_account, types::AccountId};
///
/// assert_eq!(encode_account(&AccountId::new([0; 20])), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
/// ```
pub fn encode_account(account: &AccountId) -> String {
    encode_base58check(&ACCOUNT_ID_VERSION, account.as_bytes())
}

/// Decode a classic `r...` address.
pub fn decode_account(s: &str) -> EncodingResult<AccountId> {
    let payload = decode_versioned(s, &ACCOUNT_ID_VERSION, AccountId::LENGTH)?;
    AccountId::from_slice(&payload).map_err(|e| EncodingError::InvalidFormat(e.to_string()))
}

/// True if `s` decodes as a classic address.
pub fn is_valid_classic_address(s: &str) -> bool {
    decode_account(s).is_ok()
}

/// Encode a 33-byte node public key (`n...`).
pub fn encode_node_public_key(key: &[u8]) -> EncodingResult<String> {
    check_public_key_length(key)?;
    Ok(encode_base58check(&NODE_PUBLIC_KEY_VERSION, key))
}

/// Decode a node public key.
pub fn decode_node_public_key(s: &str) -> EncodingResult<Vec<u8>> {
    decode_versioned(s, &NODE_PUBLIC_KEY_VERSION, PUBLIC_KEY_LENGTH)
}

/// Encode a 33-byte account public key (`a...`).
pub fn encode_account_public_key(key: &[u8]) -> EncodingResult<String> {
    check_public_key_length(key)?;
    Ok(encode_base58check(&ACCOUNT_PUBLIC_KEY_VERSION, key))
}

/// Decode an account public key.
pub fn decode_account_public_key(s: &str) -> EncodingResult<Vec<u8>> {
    decode_versioned(s, &ACCOUNT_PUBLIC_KEY_VERSION, PUBLIC_KEY_LENGTH)
}

fn check_public_key_length(key: &[u8]) -> EncodingResult<()> {
    if key.len() != PUBLIC_KEY_LENGTH {
        return Err(EncodingError::InvalidFormat(format!(
            "public keys are 33 bytes, got {}",
            key.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

    #[test]
    fn it_encodes_and_decodes_accounts() {
        let addrs = [
            "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "r3ubyDp4gPGKH5bJx9KMmzpTSTW7EtRixS",
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp",
        ];
        for addr in addrs.iter() {
            let account = decode_account(addr).unwrap();
            assert_eq!(encode_account(&account), *addr);
            assert!(is_valid_classic_address(addr));
        }
    }

    #[test]
    fn it_rejects_every_single_character_flip() {
        let addr = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";
        for (i, original) in addr.char_indices() {
            for replacement in ALPHABET.chars().filter(|c| *c != original) {
                let mut flipped = addr.to_owned();
                flipped.replace_range(i..i + 1, &replacement.to_string());
                match decode_account(&flipped) {
                    Err(EncodingError::ChecksumMismatch) => {}
                    other => panic!("expected ChecksumMismatch for {}, got {:?}", flipped, other),
                }
            }
            for replacement in "0OIl+/".chars() {
                let mut flipped = addr.to_owned();
                flipped.replace_range(i..i + 1, &replacement.to_string());
                match decode_account(&flipped) {
                    Err(EncodingError::InvalidAlphabet(c)) if c == replacement => {}
                    other => panic!("expected InvalidAlphabet for {}, got {:?}", flipped, other),
                }
            }
        }
        match decode_account("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYf") {
            Err(EncodingError::ChecksumMismatch) => {}
            other => panic!("expected ChecksumMismatch, got {:?}", other),
        }
        match decode_account("0PT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe") {
            Err(EncodingError::InvalidAlphabet('0')) => {}
            other => panic!("expected InvalidAlphabet, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_other_versions() {
        let node = "n9Jxp5T9juHir3mCx4bzs7YAwSd1EcUbpNRS223wz5f6WW37Bd23";
        match decode_account(node) {
            Err(EncodingError::InvalidFormat(_)) => {}
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        assert!(!is_valid_classic_address(node));
    }

    #[test]
    fn it_encodes_public_keys() {
        let key =
            hex::decode("02356E89059A75438887F9FEE2056A2890DB82A68353BE9C0C0C8F89C0018B37FC")
                .unwrap();
        let node = encode_node_public_key(&key).unwrap();
        assert_eq!(node, "n9Jxp5T9juHir3mCx4bzs7YAwSd1EcUbpNRS223wz5f6WW37Bd23");
        assert_eq!(decode_node_public_key(&node).unwrap(), key);

        let account = encode_account_public_key(&key).unwrap();
        assert_eq!(account, "aB44pqySxy6oFk1sFu4Nc6DLuVsSaYagwK8MVkYqShPg7FXqBhHi");
        assert_eq!(decode_account_public_key(&account).unwrap(), key);

        assert!(encode_node_public_key(&key[1..]).is_err());
        assert!(decode_account_public_key(&node).is_err());
    }
}
