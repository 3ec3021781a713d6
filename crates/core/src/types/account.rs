use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::{
    enc::{decode_account, encode_account, EncodingError},
    ser::{self, ByteFormat, SerError, SerResult},
};

/// A 160-bit account identifier. Rendered and parsed only as a classic address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// The width in bytes
    pub const LENGTH: usize = 20;

    /// Wrap 20 raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Copy an identifier out of a slice of exactly 20 bytes
    pub fn from_slice(s: &[u8]) -> SerResult<Self> {
        if s.len() != Self::LENGTH {
            return Err(SerError::WrongLength {
                expected: Self::LENGTH,
                got: s.len(),
            });
        }
        let mut buf = [0u8; 20];
        buf.copy_from_slice(s);
        Ok(Self(buf))
    }

    /// `RIPEMD160(SHA256(public_key))`
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let sha = Sha256::digest(public_key);
        let ripe = Ripemd160::digest(sha);
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&ripe);
        Self(buf)
    }

    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Read 20 raw bytes with no length prefix, as inside amounts and paths
    pub fn read_raw<R: Read>(reader: &mut R) -> SerResult<Self> {
        let mut buf = [0u8; 20];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }

    /// Write 20 raw bytes with no length prefix
    pub fn write_raw<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        writer.write_all(&self.0)?;
        Ok(Self::LENGTH)
    }
}

impl ByteFormat for AccountId {
    fn serialized_length(&self) -> usize {
        1 + Self::LENGTH
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let len = ser::read_vl_prefix(reader)?;
        if len != Self::LENGTH {
            return Err(SerError::WrongLength {
                expected: Self::LENGTH,
                got: len,
            });
        }
        Self::read_raw(reader)
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        ser::write_prefix_vec(writer, &self.0)
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_account(self))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_account(s)
    }
}

impl serde::Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<AccountId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(|e: EncodingError| serde::de::Error::custom(e.to_string()))
    }
}
