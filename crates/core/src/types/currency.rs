use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

use crate::ser::{ByteFormat, SerError, SerResult};

const STANDARD_CODE_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789?!@#$%^&*<>(){}[]|";

/// A 160-bit currency code.
///
/// Standard codes are three characters stored at bytes 12..15 with every other byte zero. The
/// all-zero code is the native currency, written `XRP`. Any other value is rendered as hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 20]);

impl Currency {
    /// The native currency
    pub const NATIVE: Currency = Currency([0u8; 20]);

    /// Wrap 20 raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build a standard three-character code
    pub fn standard(code: &str) -> SerResult<Self> {
        if code.len() != 3 || !code.chars().all(|c| STANDARD_CODE_CHARS.contains(c)) {
            return Err(SerError::InvalidCurrency(code.to_owned()));
        }
        if code == "XRP" {
            return Ok(Self::NATIVE);
        }
        let mut buf = [0u8; 20];
        buf[12..15].copy_from_slice(code.as_bytes());
        Ok(Self(buf))
    }

    /// True for the all-zero native code
    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The three-character code, if this is a standard currency
    pub fn standard_code(&self) -> Option<&str> {
        let b = &self.0;
        let zero_elsewhere = b[..12].iter().chain(&b[15..]).all(|x| *x == 0);
        if !zero_elsewhere || self.is_native() {
            return None;
        }
        std::str::from_utf8(&b[12..15])
            .ok()
            .filter(|code| code.chars().all(|c| STANDARD_CODE_CHARS.contains(c)))
    }

    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl ByteFormat for Currency {
    fn serialized_length(&self) -> usize {
        20
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let mut buf = [0u8; 20];
        reader.read_exact(&mut buf)?;
        Ok(Self(buf))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&self.0)?;
        Ok(20)
    }
}

impl FromStr for Currency {
    type Err = SerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            3 => Self::standard(s),
            40 => {
                let bytes = hex::decode(s).map_err(|_| SerError::InvalidCurrency(s.to_owned()))?;
                let mut buf = [0u8; 20];
                buf.copy_from_slice(&bytes);
                Ok(Self(buf))
            }
            _ => Err(SerError::InvalidCurrency(s.to_owned())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return f.write_str("XRP");
        }
        match self.standard_code() {
            Some(code) => f.write_str(code),
            None => f.write_str(&hex::encode_upper(self.0)),
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_places_standard_codes() {
        let usd: Currency = "USD".parse().unwrap();
        assert_eq!(
            usd.serialize_hex().unwrap(),
            "0000000000000000000000005553440000000000"
        );
        assert_eq!(usd.to_string(), "USD");
        assert!(!usd.is_native());

        let xrp: Currency = "XRP".parse().unwrap();
        assert!(xrp.is_native());
        assert_eq!(xrp.to_string(), "XRP");
    }

    #[test]
    fn it_renders_nonstandard_codes_as_hex() {
        let hex_code = "0158415500000000C1F76FF6ECB0BAC600000000";
        let c: Currency = hex_code.parse().unwrap();
        assert_eq!(c.standard_code(), None);
        assert_eq!(c.to_string(), hex_code);
    }

    #[test]
    fn it_rejects_malformed_codes() {
        for bad in ["US", "USDX", "U D", "zz"] {
            match bad.parse::<Currency>() {
                Err(SerError::InvalidCurrency(_)) => {}
                other => panic!("expected InvalidCurrency for {:?}, got {:?}", bad, other),
            }
        }
    }
}
