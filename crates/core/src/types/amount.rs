use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    ser::{ByteFormat, SerError, SerResult},
    types::{AccountId, Currency},
};

/// The largest native amount, in drops. The total supply.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

/// The smallest normalized issued mantissa
pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;

/// One past the largest normalized issued mantissa
pub const MAX_MANTISSA: u64 = 10_000_000_000_000_000;

/// The smallest issued exponent
pub const MIN_EXPONENT: i32 = -96;

/// The largest issued exponent
pub const MAX_EXPONENT: i32 = 80;

const NOT_NATIVE_BIT: u64 = 1 << 63;
const POSITIVE_BIT: u64 = 1 << 62;
const DROPS_MASK: u64 = (1 << 62) - 1;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const ISSUED_ZERO: u64 = NOT_NATIVE_BIT;

/// A normalized decimal value of an issued currency: `mantissa * 10^exponent`.
///
/// Non-zero values hold a mantissa in `[10^15, 10^16)` and an exponent in `[-96, 80]`. Zero
/// has a single representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IssuedValue {
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

impl IssuedValue {
    /// Zero
    pub const ZERO: IssuedValue = IssuedValue {
        negative: false,
        mantissa: 0,
        exponent: 0,
    };

    /// Normalize `mantissa * 10^exponent`. Values too small to represent become zero. Values
    /// too large, or that would lose significant digits, fail.
    pub fn new(negative: bool, mantissa: u64, exponent: i32) -> SerResult<Self> {
        if mantissa == 0 {
            return Ok(Self::ZERO);
        }
        let (mut m, mut e) = (mantissa, exponent);
        while m >= MAX_MANTISSA {
            if m % 10 != 0 {
                return Err(SerError::InvalidAmount(format!(
                    "{}e{} has more than 16 significant digits",
                    mantissa, exponent
                )));
            }
            m /= 10;
            e = e.saturating_add(1);
        }
        while m < MIN_MANTISSA && e > MIN_EXPONENT {
            m *= 10;
            e -= 1;
        }
        if m < MIN_MANTISSA {
            return Ok(Self::ZERO);
        }
        if e > MAX_EXPONENT {
            return Err(SerError::InvalidAmount(format!(
                "{}e{} exceeds the largest issued value",
                mantissa, exponent
            )));
        }
        Ok(Self {
            negative,
            mantissa: m,
            exponent: e,
        })
    }

    /// True for zero
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// True for values below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The normalized mantissa, 0 for zero
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// The normalized exponent
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    fn to_bits(self) -> u64 {
        if self.is_zero() {
            return ISSUED_ZERO;
        }
        let sign = if self.negative { 0 } else { POSITIVE_BIT };
        NOT_NATIVE_BIT | sign | (((self.exponent + 97) as u64) << 54) | self.mantissa
    }

    fn from_bits(bits: u64) -> SerResult<Self> {
        if bits == ISSUED_ZERO {
            return Ok(Self::ZERO);
        }
        let mantissa = bits & MANTISSA_MASK;
        let exponent = ((bits >> 54) & 0xff) as i32 - 97;
        if !(MIN_MANTISSA..MAX_MANTISSA).contains(&mantissa)
            || !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent)
        {
            return Err(SerError::InvalidAmount(format!(
                "non-normalized issued value {:#018x}",
                bits
            )));
        }
        Ok(Self {
            negative: bits & POSITIVE_BIT == 0,
            mantissa,
            exponent,
        })
    }
}

impl FromStr for IssuedValue {
    type Err = SerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SerError::InvalidAmount(s.to_owned());

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (base, exp) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (
                &unsigned[..i],
                unsigned[i + 1..].parse::<i32>().map_err(|_| invalid())?,
            ),
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = match base.split_once('.') {
            Some((i, f)) => (i, f),
            None => (base, ""),
        };
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let exponent = exp
            .checked_sub(frac_part.len() as i32)
            .ok_or_else(invalid)?;
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let exponent = exponent
            .checked_add((significant.len() - trimmed.len()) as i32)
            .ok_or_else(invalid)?;
        if trimmed.len() > 16 {
            return Err(SerError::InvalidAmount(format!(
                "{} has more than 16 significant digits",
                s
            )));
        }
        let mantissa = trimmed.parse::<u64>().map_err(|_| invalid())?;
        Self::new(negative, mantissa, exponent)
    }
}

impl fmt::Display for IssuedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        let mut m = self.mantissa;
        let mut e = self.exponent;
        if !(-25..=-5).contains(&e) {
            while m % 10 == 0 {
                m /= 10;
                e += 1;
            }
            return write!(f, "{}e{}", m, e);
        }
        // 16 digits, with the decimal point between 1 and 21 places from the right
        let digits = format!("{:0>width$}", m, width = (-e) as usize + 1);
        let split = digits.len() - (-e) as usize;
        let (int_part, frac_part) = digits.split_at(split);
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.is_empty() {
            write!(f, "{}", int_part)
        } else {
            write!(f, "{}.{}", int_part, frac_part)
        }
    }
}

/// An amount of an issued currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssuedAmount {
    /// The normalized value
    pub value: IssuedValue,
    /// The currency. Never the native code.
    pub currency: Currency,
    /// The issuing account
    pub issuer: AccountId,
}

impl IssuedAmount {
    /// Assemble an issued amount. Fails for the native currency code.
    pub fn new(value: IssuedValue, currency: Currency, issuer: AccountId) -> SerResult<Self> {
        if currency.is_native() {
            return Err(SerError::InvalidCurrency(
                "the native code cannot be issued".to_owned(),
            ));
        }
        Ok(Self {
            value,
            currency,
            issuer,
        })
    }
}

/// A currency amount: native drops, or a value of an issued currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    /// Native drops. Magnitude at most `10^17`.
    Drops(i64),
    /// An issued currency amount
    Issued(IssuedAmount),
}

impl Amount {
    /// A native amount
    pub fn drops(drops: i64) -> Self {
        Amount::Drops(drops)
    }

    /// Parse an issued amount from its parts
    pub fn issued(value: &str, currency: &str, issuer: AccountId) -> SerResult<Self> {
        Ok(Amount::Issued(IssuedAmount::new(
            value.parse()?,
            currency.parse()?,
            issuer,
        )?))
    }

    /// True for native amounts
    pub fn is_native(&self) -> bool {
        matches!(self, Amount::Drops(_))
    }

    /// The native amount in drops, if native
    pub fn as_drops(&self) -> Option<i64> {
        match self {
            Amount::Drops(d) => Some(*d),
            Amount::Issued(_) => None,
        }
    }
}

impl ByteFormat for Amount {
    fn serialized_length(&self) -> usize {
        match self {
            Amount::Drops(_) => 8,
            Amount::Issued(_) => 48,
        }
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let bits = Self::read_u64_be(reader)?;
        if bits & NOT_NATIVE_BIT == 0 {
            let magnitude = bits & DROPS_MASK;
            if magnitude > MAX_DROPS {
                return Err(SerError::AmountOutOfRange(magnitude));
            }
            if bits & POSITIVE_BIT == 0 {
                if magnitude == 0 {
                    return Err(SerError::InvalidAmount("negative zero".to_owned()));
                }
                return Ok(Amount::Drops(-(magnitude as i64)));
            }
            return Ok(Amount::Drops(magnitude as i64));
        }

        let value = IssuedValue::from_bits(bits)?;
        let currency = Currency::read_from(reader)?;
        let issuer = AccountId::read_raw(reader)?;
        Ok(Amount::Issued(IssuedAmount::new(value, currency, issuer)?))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        match self {
            Amount::Drops(d) => {
                let magnitude = d.unsigned_abs();
                if magnitude > MAX_DROPS {
                    return Err(SerError::AmountOutOfRange(magnitude));
                }
                let sign = if *d >= 0 { POSITIVE_BIT } else { 0 };
                writer.write_all(&(sign | magnitude).to_be_bytes())?;
                Ok(8)
            }
            Amount::Issued(issued) => {
                if issued.currency.is_native() {
                    return Err(SerError::InvalidCurrency(
                        "the native code cannot be issued".to_owned(),
                    ));
                }
                writer.write_all(&issued.value.to_bits().to_be_bytes())?;
                let mut len = 8;
                len += issued.currency.write_to(writer)?;
                len += issued.issuer.write_raw(writer)?;
                Ok(len)
            }
        }
    }
}

impl From<IssuedAmount> for Amount {
    fn from(issued: IssuedAmount) -> Self {
        Amount::Issued(issued)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AmountJson {
    Drops(String),
    Issued {
        value: String,
        currency: String,
        issuer: AccountId,
    },
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let json = match self {
            Amount::Drops(d) => AmountJson::Drops(d.to_string()),
            Amount::Issued(i) => AmountJson::Issued {
                value: i.value.to_string(),
                currency: i.currency.to_string(),
                issuer: i.issuer,
            },
        };
        json.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        match AmountJson::deserialize(deserializer)? {
            AmountJson::Drops(s) => s.parse().map(Amount::Drops).map_err(D::Error::custom),
            AmountJson::Issued {
                value,
                currency,
                issuer,
            } => Amount::issued(&value, &currency, issuer).map_err(D::Error::custom),
        }
    }
}
