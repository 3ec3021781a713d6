use std::io::{Read, Write};

use crate::{
    ser::{ByteFormat, SerError, SerResult},
    types::{AccountId, Currency},
};

const STEP_ACCOUNT: u8 = 0x01;
const STEP_CURRENCY: u8 = 0x10;
const STEP_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xFF;
const PATHSET_END: u8 = 0x00;

/// One hop of a payment path. At least one component is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Ripple through this account
    pub account: Option<AccountId>,
    /// Convert to this currency
    pub currency: Option<Currency>,
    /// Convert to this issuer
    pub issuer: Option<AccountId>,
}

impl PathStep {
    fn type_byte(&self) -> u8 {
        let mut t = 0;
        if self.account.is_some() {
            t |= STEP_ACCOUNT;
        }
        if self.currency.is_some() {
            t |= STEP_CURRENCY;
        }
        if self.issuer.is_some() {
            t |= STEP_ISSUER;
        }
        t
    }

    fn write_step<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let t = self.type_byte();
        if t == 0 {
            return Err(SerError::InvalidPathStep(t));
        }
        writer.write_all(&[t])?;
        let mut len = 1;
        if let Some(account) = &self.account {
            len += account.write_raw(writer)?;
        }
        if let Some(currency) = &self.currency {
            len += currency.write_to(writer)?;
        }
        if let Some(issuer) = &self.issuer {
            len += issuer.write_raw(writer)?;
        }
        Ok(len)
    }

    fn read_step<R: Read>(t: u8, reader: &mut R) -> SerResult<Self> {
        if t & !(STEP_ACCOUNT | STEP_CURRENCY | STEP_ISSUER) != 0 {
            return Err(SerError::InvalidPathStep(t));
        }
        let account = match t & STEP_ACCOUNT {
            0 => None,
            _ => Some(AccountId::read_raw(reader)?),
        };
        let currency = match t & STEP_CURRENCY {
            0 => None,
            _ => Some(Currency::read_from(reader)?),
        };
        let issuer = match t & STEP_ISSUER {
            0 => None,
            _ => Some(AccountId::read_raw(reader)?),
        };
        Ok(Self {
            account,
            currency,
            issuer,
        })
    }

    fn len(&self) -> usize {
        1 + [self.account.is_some(), self.currency.is_some(), self.issuer.is_some()]
            .iter()
            .filter(|p| **p)
            .count()
            * 20
    }
}

/// A list of alternative payment paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathSet(pub Vec<Vec<PathStep>>);

impl PathSet {
    /// The paths in the set
    pub fn paths(&self) -> &[Vec<PathStep>] {
        &self.0
    }
}

impl ByteFormat for PathSet {
    fn serialized_length(&self) -> usize {
        let steps: usize = self.0.iter().flatten().map(PathStep::len).sum();
        let separators = self.0.len().saturating_sub(1);
        steps + separators + 1
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let mut paths = vec![];
        let mut current = vec![];
        loop {
            match Self::read_u8(reader)? {
                // A lone terminator is the empty set
                PATHSET_END if current.is_empty() && paths.is_empty() => break,
                PATHSET_END | PATH_SEPARATOR if current.is_empty() => {
                    return Err(SerError::EmptyPath);
                }
                PATHSET_END => {
                    paths.push(current);
                    break;
                }
                PATH_SEPARATOR => paths.push(std::mem::take(&mut current)),
                t => current.push(PathStep::read_step(t, reader)?),
            }
        }
        Ok(Self(paths))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = 0;
        for (i, path) in self.0.iter().enumerate() {
            if path.is_empty() {
                return Err(SerError::EmptyPath);
            }
            if i > 0 {
                writer.write_all(&[PATH_SEPARATOR])?;
                len += 1;
            }
            for step in path {
                len += step.write_step(writer)?;
            }
        }
        writer.write_all(&[PATHSET_END])?;
        Ok(len + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn account() -> AccountId {
        "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe".parse().unwrap()
    }

    #[test]
    fn it_writes_steps_separators_and_terminator() {
        let usd: Currency = "USD".parse().unwrap();
        let set = PathSet(vec![
            vec![PathStep {
                account: Some(account()),
                ..Default::default()
            }],
            vec![PathStep {
                currency: Some(usd),
                issuer: Some(account()),
                ..Default::default()
            }],
        ]);
        let hex = set.serialize_hex().unwrap();
        let expected = format!(
            "01{acct}FF30{usd}{acct}00",
            acct = "F667B0CA50CC7709A220B0561B85E53A48461FA8",
            usd = "0000000000000000000000005553440000000000"
        );
        assert_eq!(hex, expected);
        assert_eq!(set.serialized_length(), hex.len() / 2);
        assert_eq!(PathSet::deserialize_hex(&hex).unwrap(), set);
    }

    #[test]
    fn it_rejects_bad_steps() {
        let empty_step = PathSet(vec![vec![PathStep::default()]]);
        match empty_step.serialize_hex() {
            Err(SerError::InvalidPathStep(0)) => {}
            other => panic!("expected InvalidPathStep, got {:?}", other),
        }
        match PathSet::deserialize_hex("02") {
            Err(SerError::InvalidPathStep(2)) => {}
            other => panic!("expected InvalidPathStep, got {:?}", other),
        }
        match PathSet::deserialize_hex("01F667B0CA") {
            Err(SerError::TruncatedInput) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
    }

    #[test]
    fn it_round_trips_the_empty_set() {
        let empty = PathSet::default();
        assert_eq!(empty.serialize_hex().unwrap(), "00");
        assert_eq!(PathSet::deserialize_hex("00").unwrap(), empty);
        assert!(PathSet::deserialize_hex("00").unwrap().paths().is_empty());
    }

    #[test]
    fn it_rejects_paths_without_steps() {
        match PathSet(vec![vec![]]).serialize_hex() {
            Err(SerError::EmptyPath) => {}
            other => panic!("expected EmptyPath, got {:?}", other),
        }
        let one_step = vec![PathStep {
            account: Some(account()),
            ..Default::default()
        }];
        match PathSet(vec![one_step, vec![]]).serialize_hex() {
            Err(SerError::EmptyPath) => {}
            other => panic!("expected EmptyPath, got {:?}", other),
        }
        for hex in ["FF00", "FF01F667B0CA50CC7709A220B0561B85E53A48461FA800"] {
            match PathSet::deserialize_hex(hex) {
                Err(SerError::EmptyPath) => {}
                other => panic!("expected EmptyPath for {}, got {:?}", hex, other),
            }
        }
        match PathSet::deserialize_hex("01F667B0CA50CC7709A220B0561B85E53A48461FA8FF00") {
            Err(SerError::EmptyPath) => {}
            other => panic!("expected EmptyPath, got {:?}", other),
        }
    }
}
