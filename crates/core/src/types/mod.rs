//! One codec per protocol type, and the closed `FieldValue` union that tags a value with its
//! type.

use std::io::{Cursor, Read, Write};

use crate::{
    buffer::ByteBuffer,
    definitions::TypeCode,
    hashes::{Hash128, Hash160, Hash256},
    ser::{ByteFormat, SerError, SerResult},
};

/// Account identifiers
pub mod account;
/// Currency amounts
pub mod amount;
/// Length-prefixed byte blobs
pub mod blob;
/// Currency codes
pub mod currency;
/// Field headers
pub mod header;
/// Nested objects and arrays
pub mod object;
/// Payment path sets
pub mod path;
/// Fixed-width unsigned integers
pub mod uint;
/// Lists of 256-bit hashes
pub mod vector;

pub use account::*;
pub use amount::*;
pub use blob::*;
pub use currency::*;
pub use header::*;
pub use object::*;
pub use path::*;
pub use vector::*;

/// A value tagged with its protocol type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// `UInt8`
    UInt8(u8),
    /// `UInt16`
    UInt16(u16),
    /// `UInt32`
    UInt32(u32),
    /// `UInt64`
    UInt64(u64),
    /// `Hash128`
    Hash128(Hash128),
    /// `Hash160`
    Hash160(Hash160),
    /// `Hash256`
    Hash256(Hash256),
    /// `Amount`
    Amount(Amount),
    /// `Blob`
    Blob(Blob),
    /// `AccountID`
    AccountId(AccountId),
    /// `STObject`
    Object(StObject),
    /// `STArray`
    Array(StArray),
    /// `PathSet`
    PathSet(PathSet),
    /// `Vector256`
    Vector256(Vector256),
}

impl FieldValue {
    /// The protocol type of the value
    pub fn type_code(&self) -> TypeCode {
        match self {
            FieldValue::UInt8(_) => TypeCode::UInt8,
            FieldValue::UInt16(_) => TypeCode::UInt16,
            FieldValue::UInt32(_) => TypeCode::UInt32,
            FieldValue::UInt64(_) => TypeCode::UInt64,
            FieldValue::Hash128(_) => TypeCode::Hash128,
            FieldValue::Hash160(_) => TypeCode::Hash160,
            FieldValue::Hash256(_) => TypeCode::Hash256,
            FieldValue::Amount(_) => TypeCode::Amount,
            FieldValue::Blob(_) => TypeCode::Blob,
            FieldValue::AccountId(_) => TypeCode::AccountId,
            FieldValue::Object(_) => TypeCode::StObject,
            FieldValue::Array(_) => TypeCode::StArray,
            FieldValue::PathSet(_) => TypeCode::PathSet,
            FieldValue::Vector256(_) => TypeCode::Vector256,
        }
    }

    /// Read a value of type `type_code`.
    pub fn read_as<R>(type_code: TypeCode, reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Self::read_nested(type_code, reader, 0)
    }

    /// Read a value held by an object `depth` levels below the top.
    pub(crate) fn read_nested<R>(
        type_code: TypeCode,
        reader: &mut R,
        depth: usize,
    ) -> SerResult<Self>
    where
        R: Read,
    {
        let value = match type_code {
            TypeCode::UInt8 => FieldValue::UInt8(u8::read_from(reader)?),
            TypeCode::UInt16 => FieldValue::UInt16(u16::read_from(reader)?),
            TypeCode::UInt32 => FieldValue::UInt32(u32::read_from(reader)?),
            TypeCode::UInt64 => FieldValue::UInt64(u64::read_from(reader)?),
            TypeCode::Hash128 => FieldValue::Hash128(Hash128::read_from(reader)?),
            TypeCode::Hash160 => FieldValue::Hash160(Hash160::read_from(reader)?),
            TypeCode::Hash256 => FieldValue::Hash256(Hash256::read_from(reader)?),
            TypeCode::Amount => FieldValue::Amount(Amount::read_from(reader)?),
            TypeCode::Blob => FieldValue::Blob(Blob::read_from(reader)?),
            TypeCode::AccountId => FieldValue::AccountId(AccountId::read_from(reader)?),
            TypeCode::StObject => FieldValue::Object(StObject::read_nested(reader, depth + 1)?),
            TypeCode::StArray => FieldValue::Array(StArray::read_nested(reader, depth + 1)?),
            TypeCode::PathSet => FieldValue::PathSet(PathSet::read_from(reader)?),
            TypeCode::Vector256 => FieldValue::Vector256(Vector256::read_from(reader)?),
        };
        Ok(value)
    }

    /// Encode the value, without a field header.
    pub fn encode(&self) -> SerResult<ByteBuffer> {
        let mut buf = ByteBuffer::empty();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Decode a value of type `type_code` starting at `cursor`. Returns the value and the
    /// number of bytes consumed.
    pub fn decode(
        type_code: TypeCode,
        buffer: &ByteBuffer,
        cursor: usize,
    ) -> SerResult<(Self, usize)> {
        if cursor > buffer.len() {
            return Err(SerError::OutOfRange {
                index: cursor,
                len: buffer.len(),
            });
        }
        let mut reader = Cursor::new(&buffer.as_slice()[cursor..]);
        let value = Self::read_as(type_code, &mut reader)?;
        Ok((value, reader.position() as usize))
    }
}

impl FieldValue {
    /// The encoded length, without a field header
    pub fn serialized_length(&self) -> usize {
        match self {
            FieldValue::UInt8(v) => v.serialized_length(),
            FieldValue::UInt16(v) => v.serialized_length(),
            FieldValue::UInt32(v) => v.serialized_length(),
            FieldValue::UInt64(v) => v.serialized_length(),
            FieldValue::Hash128(v) => v.serialized_length(),
            FieldValue::Hash160(v) => v.serialized_length(),
            FieldValue::Hash256(v) => v.serialized_length(),
            FieldValue::Amount(v) => v.serialized_length(),
            FieldValue::Blob(v) => v.serialized_length(),
            FieldValue::AccountId(v) => v.serialized_length(),
            FieldValue::Object(v) => v.serialized_length(),
            FieldValue::Array(v) => v.serialized_length(),
            FieldValue::PathSet(v) => v.serialized_length(),
            FieldValue::Vector256(v) => v.serialized_length(),
        }
    }

    /// Write the value, without a field header
    pub fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        match self {
            FieldValue::UInt8(v) => v.write_to(writer),
            FieldValue::UInt16(v) => v.write_to(writer),
            FieldValue::UInt32(v) => v.write_to(writer),
            FieldValue::UInt64(v) => v.write_to(writer),
            FieldValue::Hash128(v) => v.write_to(writer),
            FieldValue::Hash160(v) => v.write_to(writer),
            FieldValue::Hash256(v) => v.write_to(writer),
            FieldValue::Amount(v) => v.write_to(writer),
            FieldValue::Blob(v) => v.write_to(writer),
            FieldValue::AccountId(v) => v.write_to(writer),
            FieldValue::Object(v) => v.write_to(writer),
            FieldValue::Array(v) => v.write_to(writer),
            FieldValue::PathSet(v) => v.write_to(writer),
            FieldValue::Vector256(v) => v.write_to(writer),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value!(
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    Hash128 => Hash128,
    Hash160 => Hash160,
    Hash256 => Hash256,
    Amount => Amount,
    Blob => Blob,
    AccountId => AccountId,
    StObject => Object,
    StArray => Array,
    PathSet => PathSet,
    Vector256 => Vector256,
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_decodes_from_a_cursor() {
        let buf = ByteBuffer::from_hex("FF400000000000000C14F667B0CA50CC7709A220B0561B85E53A48461FA8")
            .unwrap();
        let (fee, used) = FieldValue::decode(TypeCode::Amount, &buf, 1).unwrap();
        assert_eq!(fee, FieldValue::Amount(Amount::Drops(12)));
        assert_eq!(used, 8);
        let (account, used) = FieldValue::decode(TypeCode::AccountId, &buf, 9).unwrap();
        assert_eq!(used, 21);
        assert_eq!(account.encode().unwrap(), buf.slice(9, 30).unwrap());
    }

    #[test]
    fn it_reports_overruns() {
        let buf = ByteBuffer::from_hex("0000").unwrap();
        match FieldValue::decode(TypeCode::UInt32, &buf, 0) {
            Err(SerError::TruncatedInput) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
        match FieldValue::decode(TypeCode::UInt8, &buf, 3) {
            Err(SerError::OutOfRange { .. }) => {}
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }
}
