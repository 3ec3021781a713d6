//! A simple trait for binary (de)Serialization using std `Read` and `Write` traits, and the
//! three-band variable-length prefix used by blob-like ledger types.

use std::io::{Cursor, Error as IOError, ErrorKind, Read, Write};

use hex::FromHexError;
use thiserror::Error;

/// The largest length encoded in a single prefix byte.
pub const MAX_SINGLE_BYTE_LENGTH: usize = 192;

/// The largest length encoded in two prefix bytes.
pub const MAX_DOUBLE_BYTE_LENGTH: usize = 12480;

/// The largest length that can be prefixed at all.
pub const MAX_VL_LENGTH: usize = 918744;

/// Errors related to serialization of types.
#[derive(Debug, Error)]
pub enum SerError {
    /// The length prefix is corrupt, or its continuation bytes are missing.
    #[error("Malformed length prefix. Leading byte {0:#04x}")]
    MalformedLength(u8),

    /// The value is too long for any length prefix band.
    #[error("Length {0} exceeds the largest encodable length of 918744")]
    LengthTooLarge(usize),

    /// The input ended in the middle of a field.
    #[error("Input ended in the middle of a field")]
    TruncatedInput,

    /// The input was fully decoded but bytes remain.
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),

    /// A fixed-width value got the wrong number of bytes.
    #[error("Expected {expected} bytes. Got {got}")]
    WrongLength {
        /// The required length
        expected: usize,
        /// The provided length
        got: usize,
    },

    /// The field name is not in the definitions table.
    #[error("Unknown field {0:?}")]
    UnknownField(String),

    /// The field header names a (type, field) pair that is not in the definitions table.
    #[error("Unknown field code. Type {type_code}, field {field_code}")]
    UnknownFieldCode {
        /// The decoded type code
        type_code: u16,
        /// The decoded field code
        field_code: u16,
    },

    /// A value of the wrong protocol type was supplied for a field.
    #[error("Field {field} holds {expected} values. Got {got}")]
    TypeMismatch {
        /// The field name
        field: &'static str,
        /// The type the field is defined with
        expected: &'static str,
        /// The type of the supplied value
        got: &'static str,
    },

    /// A field appeared twice in the same object.
    #[error("Duplicate field {0}")]
    DuplicateField(&'static str),

    /// A field appeared after a field that sorts behind it.
    #[error("Field {field} is out of canonical order after {previous}")]
    NonCanonicalOrder {
        /// The offending field
        field: &'static str,
        /// The field that preceded it
        previous: &'static str,
    },

    /// An end marker used as a field value, or terminating the wrong container.
    #[error("Misplaced {0}")]
    MisplacedEndMarker(&'static str),

    /// Objects and arrays nested past the decoder's limit.
    #[error("Nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    /// A field header used an extended form for a code that fits in the compact form.
    #[error("Non-canonical field header")]
    MalformedHeader,

    /// A buffer index or slice bound was out of range.
    #[error("Index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index or bound
        index: usize,
        /// The buffer length
        len: usize,
    },

    /// A native amount above the total supply.
    #[error("Native amount of {0} drops exceeds the maximum of 10^17")]
    AmountOutOfRange(u64),

    /// An issued amount that is not normalized, or not representable.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A currency code that is malformed, or the native code where it is not allowed.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// A path step with no components, or with unknown type bits.
    #[error("Invalid path step type {0:#04x}")]
    InvalidPathStep(u8),

    /// A path set containing a path with no steps.
    #[error("Path with no steps")]
    EmptyPath,

    /// `deserialize_hex` encountered an error on its input.
    #[error("Error deserializing hex string")]
    FromHexError(#[from] FromHexError),

    /// IOError bubbled up from a `Write` passed to a `ByteFormat::write_to` implementation.
    #[error("Serialization error")]
    IOError(IOError),
}

impl From<IOError> for SerError {
    fn from(e: IOError) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => SerError::TruncatedInput,
            _ => SerError::IOError(e),
        }
    }
}

/// Type alias for serialization errors
pub type SerResult<T> = Result<T, SerError>;

/// A simple trait for deserializing from `std::io::Read` and serializing to `std::io::Write`.
///
/// Every protocol type codec implements `ByteFormat`. The canonical serializer drives codecs
/// through this trait, and signing hashes the bytes it produces.
pub trait ByteFormat {
    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Deserializes an instance of `Self` from a `std::io::Read`.
    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized;

    /// Serializes `Self` to a `std::io::Write`. Following `Write` trait conventions, its `Ok`
    /// type is a `usize` denoting the number of bytes written.
    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write;

    /// Convenience function for reading a single byte
    fn read_u8<R>(reader: &mut R) -> SerResult<u8>
    where
        R: Read,
    {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Convenience function for reading a BE u16
    fn read_u16_be<R>(reader: &mut R) -> SerResult<u16>
    where
        R: Read,
    {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Convenience function for reading a BE u32
    fn read_u32_be<R>(reader: &mut R) -> SerResult<u32>
    where
        R: Read,
    {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Convenience function for reading a BE u64
    fn read_u64_be<R>(reader: &mut R) -> SerResult<u64>
    where
        R: Read,
    {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Decodes a hex string to a `Vec<u8>`, deserializes an instance of `Self` from that vector.
    /// Fails if any bytes are left over.
    fn deserialize_hex(s: &str) -> SerResult<Self>
    where
        Self: std::marker::Sized,
    {
        let v: Vec<u8> = hex::decode(s)?;
        let mut cursor = Cursor::new(&v[..]);
        let value = Self::read_from(&mut cursor)?;
        let remaining = v.len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(SerError::TrailingBytes(remaining));
        }
        Ok(value)
    }

    /// Serializes `self` to a vector, returns the upper-case hex-encoded vector
    fn serialize_hex(&self) -> SerResult<String> {
        let mut v: Vec<u8> = Vec::with_capacity(self.serialized_length());
        self.write_to(&mut v)?;
        Ok(hex::encode_upper(v))
    }
}

/// Calculates the number of prefix bytes needed to encode `length`.
pub fn prefix_byte_len(length: usize) -> SerResult<usize> {
    match length {
        0..=MAX_SINGLE_BYTE_LENGTH => Ok(1),
        193..=MAX_DOUBLE_BYTE_LENGTH => Ok(2),
        12481..=MAX_VL_LENGTH => Ok(3),
        _ => Err(SerError::LengthTooLarge(length)),
    }
}

/// Encode `length` as a 1, 2 or 3 byte prefix.
pub fn encode_vl_prefix(length: usize) -> SerResult<Vec<u8>> {
    match prefix_byte_len(length)? {
        1 => Ok(vec![length as u8]),
        2 => {
            let l = length - 193;
            Ok(vec![193 + (l >> 8) as u8, (l & 0xff) as u8])
        }
        _ => {
            let l = length - 12481;
            Ok(vec![
                241 + (l >> 16) as u8,
                ((l >> 8) & 0xff) as u8,
                (l & 0xff) as u8,
            ])
        }
    }
}

/// Write a length prefix for `length`.
pub fn write_vl_prefix<W>(writer: &mut W, length: usize) -> SerResult<usize>
where
    W: Write,
{
    let prefix = encode_vl_prefix(length)?;
    writer.write_all(&prefix)?;
    Ok(prefix.len())
}

/// Read a length prefix. The band is chosen by the leading byte. A missing continuation byte
/// is a malformed length, not a truncated value.
pub fn read_vl_prefix<R>(reader: &mut R) -> SerResult<usize>
where
    R: Read,
{
    let mut lead = [0u8; 1];
    reader.read_exact(&mut lead)?;
    let b1 = lead[0] as usize;
    match lead[0] {
        0..=192 => Ok(b1),
        193..=240 => {
            let mut rest = [0u8; 1];
            reader
                .read_exact(&mut rest)
                .map_err(|_| SerError::MalformedLength(lead[0]))?;
            Ok(193 + ((b1 - 193) << 8) + rest[0] as usize)
        }
        241..=254 => {
            let mut rest = [0u8; 2];
            reader
                .read_exact(&mut rest)
                .map_err(|_| SerError::MalformedLength(lead[0]))?;
            let length = 12481 + ((b1 - 241) << 16) + ((rest[0] as usize) << 8) + rest[1] as usize;
            if length > MAX_VL_LENGTH {
                return Err(SerError::LengthTooLarge(length));
            }
            Ok(length)
        }
        255 => Err(SerError::MalformedLength(lead[0])),
    }
}

/// Read a length-prefixed byte vector.
pub fn read_prefix_vec<R>(reader: &mut R) -> SerResult<Vec<u8>>
where
    R: Read,
{
    let length = read_vl_prefix(reader)?;
    let mut v = vec![0u8; length];
    reader.read_exact(&mut v)?;
    Ok(v)
}

/// Write a length-prefixed byte vector. Returns the number of bytes written, prefix included.
pub fn write_prefix_vec<W>(writer: &mut W, data: &[u8]) -> SerResult<usize>
where
    W: Write,
{
    let written = write_vl_prefix(writer, data.len())?;
    writer.write_all(data)?;
    Ok(written + data.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_matches_byte_len_and_prefix() {
        let cases = [
            (0usize, 1usize, "00"),
            (1, 1, "01"),
            (192, 1, "c0"),
            (193, 2, "c100"),
            (12480, 2, "f0ff"),
            (12481, 3, "f10000"),
            (918744, 3, "fed417"),
        ];
        for case in cases.iter() {
            assert_eq!(prefix_byte_len(case.0).unwrap(), case.1);
            let prefix = encode_vl_prefix(case.0).unwrap();
            assert_eq!(hex::encode(&prefix), case.2);
            assert_eq!(read_vl_prefix(&mut &prefix[..]).unwrap(), case.0);
        }
    }

    #[test]
    fn it_recovers_boundary_lengths() {
        for length in [0usize, 192, 193, 12480, 12481] {
            let data = vec![0xab; length];
            let mut buf = vec![];
            let written = write_prefix_vec(&mut buf, &data).unwrap();
            assert_eq!(written, buf.len());
            assert_eq!(buf.len() - length, prefix_byte_len(length).unwrap());
            assert_eq!(read_prefix_vec(&mut &buf[..]).unwrap(), data);
        }
    }

    #[test]
    fn it_rejects_oversized_lengths() {
        match encode_vl_prefix(MAX_VL_LENGTH + 1) {
            Err(SerError::LengthTooLarge(918745)) => {}
            other => panic!("expected LengthTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_decoded_lengths_past_the_last_band() {
        match read_vl_prefix(&mut &[0xfeu8, 0xd4, 0x18][..]) {
            Err(SerError::LengthTooLarge(918745)) => {}
            other => panic!("expected LengthTooLarge, got {:?}", other),
        }
        match read_prefix_vec(&mut &[0xfeu8, 0xff, 0xff][..]) {
            Err(SerError::LengthTooLarge(929984)) => {}
            other => panic!("expected LengthTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_truncated_and_reserved_prefixes() {
        match read_vl_prefix(&mut &[0xc1u8][..]) {
            Err(SerError::MalformedLength(0xc1)) => {}
            other => panic!("expected MalformedLength, got {:?}", other),
        }
        match read_vl_prefix(&mut &[0xf1u8, 0x00][..]) {
            Err(SerError::MalformedLength(0xf1)) => {}
            other => panic!("expected MalformedLength, got {:?}", other),
        }
        match read_vl_prefix(&mut &[0xffu8, 0x00, 0x00][..]) {
            Err(SerError::MalformedLength(0xff)) => {}
            other => panic!("expected MalformedLength, got {:?}", other),
        }
        match read_prefix_vec(&mut &[0x03u8, 0x01][..]) {
            Err(SerError::TruncatedInput) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
    }
}
