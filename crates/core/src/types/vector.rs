use std::io::{Read, Write};

use crate::{
    hashes::Hash256,
    ser::{self, ByteFormat, SerError, SerResult},
};

/// A length-prefixed list of 256-bit hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Vector256(pub Vec<Hash256>);

impl Vector256 {
    /// The hashes
    pub fn items(&self) -> &[Hash256] {
        &self.0
    }
}

impl ByteFormat for Vector256 {
    fn serialized_length(&self) -> usize {
        let body = self.0.len() * 32;
        ser::prefix_byte_len(body).unwrap_or(0) + body
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let body = ser::read_prefix_vec(reader)?;
        if body.len() % 32 != 0 {
            return Err(SerError::WrongLength {
                expected: body.len() - body.len() % 32,
                got: body.len(),
            });
        }
        body.chunks(32)
            .map(Hash256::from_slice)
            .collect::<SerResult<Vec<_>>>()
            .map(Self)
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let body: Vec<u8> = self.0.iter().flat_map(|h| h.0).collect();
        ser::write_prefix_vec(writer, &body)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_concatenates_hashes() {
        let v = Vector256(vec![Hash256([0x11; 32]), Hash256([0x22; 32])]);
        let hex = v.serialize_hex().unwrap();
        assert_eq!(hex, format!("40{}{}", "11".repeat(32), "22".repeat(32)));
        assert_eq!(Vector256::deserialize_hex(&hex).unwrap(), v);
    }

    #[test]
    fn it_rejects_partial_hashes() {
        let hex = format!("21{}", "00".repeat(33));
        match Vector256::deserialize_hex(&hex) {
            Err(SerError::WrongLength {
                expected: 32,
                got: 33,
            }) => {}
            other => panic!("expected WrongLength, got {:?}", other),
        }
    }
}
