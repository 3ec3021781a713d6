use std::io::{Read, Write};

use crate::{
    definitions::{self, FieldDefinition},
    ser::{ByteFormat, SerError, SerResult},
};

/// The 1-3 byte header preceding every serialized field.
///
/// Codes below 16 share a single byte, type in the high nibble and field in the low nibble. A
/// zero nibble signals that the code follows in its own byte, type first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    /// The type code
    pub type_code: u16,
    /// The field code
    pub field_code: u16,
}

impl FieldHeader {
    /// The header for a field definition
    pub fn of(def: &FieldDefinition) -> Self {
        let (type_code, field_code) = def.ordinal();
        Self {
            type_code,
            field_code,
        }
    }

    /// Resolve the header against the field table
    pub fn definition(&self) -> SerResult<&'static FieldDefinition> {
        definitions::lookup_code(self.type_code, self.field_code)
    }

    /// The header bytes
    pub fn to_bytes(&self) -> SerResult<Vec<u8>> {
        let (t, f) = (self.type_code, self.field_code);
        if t == 0 || f == 0 || t > 255 || f > 255 {
            return Err(SerError::UnknownFieldCode {
                type_code: t,
                field_code: f,
            });
        }
        let (t, f) = (t as u8, f as u8);
        let bytes = match (t < 16, f < 16) {
            (true, true) => vec![(t << 4) | f],
            (true, false) => vec![t << 4, f],
            (false, true) => vec![f, t],
            (false, false) => vec![0, t, f],
        };
        Ok(bytes)
    }
}

impl ByteFormat for FieldHeader {
    fn serialized_length(&self) -> usize {
        match (self.type_code < 16, self.field_code < 16) {
            (true, true) => 1,
            (false, false) => 3,
            _ => 2,
        }
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        let first = Self::read_u8(reader)?;
        let mut type_code = (first >> 4) as u16;
        let mut field_code = (first & 0x0f) as u16;
        if type_code == 0 {
            type_code = Self::read_u8(reader)? as u16;
            if type_code < 16 {
                return Err(SerError::MalformedHeader);
            }
        }
        if field_code == 0 {
            field_code = Self::read_u8(reader)? as u16;
            if field_code < 16 {
                return Err(SerError::MalformedHeader);
            }
        }
        Ok(Self {
            type_code,
            field_code,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_encodes_all_four_forms() {
        let cases = [
            ("TransactionType", "12"),
            ("Account", "81"),
            ("OfferSequence", "2019"),
            ("TickSize", "001010"),
            ("Paths", "0112"),
            ("UNLModifyDisabling", "001011"),
            ("Memos", "F9"),
            ("ArrayEndMarker", "F1"),
            ("ObjectEndMarker", "E1"),
        ];
        for case in cases.iter() {
            let def = definitions::lookup(case.0).unwrap();
            let header = FieldHeader::of(def);
            assert_eq!(header.serialize_hex().unwrap(), case.1, "{}", case.0);
            assert_eq!(header.serialized_length(), case.1.len() / 2);
            let parsed = FieldHeader::deserialize_hex(case.1).unwrap();
            assert_eq!(parsed.definition().unwrap().name, case.0);
        }
    }

    #[test]
    fn it_rejects_non_canonical_headers() {
        // Type 2 in an extended byte, field 4 compact
        match FieldHeader::deserialize_hex("0402") {
            Err(SerError::MalformedHeader) => {}
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
        // Type 2 compact, field 4 in an extended byte
        match FieldHeader::deserialize_hex("2004") {
            Err(SerError::MalformedHeader) => {}
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
        match FieldHeader::deserialize_hex("00") {
            Err(SerError::TruncatedInput) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
    }
}
