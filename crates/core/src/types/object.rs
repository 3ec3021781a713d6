use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use crate::{
    definitions::{
        self,
        fields::{ARRAY_END_MARKER, OBJECT_END_MARKER},
        FieldDefinition, TypeCode,
    },
    ser::{ByteFormat, SerError, SerResult},
    types::{AccountId, Amount, Blob, FieldHeader, FieldValue},
};

const OBJECT_END_BYTE: u8 = 0xE1;
const ARRAY_END_BYTE: u8 = 0xF1;

/// The deepest level of nested objects and arrays the decoder accepts. The top-level object
/// is depth 0.
pub const MAX_NESTING_DEPTH: usize = 10;

fn is_end_marker(name: &str) -> bool {
    name == OBJECT_END_MARKER || name == ARRAY_END_MARKER
}

fn check_depth(depth: usize) -> SerResult<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(SerError::NestingTooDeep(MAX_NESTING_DEPTH));
    }
    Ok(())
}

/// Read a field header and resolve it against the field table.
pub fn read_field_definition<R: Read>(reader: &mut R) -> SerResult<&'static FieldDefinition> {
    FieldHeader::read_from(reader)?.definition()
}

/// A map from field name to typed value.
///
/// Insertion checks the name against the field table and the value against the field's type.
/// Insertion order is irrelevant. Serialization always writes fields in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StObject {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl StObject {
    /// An empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing and returning any previous value.
    pub fn insert<V>(&mut self, name: &str, value: V) -> SerResult<Option<FieldValue>>
    where
        V: Into<FieldValue>,
    {
        let def = definitions::lookup(name)?;
        if is_end_marker(def.name) {
            return Err(SerError::MisplacedEndMarker(def.name));
        }
        let value = value.into();
        if value.type_code() != def.type_code {
            return Err(SerError::TypeMismatch {
                field: def.name,
                expected: def.type_name(),
                got: value.type_code().name(),
            });
        }
        Ok(self.fields.insert(def.name, value))
    }

    /// Builder-style `insert`
    pub fn with<V>(mut self, name: &str, value: V) -> SerResult<Self>
    where
        V: Into<FieldValue>,
    {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Read the value of `def` and add it. Fields must arrive in strictly increasing canonical
    /// order, so `previous` is the last field decoded at this level.
    pub(crate) fn read_decoded_field<R>(
        &mut self,
        reader: &mut R,
        def: &'static FieldDefinition,
        previous: &mut Option<&'static FieldDefinition>,
        depth: usize,
    ) -> SerResult<()>
    where
        R: Read,
    {
        if is_end_marker(def.name) {
            return Err(SerError::MisplacedEndMarker(def.name));
        }
        if let Some(prev) = *previous {
            if prev.ordinal() == def.ordinal() {
                return Err(SerError::DuplicateField(def.name));
            }
            if prev.ordinal() > def.ordinal() {
                return Err(SerError::NonCanonicalOrder {
                    field: def.name,
                    previous: prev.name,
                });
            }
        }
        let value = FieldValue::read_nested(def.type_code, reader, depth)?;
        self.fields.insert(def.name, value);
        *previous = Some(def);
        Ok(())
    }

    /// Read an object body up to its end marker. `depth` is the object's own depth.
    pub(crate) fn read_nested<R>(reader: &mut R, depth: usize) -> SerResult<Self>
    where
        R: Read,
    {
        check_depth(depth)?;
        let mut object = StObject::new();
        let mut previous = None;
        loop {
            let def = read_field_definition(reader)?;
            if def.name == OBJECT_END_MARKER {
                return Ok(object);
            }
            object.read_decoded_field(reader, def, &mut previous, depth)?;
        }
    }

    /// Remove a field
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// The value of a field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// True if the field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Iterate over `(name, value)` pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// A `UInt32` field
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        match self.get(name)? {
            FieldValue::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// A `UInt16` field
    pub fn get_u16(&self, name: &str) -> Option<u16> {
        match self.get(name)? {
            FieldValue::UInt16(v) => Some(*v),
            _ => None,
        }
    }

    /// An `Amount` field
    pub fn get_amount(&self, name: &str) -> Option<&Amount> {
        match self.get(name)? {
            FieldValue::Amount(v) => Some(v),
            _ => None,
        }
    }

    /// An `AccountID` field
    pub fn get_account(&self, name: &str) -> Option<&AccountId> {
        match self.get(name)? {
            FieldValue::AccountId(v) => Some(v),
            _ => None,
        }
    }

    /// A `Blob` field
    pub fn get_blob(&self, name: &str) -> Option<&Blob> {
        match self.get(name)? {
            FieldValue::Blob(v) => Some(v),
            _ => None,
        }
    }

    /// An `STArray` field
    pub fn get_array(&self, name: &str) -> Option<&StArray> {
        match self.get(name)? {
            FieldValue::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Write every serialized field in canonical order, without an end marker. With
    /// `signing_only`, fields excluded from signing are skipped. The filter applies to this
    /// level only.
    pub fn write_fields<W>(&self, writer: &mut W, signing_only: bool) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = 0;
        for def in definitions::canonical_order(self.names())? {
            if !def.is_serialized || (signing_only && !def.is_signing_field) {
                continue;
            }
            if let Some(value) = self.fields.get(def.name) {
                len += FieldHeader::of(def).write_to(writer)?;
                len += value.write_to(writer)?;
            }
        }
        Ok(len)
    }
}

impl ByteFormat for StObject {
    fn serialized_length(&self) -> usize {
        let body: usize = self
            .fields
            .iter()
            .filter_map(|(name, value)| {
                let def = definitions::lookup(name).ok()?;
                if !def.is_serialized {
                    return None;
                }
                Some(FieldHeader::of(def).serialized_length() + value.serialized_length())
            })
            .sum();
        body + 1
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Self::read_nested(reader, 1)
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let len = self.write_fields(writer, false)?;
        writer.write_all(&[OBJECT_END_BYTE])?;
        Ok(len + 1)
    }
}

/// An ordered list of objects, each wrapped in a named `STObject` field, e.g.
/// `Signer -> {Account, SigningPubKey, TxnSignature}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StArray(Vec<(&'static str, StObject)>);

impl StArray {
    /// An empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. The wrapper must be an `STObject` field.
    pub fn push(&mut self, wrapper: &str, object: StObject) -> SerResult<()> {
        let def = definitions::lookup(wrapper)?;
        if is_end_marker(def.name) {
            return Err(SerError::MisplacedEndMarker(def.name));
        }
        if def.type_code != TypeCode::StObject {
            return Err(SerError::TypeMismatch {
                field: def.name,
                expected: TypeCode::StObject.name(),
                got: def.type_name(),
            });
        }
        self.0.push((def.name, object));
        Ok(())
    }

    /// Builder-style `push`
    pub fn with(mut self, wrapper: &str, object: StObject) -> SerResult<Self> {
        self.push(wrapper, object)?;
        Ok(self)
    }

    /// The elements, in order
    pub fn elements(&self) -> &[(&'static str, StObject)] {
        &self.0
    }

    /// The number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no elements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read array elements up to the array end marker. `depth` is the array's own depth.
    pub(crate) fn read_nested<R>(reader: &mut R, depth: usize) -> SerResult<Self>
    where
        R: Read,
    {
        check_depth(depth)?;
        let mut array = StArray::new();
        loop {
            let def = read_field_definition(reader)?;
            if def.name == ARRAY_END_MARKER {
                return Ok(array);
            }
            if def.name == OBJECT_END_MARKER {
                return Err(SerError::MisplacedEndMarker(def.name));
            }
            if def.type_code != TypeCode::StObject {
                return Err(SerError::TypeMismatch {
                    field: def.name,
                    expected: TypeCode::StObject.name(),
                    got: def.type_name(),
                });
            }
            array.0.push((def.name, StObject::read_nested(reader, depth + 1)?));
        }
    }
}

impl ByteFormat for StArray {
    fn serialized_length(&self) -> usize {
        let body: usize = self
            .0
            .iter()
            .map(|(wrapper, object)| {
                let header = definitions::lookup(wrapper)
                    .map(|d| FieldHeader::of(d).serialized_length())
                    .unwrap_or(1);
                header + object.serialized_length()
            })
            .sum();
        body + 1
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Self::read_nested(reader, 1)
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = 0;
        for (wrapper, object) in self.0.iter() {
            len += FieldHeader::of(definitions::lookup(wrapper)?).write_to(writer)?;
            len += object.write_to(writer)?;
        }
        writer.write_all(&[ARRAY_END_BYTE])?;
        Ok(len + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn memo() -> StObject {
        StObject::new()
            .with("MemoType", Blob::from(&b"text"[..]))
            .unwrap()
            .with("MemoData", Blob::from(&b"hi"[..]))
            .unwrap()
    }

    #[test]
    fn it_checks_names_and_types_on_insert() {
        let mut obj = StObject::new();
        match obj.insert("Nope", 1u32) {
            Err(SerError::UnknownField(_)) => {}
            other => panic!("expected UnknownField, got {:?}", other),
        }
        match obj.insert("Sequence", 1u16) {
            Err(SerError::TypeMismatch {
                field: "Sequence",
                expected: "UInt32",
                got: "UInt16",
            }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
        assert!(obj.insert("Sequence", 1u32).unwrap().is_none());
        assert_eq!(obj.insert("Sequence", 2u32).unwrap(), Some(FieldValue::UInt32(1)));
        assert_eq!(obj.get_u32("Sequence"), Some(2));
    }

    #[test]
    fn it_writes_nested_objects_with_end_markers() {
        let hex = memo().serialize_hex().unwrap();
        assert_eq!(hex, "7C04746578747D026869E1");
        assert_eq!(StObject::deserialize_hex(&hex).unwrap(), memo());
    }

    #[test]
    fn it_writes_arrays_of_wrapped_objects() {
        let memos = StArray::new().with("Memo", memo()).unwrap();
        let hex = memos.serialize_hex().unwrap();
        assert_eq!(hex, "EA7C04746578747D026869E1F1");
        assert_eq!(memos.serialized_length(), hex.len() / 2);
        let back = StArray::deserialize_hex(&hex).unwrap();
        assert_eq!(back.elements()[0].0, "Memo");
        assert_eq!(back, memos);
    }

    #[test]
    fn it_rejects_non_object_array_elements() {
        assert!(StArray::new().push("Account", StObject::new()).is_err());
        // A UInt32 header inside an array
        match StArray::deserialize_hex("2400000001F1") {
            Err(SerError::TypeMismatch { .. }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
        match StObject::deserialize_hex("7C0474657874") {
            Err(SerError::TruncatedInput) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_duplicate_and_unordered_fields() {
        // MemoData twice
        match StObject::deserialize_hex("7D01617D0162E1") {
            Err(SerError::DuplicateField("MemoData")) => {}
            other => panic!("expected DuplicateField, got {:?}", other),
        }
        // MemoData before MemoType
        match StObject::deserialize_hex("7D0268697C0474657874E1") {
            Err(SerError::NonCanonicalOrder {
                field: "MemoType",
                previous: "MemoData",
            }) => {}
            other => panic!("expected NonCanonicalOrder, got {:?}", other),
        }
    }

    #[test]
    fn it_keeps_end_markers_out_of_containers() {
        let mut obj = StObject::new();
        match obj.insert(OBJECT_END_MARKER, StObject::new()) {
            Err(SerError::MisplacedEndMarker("ObjectEndMarker")) => {}
            other => panic!("expected MisplacedEndMarker, got {:?}", other),
        }
        match obj.insert(ARRAY_END_MARKER, StArray::new()) {
            Err(SerError::MisplacedEndMarker("ArrayEndMarker")) => {}
            other => panic!("expected MisplacedEndMarker, got {:?}", other),
        }
        match StArray::new().push(OBJECT_END_MARKER, StObject::new()) {
            Err(SerError::MisplacedEndMarker("ObjectEndMarker")) => {}
            other => panic!("expected MisplacedEndMarker, got {:?}", other),
        }

        // An array end inside an object, and an object end inside an array
        match StObject::deserialize_hex("7D0178F1") {
            Err(SerError::MisplacedEndMarker("ArrayEndMarker")) => {}
            other => panic!("expected MisplacedEndMarker, got {:?}", other),
        }
        match StArray::deserialize_hex("E1F1") {
            Err(SerError::MisplacedEndMarker("ObjectEndMarker")) => {}
            other => panic!("expected MisplacedEndMarker, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_excessive_nesting() {
        // A chain of Memo objects, each holding the next
        let nested = |levels: usize| {
            let mut hex = "EA".repeat(levels);
            hex.push_str(&"E1".repeat(levels + 1));
            hex
        };
        assert!(StObject::deserialize_hex(&nested(MAX_NESTING_DEPTH - 1)).is_ok());
        match StObject::deserialize_hex(&nested(MAX_NESTING_DEPTH)) {
            Err(SerError::NestingTooDeep(MAX_NESTING_DEPTH)) => {}
            other => panic!("expected NestingTooDeep, got {:?}", other),
        }

        let mut hostile = vec![0xEAu8; 200_000];
        hostile.push(0xE1);
        match StObject::deserialize_hex(&hex::encode(&hostile)) {
            Err(SerError::NestingTooDeep(_)) => {}
            other => panic!("expected NestingTooDeep, got {:?}", other),
        }
    }
}
