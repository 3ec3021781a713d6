//! The table-driven canonical serializer.
//!
//! Fields are always written in `(type code, field code)` order, whatever order they were
//! inserted in. Signing serializes the same object with the non-signing fields dropped.

use std::io::{Cursor, Write};

use tracing::{debug, trace};

use crate::{
    buffer::ByteBuffer,
    hashes::{Hash256, HashPrefix, MarkedDigestWriter, Sha512HalfWriter},
    ser::{SerError, SerResult},
    types::{read_field_definition, StObject},
};

/// Options for `serialize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Drop top-level fields that are excluded from signing
    pub signing_fields_only: bool,
}

impl SerializeOptions {
    /// Serialize everything
    pub const ALL: SerializeOptions = SerializeOptions {
        signing_fields_only: false,
    };

    /// Serialize the signing fields only
    pub const SIGNING: SerializeOptions = SerializeOptions {
        signing_fields_only: true,
    };
}

/// Serialize `fields` into canonical bytes.
pub fn serialize(fields: &StObject, options: &SerializeOptions) -> SerResult<ByteBuffer> {
    let mut buf = ByteBuffer::empty();
    let written = fields.write_fields(&mut buf, options.signing_fields_only)?;
    trace!(
        fields = fields.len(),
        bytes = written,
        signing_only = options.signing_fields_only,
        "serialized object"
    );
    Ok(buf)
}

/// Serialize `fields` with the non-signing fields dropped.
pub fn serialize_for_signing(fields: &StObject) -> SerResult<ByteBuffer> {
    serialize(fields, &SerializeOptions::SIGNING)
}

/// Serialize all of `fields` into upper-case hex. This is the `tx_blob` form.
pub fn serialize_hex(fields: &StObject) -> SerResult<String> {
    Ok(serialize(fields, &SerializeOptions::ALL)?.to_hex())
}

/// Parse canonical bytes into an object, reading header/value pairs until the input is
/// exhausted. Fields must be in canonical order with no repeats, so every object has exactly
/// one accepted encoding.
pub fn deserialize(buffer: &ByteBuffer) -> SerResult<StObject> {
    let bytes = buffer.as_slice();
    let mut reader = Cursor::new(bytes);
    let mut object = StObject::new();
    let mut previous = None;
    while (reader.position() as usize) < bytes.len() {
        let def = read_field_definition(&mut reader)?;
        object.read_decoded_field(&mut reader, def, &mut previous, 0)?;
        trace!(field = def.name, offset = reader.position(), "decoded field");
    }
    debug!(fields = object.len(), bytes = bytes.len(), "deserialized object");
    Ok(object)
}

/// Parse hex into an object. Either case is accepted.
pub fn deserialize_hex(s: &str) -> SerResult<StObject> {
    deserialize(&ByteBuffer::from_hex(s)?)
}

/// `sha512_half(prefix || bytes)`
pub fn prefixed_hash(prefix: HashPrefix, bytes: &[u8]) -> SerResult<Hash256> {
    let mut w = Sha512HalfWriter::default();
    w.write_all(&prefix.bytes()).map_err(SerError::from)?;
    w.write_all(bytes).map_err(SerError::from)?;
    Ok(w.finish())
}

/// The transaction ID: `sha512_half(TXN\0 || serialize(fields))`.
pub fn hash_transaction(fields: &StObject) -> SerResult<Hash256> {
    let bytes = serialize(fields, &SerializeOptions::ALL)?;
    let hash = prefixed_hash(HashPrefix::TransactionId, bytes.as_slice())?;
    debug!(hash = %hash, "hashed transaction");
    Ok(hash)
}
