//! The field definition registry.
//!
//! Every serializable field has a type code and a field code (`nth`). The pair defines the
//! canonical order in which fields are serialized, and the 1-3 byte field header that precedes
//! each value on the wire. The table is static and indexed once, on first use.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;

use crate::ser::{SerError, SerResult};

/// The protocol's transaction, ledger entry and result code tables
pub mod codes;

/// The static field table
pub mod fields;

pub use codes::*;

/// The protocol type of a field. The discriminant is the wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCode {
    /// 16-bit unsigned integer
    UInt16 = 1,
    /// 32-bit unsigned integer
    UInt32 = 2,
    /// 64-bit unsigned integer
    UInt64 = 3,
    /// 128-bit hash
    Hash128 = 4,
    /// 256-bit hash
    Hash256 = 5,
    /// Native or issued currency amount
    Amount = 6,
    /// Length-prefixed bytes
    Blob = 7,
    /// Length-prefixed 160-bit account identifier
    AccountId = 8,
    /// Nested object, terminated by an end marker
    StObject = 14,
    /// Array of wrapped objects, terminated by an end marker
    StArray = 15,
    /// 8-bit unsigned integer
    UInt8 = 16,
    /// 160-bit hash
    Hash160 = 17,
    /// Set of payment paths
    PathSet = 18,
    /// Length-prefixed list of 256-bit hashes
    Vector256 = 19,
}

impl TypeCode {
    /// The wire type code
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// The protocol's name for the type
    pub const fn name(&self) -> &'static str {
        match self {
            TypeCode::UInt16 => "UInt16",
            TypeCode::UInt32 => "UInt32",
            TypeCode::UInt64 => "UInt64",
            TypeCode::Hash128 => "Hash128",
            TypeCode::Hash256 => "Hash256",
            TypeCode::Amount => "Amount",
            TypeCode::Blob => "Blob",
            TypeCode::AccountId => "AccountID",
            TypeCode::StObject => "STObject",
            TypeCode::StArray => "STArray",
            TypeCode::UInt8 => "UInt8",
            TypeCode::Hash160 => "Hash160",
            TypeCode::PathSet => "PathSet",
            TypeCode::Vector256 => "Vector256",
        }
    }

    /// Look up a type by its wire code
    pub fn from_code(code: u16) -> Option<Self> {
        let t = match code {
            1 => TypeCode::UInt16,
            2 => TypeCode::UInt32,
            3 => TypeCode::UInt64,
            4 => TypeCode::Hash128,
            5 => TypeCode::Hash256,
            6 => TypeCode::Amount,
            7 => TypeCode::Blob,
            8 => TypeCode::AccountId,
            14 => TypeCode::StObject,
            15 => TypeCode::StArray,
            16 => TypeCode::UInt8,
            17 => TypeCode::Hash160,
            18 => TypeCode::PathSet,
            19 => TypeCode::Vector256,
            _ => return None,
        };
        Some(t)
    }

    /// True if values of this type carry a length prefix
    pub const fn is_vl_encoded(&self) -> bool {
        matches!(self, TypeCode::Blob | TypeCode::AccountId | TypeCode::Vector256)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    /// The field name, e.g. `"Account"`
    pub name: &'static str,
    /// The protocol type of the field's values
    pub type_code: TypeCode,
    /// The field code, unique within the type
    pub nth: u16,
    /// True if the value carries a length prefix
    pub is_vl_encoded: bool,
    /// False for presentation-only fields that never appear on the wire
    pub is_serialized: bool,
    /// False for fields excluded from the signing digest
    pub is_signing_field: bool,
}

impl FieldDefinition {
    /// The canonical sort key: `(type code, field code)`
    pub const fn ordinal(&self) -> (u16, u16) {
        (self.type_code.code(), self.nth)
    }

    /// The name of the field's type
    pub const fn type_name(&self) -> &'static str {
        self.type_code.name()
    }
}

static BY_NAME: Lazy<HashMap<&'static str, &'static FieldDefinition>> =
    Lazy::new(|| fields::FIELDS.iter().map(|f| (f.name, f)).collect());

static BY_CODE: Lazy<HashMap<(u16, u16), &'static FieldDefinition>> = Lazy::new(|| {
    fields::FIELDS
        .iter()
        .filter(|f| f.is_serialized)
        .map(|f| (f.ordinal(), f))
        .collect()
});

/// Look up a field by name.
pub fn lookup(name: &str) -> SerResult<&'static FieldDefinition> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| SerError::UnknownField(name.to_owned()))
}

/// Look up a serialized field by its `(type code, field code)` pair.
pub fn lookup_code(type_code: u16, field_code: u16) -> SerResult<&'static FieldDefinition> {
    BY_CODE
        .get(&(type_code, field_code))
        .copied()
        .ok_or(SerError::UnknownFieldCode {
            type_code,
            field_code,
        })
}

/// Resolve `names` and sort them into canonical order. Fails on the first unknown name.
pub fn canonical_order<'a, I>(names: I) -> SerResult<Vec<&'static FieldDefinition>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut defs = names
        .into_iter()
        .map(lookup)
        .collect::<SerResult<Vec<_>>>()?;
    defs.sort_by_key(|f| f.ordinal());
    Ok(defs)
}
