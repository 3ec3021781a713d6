//! Useful macros for implementing ledger types

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self)
                    .map_err(|e| serde::ser::Error::custom(e.to_string()))?;
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Wrap a length-prefixed vector of bytes (`u8`) in a newtype, and implement convenience
/// functions for it. The wrapped bytes are serialized with the three-band length prefix.
macro_rules! wrap_prefixed_byte_vector {
    (
        $(#[$outer:meta])*
        $wrapper_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
        pub struct $wrapper_name(Vec<u8>);

        impl $crate::ser::ByteFormat for $wrapper_name {
            fn serialized_length(&self) -> usize {
                let prefix = $crate::ser::prefix_byte_len(self.len()).unwrap_or(0);
                prefix + self.len()
            }

            fn read_from<R>(reader: &mut R) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read
            {
                Ok($crate::ser::read_prefix_vec(reader)?.into())
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write
            {
                $crate::ser::write_prefix_vec(writer, &self.0)
            }
        }

        impl std::convert::AsRef<[u8]> for $wrapper_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $wrapper_name {
            /// Instantate a new wrapped vector
            pub fn new(v: Vec<u8>) -> Self {
                Self(v)
            }

            /// Construct an empty wrapped vector instance.
            pub fn null() -> Self {
                Self(vec![])
            }

            /// Parse the unprefixed bytes from a hex string.
            pub fn from_hex(s: &str) -> $crate::ser::SerResult<Self> {
                Ok(Self($crate::hex::decode(s)?))
            }

            /// The unprefixed bytes as upper-case hex.
            pub fn to_hex(&self) -> String {
                $crate::hex::encode_upper(&self.0)
            }

            /// Return a reference to the underlying bytes
            pub fn items(&self) -> &[u8] {
                &self.0
            }

            /// Return the length of the item vector.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Return true if the length of the item vector is 0.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }

        impl From<&[u8]> for $wrapper_name {
            fn from(v: &[u8]) -> Self {
                Self(v.to_vec())
            }
        }

        impl From<Vec<u8>> for $wrapper_name {
            fn from(v: Vec<u8>) -> Self {
                Self(v)
            }
        }

        impl From<$crate::buffer::ByteBuffer> for $wrapper_name {
            fn from(v: $crate::buffer::ByteBuffer) -> Self {
                Self(v.to_bytes())
            }
        }

        impl From<$wrapper_name> for $crate::buffer::ByteBuffer {
            fn from(v: $wrapper_name) -> Self {
                v.0.into()
            }
        }

        impl serde::Serialize for $wrapper_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $wrapper_name {
            fn deserialize<D>(deserializer: D) -> Result<$wrapper_name, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                $wrapper_name::from_hex(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    }
}

#[macro_export]
/// Make a new fixed-width hash type. These are raw bytes on the wire, with no length prefix.
macro_rules! mark_hash {
    (
        $(#[$outer:meta])*
        $hash_name:ident, $len:expr
    ) => {
        $(#[$outer])*
        #[derive(Hash, Copy, Clone, Default, Eq, PartialEq, PartialOrd, Ord)]
        pub struct $hash_name(pub [u8; $len]);

        impl $hash_name {
            /// The width of the hash in bytes
            pub const LENGTH: usize = $len;

            /// Copy a hash out of a slice of exactly `LENGTH` bytes
            pub fn from_slice(s: &[u8]) -> $crate::ser::SerResult<Self> {
                if s.len() != $len {
                    return Err($crate::ser::SerError::WrongLength { expected: $len, got: s.len() });
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(s);
                Ok(Self(buf))
            }

            /// Parse from hex, either case
            pub fn from_hex(s: &str) -> $crate::ser::SerResult<Self> {
                Self::from_slice(&$crate::hex::decode(s)?)
            }

            /// Render as upper-case hex
            pub fn to_hex(&self) -> String {
                $crate::hex::encode_upper(self.0)
            }

            /// Return a reference to the underlying bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $hash_name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $hash_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl std::fmt::Display for $hash_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $hash_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($hash_name), self.to_hex())
            }
        }

        impl std::str::FromStr for $hash_name {
            type Err = $crate::ser::SerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl $crate::ser::ByteFormat for $hash_name {
            fn serialized_length(&self) -> usize {
                $len
            }

            fn read_from<R>(reader: &mut R) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
                Self: std::marker::Sized
            {
                let mut buf = [0u8; $len];
                reader.read_exact(&mut buf)?;
                Ok(Self(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write
            {
                writer.write_all(&self.0)?;
                Ok($len)
            }
        }

        impl $crate::hashes::MarkedDigest for $hash_name {
            type Digest = [u8; $len];

            fn new(hash: [u8; $len]) -> Self {
                Self(hash)
            }

            fn internal(&self) -> [u8; $len] {
                self.0
            }

            fn bytes(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        $crate::impl_hex_serde!($hash_name);
    }
}
