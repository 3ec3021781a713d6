//! The byte buffer every codec writes into, and a scope guard for secret material.

use std::{
    fmt,
    hash::{Hash, Hasher},
    io::{Error as IOError, ErrorKind, Write},
    ops::Deref,
};

use zeroize::Zeroize;

use crate::ser::{SerError, SerResult};

/// A growable byte sequence. Two buffers are equal when their contents are equal, and the
/// hash is computed over the contents only.
///
/// A buffer may be destroyed. Destruction zeroes the contents, drops the length to 0 and is
/// permanent: appending to a destroyed buffer has no effect, and writes through
/// `std::io::Write` fail.
///
/// ```
/// use xrpl_core::buffer::ByteBuffer;
///
/// let mut buf = ByteBuffer::from_hex("00fF").unwrap();
/// buf.append(0x09);
/// assert_eq!(buf.to_hex(), "00FF09");
///
/// buf.destroy();
/// assert_eq!(buf.len(), 0);
/// assert_eq!(buf.to_hex(), "");
/// ```
#[derive(Clone, Default)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    destroyed: bool,
}

impl ByteBuffer {
    /// Copy a buffer from raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        bytes.to_vec().into()
    }

    /// Parse a buffer from hex. Accepts upper, lower and mixed case.
    pub fn from_hex(s: &str) -> SerResult<Self> {
        Ok(hex::decode(s)?.into())
    }

    /// An empty buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A zero-filled buffer of `size` bytes.
    pub fn sized(size: usize) -> Self {
        vec![0u8; size].into()
    }

    /// Append a byte in place. Returns the same buffer.
    pub fn append(&mut self, byte: u8) -> &mut Self {
        if !self.destroyed {
            self.bytes.push(byte);
        }
        self
    }

    /// Append the contents of `other` in place. Returns the same buffer.
    pub fn append_buffer(&mut self, other: &ByteBuffer) -> &mut Self {
        self.extend_from_slice(other.as_slice())
    }

    /// Append a slice in place. Returns the same buffer.
    pub fn extend_from_slice(&mut self, other: &[u8]) -> &mut Self {
        if !self.destroyed {
            self.bytes.extend_from_slice(other);
        }
        self
    }

    /// The byte at `index`.
    pub fn get(&self, index: usize) -> SerResult<u8> {
        self.bytes.get(index).copied().ok_or(SerError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Overwrite the byte at `index`.
    pub fn set(&mut self, index: usize, byte: u8) -> SerResult<()> {
        let len = self.len();
        match self.bytes.get_mut(index) {
            Some(b) => {
                *b = byte;
                Ok(())
            }
            None => Err(SerError::OutOfRange { index, len }),
        }
    }

    /// Copy `[start, end)` into a new, independent buffer.
    pub fn slice(&self, start: usize, end: usize) -> SerResult<ByteBuffer> {
        if end > self.len() {
            return Err(SerError::OutOfRange {
                index: end,
                len: self.len(),
            });
        }
        if start > end {
            return Err(SerError::OutOfRange {
                index: start,
                len: self.len(),
            });
        }
        Ok(Self::of_bytes(&self.bytes[start..end]))
    }

    /// The number of bytes held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Upper-case hex, two characters per byte.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }

    /// Copy the contents out.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Borrow the contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Zero the contents and drop the length to 0. Idempotent.
    pub fn destroy(&mut self) {
        self.bytes.zeroize();
        self.destroyed = true;
    }

    /// True once `destroy` has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for ByteBuffer {}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state)
    }
}

impl PartialOrd for ByteBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteBuffer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Zeroize for ByteBuffer {
    fn zeroize(&mut self) {
        self.destroy()
    }
}

impl Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.destroyed {
            return Err(IOError::new(ErrorKind::Other, "write to destroyed buffer"));
        }
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            destroyed: false,
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::of_bytes(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::str::FromStr for ByteBuffer {
    type Err = SerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteBuffer({})", self.to_hex())
    }
}

impl serde::Serialize for ByteBuffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for ByteBuffer {
    fn deserialize<D>(deserializer: D) -> Result<ByteBuffer, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        ByteBuffer::from_hex(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Owns a buffer of secret material and destroys it when dropped.
///
/// Drop runs on every exit path, including early `?` returns and unwinding, so a key or seed
/// held here never outlives the scope that acquired it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretBuffer(ByteBuffer);

impl SecretBuffer {
    /// Take ownership of secret bytes. The caller's copy should be zeroized separately.
    pub fn new(bytes: &[u8]) -> Self {
        Self(ByteBuffer::of_bytes(bytes))
    }

    /// Destroy the secret before the guard goes out of scope.
    pub fn destroy(&mut self) {
        self.0.destroy()
    }
}

impl Deref for SecretBuffer {
    type Target = ByteBuffer;

    fn deref(&self) -> &ByteBuffer {
        &self.0
    }
}

impl From<ByteBuffer> for SecretBuffer {
    fn from(buf: ByteBuffer) -> Self {
        Self(buf)
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        self.0.destroy()
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer({} bytes, redacted)", self.0.len())
    }
}
