use sha2::{Digest, Sha512};
use std::io::{Result as IOResult, Write};

use crate::hashes::marked::{Hash256, MarkedDigest, MarkedDigestWriter};

/// A struct that exposes a SHA-512-half `Write` interface by wrapping an internal SHA-512
/// instance. The digest is the first 32 bytes of the 64-byte SHA-512 output.
///
/// ```
/// # use std::io::{Result};
/// use std::io::Write;
/// use xrpl_core::hashes::{Sha512HalfWriter, MarkedDigestWriter};
///
/// # fn main() -> Result<()> {
/// let mut w = Sha512HalfWriter::default();
/// # let data = [0u8; 32];
///
/// // Writing more than once will update the hasher.
/// w.write_all(&data)?;
///
/// // Call finish to consume the produce the hasher and produce the digest.
/// let digest = w.finish();
/// # Ok(())
/// }
/// ```
#[derive(Default)]
pub struct Sha512HalfWriter {
    internal: Sha512,
}

impl Write for Sha512HalfWriter {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        self.internal.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Hash256> for Sha512HalfWriter {
    fn finish(self) -> Hash256 {
        let full = self.internal.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&full[..32]);
        Hash256::new(digest)
    }
}

/// The first 32 bytes of SHA-512 over `data`.
pub fn sha512_half(data: &[u8]) -> Hash256 {
    let mut w = Sha512HalfWriter::default();
    w.internal.update(data);
    w.finish()
}
