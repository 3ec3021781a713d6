//! Marker traits for digests and digest writers, and the fixed-width hash types.

/// A marked digest wraps the raw digest bytes in a newtype.
pub trait MarkedDigest: Default + Copy + Eq {
    /// The underlying digest type
    type Digest;

    /// Wrap a raw digest
    fn new(hash: Self::Digest) -> Self;

    /// Return a copy of the raw digest
    fn internal(&self) -> Self::Digest;

    /// Return the digest as a byte vector
    fn bytes(&self) -> Vec<u8>;
}

/// A `Write` that produces a digest when finished.
pub trait MarkedDigestWriter<T>: std::io::Write {
    /// Consume the writer and produce the digest of everything written to it.
    fn finish(self) -> T;
}

mark_hash!(
    /// A 128-bit hash, e.g. an email hash on an account root.
    Hash128,
    16
);

mark_hash!(
    /// A 160-bit hash, e.g. a currency code or a book directory taker key.
    Hash160,
    20
);

mark_hash!(
    /// A 256-bit hash. Transaction IDs, ledger object keys and signing digests.
    Hash256,
    32
);
