wrap_prefixed_byte_vector!(
    /// Arbitrary length-prefixed bytes. Public keys, signatures, memo contents and the like.
    Blob
);
