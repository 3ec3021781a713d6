use der::{
    asn1::{ContextSpecificRef, OctetStringRef},
    Decode, DecodeValue, Encode, EncodeValue, FixedTag, Header, Length, Reader, Sequence,
    SliceReader, Tag, TagMode, TagNumber, Writer,
};
use sha2::{Digest, Sha256};

use crate::{TxError, TxResult};

/// Wrap `value` in an implicit context-specific tag
fn implicit<T>(value: &T, number: TagNumber) -> ContextSpecificRef<'_, T> {
    ContextSpecificRef {
        tag_number: number,
        tag_mode: TagMode::Implicit,
        value,
    }
}

/// Read a field carrying exactly the implicit tag `[number]`. Skipped or repeated fields are
/// an error.
fn read_implicit<'a, T, R>(reader: &mut R, number: TagNumber) -> der::Result<T>
where
    T: DecodeValue<'a> + FixedTag,
    R: Reader<'a>,
{
    let header = Header::decode(reader)?;
    header.tag.assert_eq(Tag::ContextSpecific {
        constructed: T::TAG.is_constructed(),
        number,
    })?;
    T::decode_value(reader, header)
}

/// Decode a whole `[0] IMPLICIT SEQUENCE` with no trailing bytes
fn decode_top<'a, T>(der: &'a [u8]) -> der::Result<T>
where
    T: Sequence<'a>,
{
    let mut reader = SliceReader::new(der)?;
    let body = read_implicit(&mut reader, TagNumber::N0)?;
    reader.finish(body)
}

/// `SEQUENCE { preimage [0] IMPLICIT OCTET STRING }`
struct FulfillmentBody<'a> {
    preimage: OctetStringRef<'a>,
}

impl<'a> DecodeValue<'a> for FulfillmentBody<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                preimage: read_implicit(reader, TagNumber::N0)?,
            })
        })
    }
}

impl EncodeValue for FulfillmentBody<'_> {
    fn value_len(&self) -> der::Result<Length> {
        implicit(&self.preimage, TagNumber::N0).encoded_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        implicit(&self.preimage, TagNumber::N0).encode(writer)
    }
}

impl<'a> Sequence<'a> for FulfillmentBody<'a> {}

/// `SEQUENCE { fingerprint [0] IMPLICIT OCTET STRING, cost [1] IMPLICIT INTEGER }`
struct ConditionBody<'a> {
    fingerprint: OctetStringRef<'a>,
    cost: u64,
}

impl<'a> DecodeValue<'a> for ConditionBody<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let fingerprint = read_implicit(reader, TagNumber::N0)?;
            let cost = read_implicit(reader, TagNumber::N1)?;
            Ok(Self { fingerprint, cost })
        })
    }
}

impl EncodeValue for ConditionBody<'_> {
    fn value_len(&self) -> der::Result<Length> {
        implicit(&self.fingerprint, TagNumber::N0).encoded_len()?
            + implicit(&self.cost, TagNumber::N1).encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        implicit(&self.fingerprint, TagNumber::N0).encode(writer)?;
        implicit(&self.cost, TagNumber::N1).encode(writer)
    }
}

impl<'a> Sequence<'a> for ConditionBody<'a> {}

/// A PREIMAGE-SHA-256 fulfillment. Reveals the preimage whose hash is the condition.
#[derive(Clone, PartialEq, Eq)]
pub struct PreimageSha256Fulfillment {
    preimage: Vec<u8>,
}

impl std::fmt::Debug for PreimageSha256Fulfillment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PreimageSha256Fulfillment({} bytes)", self.preimage.len())
    }
}

impl PreimageSha256Fulfillment {
    /// Wrap a preimage
    pub fn new(preimage: impl Into<Vec<u8>>) -> Self {
        Self {
            preimage: preimage.into(),
        }
    }

    /// The preimage
    pub fn preimage(&self) -> &[u8] {
        &self.preimage
    }

    /// The cost of the fulfillment, which is the preimage length
    pub fn cost(&self) -> u64 {
        self.preimage.len() as u64
    }

    /// The condition this fulfillment satisfies
    pub fn condition(&self) -> PreimageSha256Condition {
        let mut fingerprint = [0u8; 32];
        fingerprint.copy_from_slice(&Sha256::digest(&self.preimage));
        PreimageSha256Condition {
            fingerprint,
            cost: self.cost(),
        }
    }

    /// DER encoding: `A0 len 80 len preimage`
    pub fn to_der(&self) -> TxResult<Vec<u8>> {
        let body = FulfillmentBody {
            preimage: OctetStringRef::new(&self.preimage)?,
        };
        Ok(implicit(&body, TagNumber::N0).to_der()?)
    }

    /// Parse the DER encoding. Trailing bytes are an error.
    pub fn from_der(der: &[u8]) -> TxResult<Self> {
        let body: FulfillmentBody<'_> = decode_top(der)?;
        Ok(Self::new(body.preimage.as_bytes()))
    }

    /// Upper-case hex of the DER encoding
    pub fn to_hex(&self) -> TxResult<String> {
        Ok(hex::encode_upper(self.to_der()?))
    }
}

/// A PREIMAGE-SHA-256 condition: the SHA-256 fingerprint of a preimage and its cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreimageSha256Condition {
    fingerprint: [u8; 32],
    cost: u64,
}

impl PreimageSha256Condition {
    /// Assemble a condition from its parts
    pub fn new(fingerprint: [u8; 32], cost: u64) -> Self {
        Self { fingerprint, cost }
    }

    /// The SHA-256 of the preimage
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    /// The preimage length
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// True if `fulfillment` satisfies this condition
    pub fn is_fulfilled_by(&self, fulfillment: &PreimageSha256Fulfillment) -> bool {
        fulfillment.condition() == *self
    }

    /// DER encoding: `A0 len 80 20 fingerprint 81 len cost`
    pub fn to_der(&self) -> TxResult<Vec<u8>> {
        let body = ConditionBody {
            fingerprint: OctetStringRef::new(&self.fingerprint)?,
            cost: self.cost,
        };
        Ok(implicit(&body, TagNumber::N0).to_der()?)
    }

    /// Parse the DER encoding. Trailing bytes are an error.
    pub fn from_der(der: &[u8]) -> TxResult<Self> {
        let body: ConditionBody<'_> = decode_top(der)?;
        let fingerprint: [u8; 32] = body.fingerprint.as_bytes().try_into().map_err(|_| {
            TxError::MalformedCondition("fingerprint is not 32 bytes".to_owned())
        })?;
        Ok(Self {
            fingerprint,
            cost: body.cost,
        })
    }

    /// Upper-case hex of the DER encoding
    pub fn to_hex(&self) -> TxResult<String> {
        Ok(hex::encode_upper(self.to_der()?))
    }
}
