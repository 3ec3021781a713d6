use std::fmt;

/// Domain separators prepended to data before hashing. Each is three ASCII characters followed
/// by a zero byte, so a digest computed for one purpose can never collide with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashPrefix {
    /// `TXN\0`. Transaction ID.
    TransactionId,
    /// `SND\0`. Transaction plus metadata, as stored in a ledger.
    TransactionNode,
    /// `MIN\0`. Inner node of the state tree.
    InnerNode,
    /// `MLN\0`. Leaf node of the state tree.
    LeafNode,
    /// `STX\0`. Single-signing data.
    TransactionSign,
    /// `SMT\0`. Multi-signing data.
    TransactionMultiSign,
    /// `LWR\0`. Ledger header.
    LedgerMaster,
    /// `VAL\0`. Validation.
    Validation,
    /// `PRP\0`. Consensus proposal.
    Proposal,
    /// `MAN\0`. Validator manifest.
    Manifest,
    /// `CLM\0`. Payment channel claim.
    PaymentChannelClaim,
}

impl HashPrefix {
    /// The prefix as a big-endian integer.
    pub const fn code(&self) -> u32 {
        match self {
            HashPrefix::TransactionId => 0x54584E00,
            HashPrefix::TransactionNode => 0x534E4400,
            HashPrefix::InnerNode => 0x4D494E00,
            HashPrefix::LeafNode => 0x4D4C4E00,
            HashPrefix::TransactionSign => 0x53545800,
            HashPrefix::TransactionMultiSign => 0x534D5400,
            HashPrefix::LedgerMaster => 0x4C575200,
            HashPrefix::Validation => 0x56414C00,
            HashPrefix::Proposal => 0x50525000,
            HashPrefix::Manifest => 0x4D414E00,
            HashPrefix::PaymentChannelClaim => 0x434C4D00,
        }
    }

    /// The 4 bytes written ahead of the hashed data.
    pub const fn bytes(&self) -> [u8; 4] {
        self.code().to_be_bytes()
    }
}

impl fmt::Display for HashPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes();
        write!(f, "{}{}{}\\0", b[0] as char, b[1] as char, b[2] as char)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_spells_ascii_prefixes() {
        let cases = [
            (HashPrefix::TransactionId, *b"TXN\0"),
            (HashPrefix::TransactionNode, *b"SND\0"),
            (HashPrefix::InnerNode, *b"MIN\0"),
            (HashPrefix::LeafNode, *b"MLN\0"),
            (HashPrefix::TransactionSign, *b"STX\0"),
            (HashPrefix::TransactionMultiSign, *b"SMT\0"),
            (HashPrefix::LedgerMaster, *b"LWR\0"),
            (HashPrefix::Validation, *b"VAL\0"),
            (HashPrefix::Proposal, *b"PRP\0"),
            (HashPrefix::Manifest, *b"MAN\0"),
            (HashPrefix::PaymentChannelClaim, *b"CLM\0"),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.bytes(), case.1);
        }
        assert_eq!(HashPrefix::TransactionSign.to_string(), "STX\\0");
    }
}
