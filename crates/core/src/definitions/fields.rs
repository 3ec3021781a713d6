use super::{FieldDefinition, TypeCode};
use TypeCode::*;

const fn field(name: &'static str, type_code: TypeCode, nth: u16) -> FieldDefinition {
    FieldDefinition {
        name,
        type_code,
        nth,
        is_vl_encoded: type_code.is_vl_encoded(),
        is_serialized: true,
        is_signing_field: true,
    }
}

// Serialized, but excluded from the signing digest.
const fn unsigned(name: &'static str, type_code: TypeCode, nth: u16) -> FieldDefinition {
    FieldDefinition {
        is_signing_field: false,
        ..field(name, type_code, nth)
    }
}

// Present in JSON responses only.
const fn presentation(name: &'static str, type_code: TypeCode, nth: u16) -> FieldDefinition {
    FieldDefinition {
        is_serialized: false,
        is_signing_field: false,
        ..field(name, type_code, nth)
    }
}

/// The field table. Mirrors the network's published definitions.
pub static FIELDS: &[FieldDefinition] = &[
    presentation("hash", Hash256, 257),
    presentation("index", Hash256, 258),
    // UInt8
    field("CloseResolution", UInt8, 1),
    field("Method", UInt8, 2),
    field("TransactionResult", UInt8, 3),
    field("TickSize", UInt8, 16),
    field("UNLModifyDisabling", UInt8, 17),
    // UInt16
    field("LedgerEntryType", UInt16, 1),
    field("TransactionType", UInt16, 2),
    field("SignerWeight", UInt16, 3),
    field("TransferFee", UInt16, 4),
    field("Version", UInt16, 16),
    // UInt32
    field("NetworkID", UInt32, 1),
    field("Flags", UInt32, 2),
    field("SourceTag", UInt32, 3),
    field("Sequence", UInt32, 4),
    field("PreviousTxnLgrSeq", UInt32, 5),
    field("LedgerSequence", UInt32, 6),
    field("CloseTime", UInt32, 7),
    field("ParentCloseTime", UInt32, 8),
    field("SigningTime", UInt32, 9),
    field("Expiration", UInt32, 10),
    field("TransferRate", UInt32, 11),
    field("WalletSize", UInt32, 12),
    field("OwnerCount", UInt32, 13),
    field("DestinationTag", UInt32, 14),
    field("HighQualityIn", UInt32, 16),
    field("HighQualityOut", UInt32, 17),
    field("LowQualityIn", UInt32, 18),
    field("LowQualityOut", UInt32, 19),
    field("QualityIn", UInt32, 20),
    field("QualityOut", UInt32, 21),
    field("StampEscrow", UInt32, 22),
    field("BondAmount", UInt32, 23),
    field("LoadFee", UInt32, 24),
    field("OfferSequence", UInt32, 25),
    field("FirstLedgerSequence", UInt32, 26),
    field("LastLedgerSequence", UInt32, 27),
    field("TransactionIndex", UInt32, 28),
    field("OperationLimit", UInt32, 29),
    field("ReferenceFeeUnits", UInt32, 30),
    field("ReserveBase", UInt32, 31),
    field("ReserveIncrement", UInt32, 32),
    field("SetFlag", UInt32, 33),
    field("ClearFlag", UInt32, 34),
    field("SignerQuorum", UInt32, 35),
    field("CancelAfter", UInt32, 36),
    field("FinishAfter", UInt32, 37),
    field("SignerListID", UInt32, 38),
    field("SettleDelay", UInt32, 39),
    field("TicketCount", UInt32, 40),
    field("TicketSequence", UInt32, 41),
    field("NFTokenTaxon", UInt32, 42),
    field("MintedNFTokens", UInt32, 43),
    field("BurnedNFTokens", UInt32, 44),
    // UInt64
    field("IndexNext", UInt64, 1),
    field("IndexPrevious", UInt64, 2),
    field("BookNode", UInt64, 3),
    field("OwnerNode", UInt64, 4),
    field("BaseFee", UInt64, 5),
    field("ExchangeRate", UInt64, 6),
    field("LowNode", UInt64, 7),
    field("HighNode", UInt64, 8),
    field("DestinationNode", UInt64, 9),
    field("Cookie", UInt64, 10),
    field("ServerVersion", UInt64, 11),
    field("NFTokenOfferNode", UInt64, 12),
    // Hash128
    field("EmailHash", Hash128, 1),
    // Hash160
    field("TakerPaysCurrency", Hash160, 1),
    field("TakerPaysIssuer", Hash160, 2),
    field("TakerGetsCurrency", Hash160, 3),
    field("TakerGetsIssuer", Hash160, 4),
    // Hash256
    field("LedgerHash", Hash256, 1),
    field("ParentHash", Hash256, 2),
    field("TransactionHash", Hash256, 3),
    field("AccountHash", Hash256, 4),
    field("PreviousTxnID", Hash256, 5),
    field("LedgerIndex", Hash256, 6),
    field("WalletLocator", Hash256, 7),
    field("RootIndex", Hash256, 8),
    field("AccountTxnID", Hash256, 9),
    field("NFTokenID", Hash256, 10),
    field("BookDirectory", Hash256, 16),
    field("InvoiceID", Hash256, 17),
    field("Nickname", Hash256, 18),
    field("Amendment", Hash256, 19),
    field("Digest", Hash256, 21),
    field("Channel", Hash256, 22),
    field("ConsensusHash", Hash256, 23),
    field("CheckID", Hash256, 24),
    field("ValidatedHash", Hash256, 25),
    field("PreviousPageMin", Hash256, 26),
    field("NextPageMin", Hash256, 27),
    field("NFTokenBuyOffer", Hash256, 28),
    field("NFTokenSellOffer", Hash256, 29),
    // Amount
    field("Amount", Amount, 1),
    field("Balance", Amount, 2),
    field("LimitAmount", Amount, 3),
    field("TakerPays", Amount, 4),
    field("TakerGets", Amount, 5),
    field("LowLimit", Amount, 6),
    field("HighLimit", Amount, 7),
    field("Fee", Amount, 8),
    field("SendMax", Amount, 9),
    field("DeliverMin", Amount, 10),
    field("MinimumOffer", Amount, 16),
    field("RippleEscrow", Amount, 17),
    field("DeliveredAmount", Amount, 18),
    field("NFTokenBrokerFee", Amount, 19),
    // Blob
    field("PublicKey", Blob, 1),
    field("MessageKey", Blob, 2),
    field("SigningPubKey", Blob, 3),
    unsigned("TxnSignature", Blob, 4),
    field("URI", Blob, 5),
    unsigned("Signature", Blob, 6),
    field("Domain", Blob, 7),
    field("FundCode", Blob, 8),
    field("RemoveCode", Blob, 9),
    field("ExpireCode", Blob, 10),
    field("CreateCode", Blob, 11),
    field("MemoType", Blob, 12),
    field("MemoData", Blob, 13),
    field("MemoFormat", Blob, 14),
    field("Fulfillment", Blob, 16),
    field("Condition", Blob, 17),
    unsigned("MasterSignature", Blob, 18),
    field("UNLModifyValidator", Blob, 19),
    field("ValidatorToDisable", Blob, 20),
    field("ValidatorToReEnable", Blob, 21),
    // AccountID
    field("Account", AccountId, 1),
    field("Owner", AccountId, 2),
    field("Destination", AccountId, 3),
    field("Issuer", AccountId, 4),
    field("Authorize", AccountId, 5),
    field("Unauthorize", AccountId, 6),
    field("RegularKey", AccountId, 8),
    field("NFTokenMinter", AccountId, 9),
    // STObject
    field("ObjectEndMarker", StObject, 1),
    field("TransactionMetaData", StObject, 2),
    field("CreatedNode", StObject, 3),
    field("DeletedNode", StObject, 4),
    field("ModifiedNode", StObject, 5),
    field("PreviousFields", StObject, 6),
    field("FinalFields", StObject, 7),
    field("NewFields", StObject, 8),
    field("TemplateEntry", StObject, 9),
    field("Memo", StObject, 10),
    field("SignerEntry", StObject, 11),
    field("NFToken", StObject, 12),
    field("Signer", StObject, 16),
    field("Majority", StObject, 18),
    field("DisabledValidator", StObject, 19),
    // STArray
    field("ArrayEndMarker", StArray, 1),
    unsigned("Signers", StArray, 3),
    field("SignerEntries", StArray, 4),
    field("Template", StArray, 5),
    field("Necessary", StArray, 6),
    field("Sufficient", StArray, 7),
    field("AffectedNodes", StArray, 8),
    field("Memos", StArray, 9),
    field("NFTokens", StArray, 10),
    field("Majorities", StArray, 16),
    field("DisabledValidators", StArray, 17),
    // PathSet
    field("Paths", PathSet, 1),
    // Vector256
    field("Indexes", Vector256, 1),
    field("Hashes", Vector256, 2),
    field("Amendments", Vector256, 3),
    field("NFTokenOffers", Vector256, 4),
];

/// The field terminating every nested object. Header byte `0xE1`.
pub const OBJECT_END_MARKER: &str = "ObjectEndMarker";

/// The field terminating every array. Header byte `0xF1`.
pub const ARRAY_END_MARKER: &str = "ArrayEndMarker";
