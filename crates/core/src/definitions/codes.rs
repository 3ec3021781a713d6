use std::fmt;

macro_rules! code_table {
    (
        $(#[$outer:meta])*
        $name:ident: $repr:ty {
            $($variant:ident = $code:expr),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(non_camel_case_types, missing_docs)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// The wire code
            pub const fn code(&self) -> $repr {
                match self {
                    $($name::$variant => $code),*
                }
            }

            /// The protocol's name
            pub const fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }

            /// Look up by wire code
            pub fn from_code(code: $repr) -> Option<Self> {
                match code {
                    $(c if c == $code => Some($name::$variant),)*
                    _ => None,
                }
            }

            /// Look up by name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

code_table!(
    /// The value of the `TransactionType` field.
    TransactionType: u16 {
        Payment = 0,
        EscrowCreate = 1,
        EscrowFinish = 2,
        AccountSet = 3,
        EscrowCancel = 4,
        SetRegularKey = 5,
        OfferCreate = 7,
        OfferCancel = 8,
        TicketCreate = 10,
        SignerListSet = 12,
        PaymentChannelCreate = 13,
        PaymentChannelFund = 14,
        PaymentChannelClaim = 15,
        CheckCreate = 16,
        CheckCash = 17,
        CheckCancel = 18,
        DepositPreauth = 19,
        TrustSet = 20,
        AccountDelete = 21,
        NFTokenMint = 25,
        NFTokenBurn = 26,
        NFTokenCreateOffer = 27,
        NFTokenCancelOffer = 28,
        NFTokenAcceptOffer = 29,
        EnableAmendment = 100,
        SetFee = 101,
        UNLModify = 102,
    }
);

code_table!(
    /// The value of the `LedgerEntryType` field.
    LedgerEntryType: u16 {
        NFTokenOffer = 0x0037,
        Check = 0x0043,
        NegativeUNL = 0x004e,
        NFTokenPage = 0x0050,
        SignerList = 0x0053,
        Ticket = 0x0054,
        AccountRoot = 0x0061,
        DirectoryNode = 0x0064,
        Amendments = 0x0066,
        LedgerHashes = 0x0068,
        Offer = 0x006f,
        DepositPreauth = 0x0070,
        RippleState = 0x0072,
        FeeSettings = 0x0073,
        Escrow = 0x0075,
        PayChannel = 0x0078,
    }
);

code_table!(
    /// Engine result codes. Only the `tes` and `tec` classes appear in the `TransactionResult`
    /// field of validated metadata. The others are returned by submission.
    TransactionResult: i16 {
        telLOCAL_ERROR = -399,
        telBAD_DOMAIN = -398,
        telBAD_PATH_COUNT = -397,
        telBAD_PUBLIC_KEY = -396,
        telFAILED_PROCESSING = -395,
        telINSUF_FEE_P = -394,
        telNO_DST_PARTIAL = -393,
        telCAN_NOT_QUEUE = -392,
        temMALFORMED = -299,
        temBAD_AMOUNT = -298,
        temBAD_CURRENCY = -297,
        temBAD_EXPIRATION = -296,
        temBAD_FEE = -295,
        temBAD_ISSUER = -294,
        temBAD_LIMIT = -293,
        temBAD_OFFER = -292,
        temBAD_PATH = -291,
        temBAD_PATH_LOOP = -290,
        temBAD_REGKEY = -289,
        temBAD_SEND_XRP_LIMIT = -288,
        temBAD_SEND_XRP_MAX = -287,
        temBAD_SEND_XRP_NO_DIRECT = -286,
        temBAD_SEND_XRP_PARTIAL = -285,
        temBAD_SEND_XRP_PATHS = -284,
        temBAD_SEQUENCE = -283,
        temBAD_SIGNATURE = -282,
        temBAD_SRC_ACCOUNT = -281,
        temBAD_TRANSFER_RATE = -280,
        temDST_IS_SRC = -279,
        temDST_NEEDED = -278,
        temINVALID = -277,
        temINVALID_FLAG = -276,
        temREDUNDANT = -275,
        temRIPPLE_EMPTY = -274,
        temDISABLED = -273,
        temBAD_SIGNER = -272,
        temBAD_QUORUM = -271,
        temBAD_WEIGHT = -270,
        temBAD_TICK_SIZE = -269,
        temINVALID_ACCOUNT_ID = -268,
        temCANNOT_PREAUTH_SELF = -267,
        temUNCERTAIN = -266,
        temUNKNOWN = -265,
        tefFAILURE = -199,
        tefALREADY = -198,
        tefBAD_ADD_AUTH = -197,
        tefBAD_AUTH = -196,
        tefBAD_LEDGER = -195,
        tefCREATED = -194,
        tefEXCEPTION = -193,
        tefINTERNAL = -192,
        tefNO_AUTH_REQUIRED = -191,
        tefPAST_SEQ = -190,
        tefWRONG_PRIOR = -189,
        tefMASTER_DISABLED = -188,
        tefMAX_LEDGER = -187,
        tefBAD_SIGNATURE = -186,
        tefBAD_QUORUM = -185,
        tefNOT_MULTI_SIGNING = -184,
        tefBAD_AUTH_MASTER = -183,
        tefINVARIANT_FAILED = -182,
        tefTOO_BIG = -181,
        terRETRY = -99,
        terFUNDS_SPENT = -98,
        terINSUF_FEE_B = -97,
        terNO_ACCOUNT = -96,
        terNO_AUTH = -95,
        terNO_LINE = -94,
        terOWNERS = -93,
        terPRE_SEQ = -92,
        terLAST = -91,
        terNO_RIPPLE = -90,
        terQUEUED = -89,
        tesSUCCESS = 0,
        tecCLAIM = 100,
        tecPATH_PARTIAL = 101,
        tecUNFUNDED_ADD = 102,
        tecUNFUNDED_OFFER = 103,
        tecUNFUNDED_PAYMENT = 104,
        tecFAILED_PROCESSING = 105,
        tecDIR_FULL = 121,
        tecINSUF_RESERVE_LINE = 122,
        tecINSUF_RESERVE_OFFER = 123,
        tecNO_DST = 124,
        tecNO_DST_INSUF_XRP = 125,
        tecNO_LINE_INSUF_RESERVE = 126,
        tecNO_LINE_REDUNDANT = 127,
        tecPATH_DRY = 128,
        tecUNFUNDED = 129,
        tecNO_ALTERNATIVE_KEY = 130,
        tecNO_REGULAR_KEY = 131,
        tecOWNERS = 132,
        tecNO_ISSUER = 133,
        tecNO_AUTH = 134,
        tecNO_LINE = 135,
        tecINSUFF_FEE = 136,
        tecFROZEN = 137,
        tecNO_TARGET = 138,
        tecNO_PERMISSION = 139,
        tecNO_ENTRY = 140,
        tecINSUFFICIENT_RESERVE = 141,
        tecNEED_MASTER_KEY = 142,
        tecDST_TAG_NEEDED = 143,
        tecINTERNAL = 144,
        tecOVERSIZE = 145,
        tecCRYPTOCONDITION_ERROR = 146,
        tecINVARIANT_FAILED = 147,
        tecEXPIRED = 148,
        tecDUPLICATE = 149,
        tecKILLED = 150,
        tecHAS_OBLIGATIONS = 151,
        tecTOO_SOON = 152,
    }
);

impl TransactionResult {
    /// True for `tesSUCCESS`
    pub fn is_success(&self) -> bool {
        *self == TransactionResult::tesSUCCESS
    }

    /// True for results that claim a fee and are included in a ledger
    pub fn is_claimed(&self) -> bool {
        self.code() >= 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_maps_codes_both_ways() {
        assert_eq!(TransactionType::Payment.code(), 0);
        assert_eq!(TransactionType::from_code(2), Some(TransactionType::EscrowFinish));
        assert_eq!(TransactionType::from_code(6), None);
        assert_eq!(TransactionType::from_name("TrustSet").map(|t| t.code()), Some(20));
        assert_eq!(TransactionType::UNLModify.to_string(), "UNLModify");

        assert_eq!(LedgerEntryType::from_code(0x61), Some(LedgerEntryType::AccountRoot));
        assert_eq!(LedgerEntryType::Escrow.code(), 117);

        let r = TransactionResult::from_code(128).unwrap();
        assert_eq!(r.name(), "tecPATH_DRY");
        assert!(r.is_claimed());
        assert!(!r.is_success());
        assert!(TransactionResult::tesSUCCESS.is_success());
        assert!(!TransactionResult::tefPAST_SEQ.is_claimed());
    }
}
