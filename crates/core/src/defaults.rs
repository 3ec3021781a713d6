//! Network defaults, selected by cargo feature. `testnet` wins if both are enabled.

use std::fmt;

/// The network an extended address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// The production network
    Mainnet,
    /// Any test network
    Testnet,
}

impl Network {
    /// The 2-byte extended address prefix
    pub const fn xaddress_prefix(&self) -> [u8; 2] {
        match self {
            Network::Mainnet => [0x05, 0x44],
            Network::Testnet => [0x04, 0x93],
        }
    }

    /// Identify a network by its extended address prefix
    pub fn from_xaddress_prefix(prefix: &[u8]) -> Option<Self> {
        match prefix {
            [0x05, 0x44] => Some(Network::Mainnet),
            [0x04, 0x93] => Some(Network::Testnet),
            _ => None,
        }
    }

    /// True for test networks
    pub const fn is_test(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// The network extended addresses are encoded for when none is given.
#[cfg(not(feature = "testnet"))]
pub const DEFAULT_NETWORK: Network = Network::Mainnet;

/// The network extended addresses are encoded for when none is given.
#[cfg(feature = "testnet")]
pub const DEFAULT_NETWORK: Network = Network::Testnet;
