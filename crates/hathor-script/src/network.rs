//! Hathor network definitions and address version bytes.

use std::fmt;

/// Address version bytes for a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionBytes {
    /// Version byte for P2PKH addresses.
    pub p2pkh: u8,
    /// Version byte for P2SH addresses.
    pub p2sh: u8,
}

/// A Hathor network.
///
/// Determines which version byte is legal for an address and is passed
/// explicitly wherever addresses or scripts are parsed; there is no
/// process-wide network state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Hathor mainnet (P2PKH 0x28, P2SH 0x64; addresses start with 'H').
    Mainnet,
    /// Hathor testnet (P2PKH 0x49, P2SH 0x87; addresses start with 'W').
    Testnet,
    /// A private network; shares the testnet version bytes.
    Privatenet,
}

impl Network {
    /// Return the address version bytes for this network.
    pub fn version_bytes(&self) -> VersionBytes {
        match self {
            Network::Mainnet => VersionBytes {
                p2pkh: 0x28,
                p2sh: 0x64,
            },
            Network::Testnet | Network::Privatenet => VersionBytes {
                p2pkh: 0x49,
                p2sh: 0x87,
            },
        }
    }

    /// Return the canonical network name.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Privatenet => "privatenet",
        }
    }

    /// Look up a network by its canonical name.
    ///
    /// # Arguments
    /// * `name` - One of "mainnet", "testnet", or "privatenet".
    ///
    /// # Returns
    /// `Some(Network)` for a known name, otherwise `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mainnet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            "privatenet" => Some(Network::Privatenet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bytes() {
        assert_eq!(Network::Mainnet.version_bytes().p2pkh, 0x28);
        assert_eq!(Network::Mainnet.version_bytes().p2sh, 0x64);
        assert_eq!(Network::Testnet.version_bytes().p2pkh, 0x49);
        assert_eq!(Network::Testnet.version_bytes().p2sh, 0x87);
        assert_eq!(
            Network::Privatenet.version_bytes(),
            Network::Testnet.version_bytes()
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Network::from_name("mainnet"), Some(Network::Mainnet));
        assert_eq!(Network::from_name("testnet"), Some(Network::Testnet));
        assert_eq!(Network::from_name("nope"), None);
    }
}
