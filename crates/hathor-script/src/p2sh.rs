//! Pay-to-Script-Hash output script model.
//!
//! Script layout, with the optional timelock prefix:
//!
//! `[0x04 <4-byte BE timelock> OP_GREATERTHAN_TIMESTAMP]`
//! `OP_HASH160 0x14 <20-byte hash> OP_EQUAL`
//!
//! Fixed lengths: 23 bytes without a timelock, 29 with one.

use crate::address::{Address, HASH_LEN};
use crate::network::Network;
use crate::opcodes::*;
use crate::ScriptError;

const BASE_LEN: usize = 23;
const TIMELOCK_LEN: usize = 29;
const HASH_OFFSET: usize = 2;
const TIMELOCK_PREFIX: usize = 6;

/// A P2SH output script: an address plus an optional timelock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P2sh {
    /// The destination address.
    pub address: Address,
    /// Optional UNIX timestamp before which the output cannot be spent.
    pub timelock: Option<u32>,
}

impl P2sh {
    /// Create a new P2SH script model.
    pub fn new(address: Address, timelock: Option<u32>) -> Self {
        P2sh { address, timelock }
    }

    /// Compile the script to bytes.
    pub fn create_script(&self) -> Result<Vec<u8>, ScriptError> {
        let hash = self.address.decode_hash()?;
        let mut script = Vec::with_capacity(TIMELOCK_LEN);
        if let Some(timelock) = self.timelock {
            script.push(4);
            script.extend_from_slice(&timelock.to_be_bytes());
            script.push(OP_GREATERTHAN_TIMESTAMP);
        }
        script.push(OP_HASH160);
        script.push(HASH_LEN as u8);
        script.extend_from_slice(&hash);
        script.push(OP_EQUAL);
        Ok(script)
    }

    /// Structurally classify raw bytes as a P2SH script.
    pub fn identify(script: &[u8]) -> bool {
        let body = match script.len() {
            BASE_LEN => script,
            TIMELOCK_LEN => {
                if script[0] != 4 || script[5] != OP_GREATERTHAN_TIMESTAMP {
                    return false;
                }
                &script[TIMELOCK_PREFIX..]
            }
            _ => return false,
        };
        body[0] == OP_HASH160 && body[1] == HASH_LEN as u8 && body[22] == OP_EQUAL
    }

    /// Reconstruct the model from raw script bytes.
    pub fn parse(script: &[u8], network: Network) -> Result<Self, ScriptError> {
        if !Self::identify(script) {
            return Err(ScriptError::ParseScript("not a P2SH script".into()));
        }
        let (timelock, hash_offset) = if script.len() == TIMELOCK_LEN {
            let timelock = u32::from_be_bytes([script[1], script[2], script[3], script[4]]);
            (Some(timelock), TIMELOCK_PREFIX + HASH_OFFSET)
        } else {
            (None, HASH_OFFSET)
        };
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&script[hash_offset..hash_offset + HASH_LEN]);
        Ok(P2sh {
            address: Address::from_hash(&hash, crate::AddressType::P2sh, network),
            timelock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "hKowQVpqh9KQnuPh3G9YjbETYdHF3EqrLp";

    #[test]
    fn test_create_script() {
        let script = P2sh::new(Address::new(ADDR, Network::Mainnet), None)
            .create_script()
            .unwrap();
        assert_eq!(
            hex::encode(&script),
            "a91436f6a1bf11f6b1d6d2fe8c7bdf0e51d3b1c1e9dc87"
        );
        assert_eq!(script.len(), 23);
        assert!(P2sh::identify(&script));
    }

    #[test]
    fn test_parse_roundtrip_with_timelock() {
        let script = P2sh::new(Address::new(ADDR, Network::Mainnet), Some(1_700_000_000))
            .create_script()
            .unwrap();
        assert_eq!(script.len(), 29);
        let parsed = P2sh::parse(&script, Network::Mainnet).unwrap();
        assert_eq!(parsed.address.base58, ADDR);
        assert_eq!(parsed.timelock, Some(1_700_000_000));
    }

    #[test]
    fn test_identify_rejects_p2pkh() {
        let p2pkh = crate::P2pkh::new(
            Address::new("HBXkKywZ6KWqiu2Va6ARe4uFnMpeHm3SEH", Network::Mainnet),
            None,
        )
        .create_script()
        .unwrap();
        assert!(!P2sh::identify(&p2pkh));
    }
}
