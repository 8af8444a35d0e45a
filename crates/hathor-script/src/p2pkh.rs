//! Pay-to-Public-Key-Hash output script model.
//!
//! Script layout, with the optional timelock prefix:
//!
//! `[0x04 <4-byte BE timelock> OP_GREATERTHAN_TIMESTAMP]`
//! `OP_DUP OP_HASH160 0x14 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`
//!
//! Fixed lengths: 25 bytes without a timelock, 31 with one.

use crate::address::{Address, HASH_LEN};
use crate::network::Network;
use crate::opcodes::*;
use crate::ScriptError;

/// Script length without a timelock.
const BASE_LEN: usize = 25;
/// Script length with a timelock prefix.
const TIMELOCK_LEN: usize = 31;
/// Offset of the hash when no timelock is present.
const HASH_OFFSET: usize = 3;
/// Extra bytes contributed by the timelock prefix.
const TIMELOCK_PREFIX: usize = 6;

/// A P2PKH output script: an address plus an optional timelock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P2pkh {
    /// The destination address.
    pub address: Address,
    /// Optional UNIX timestamp before which the output cannot be spent.
    pub timelock: Option<u32>,
}

impl P2pkh {
    /// Create a new P2PKH script model.
    ///
    /// # Arguments
    /// * `address` - The destination address.
    /// * `timelock` - Optional spend timelock.
    pub fn new(address: Address, timelock: Option<u32>) -> Self {
        P2pkh { address, timelock }
    }

    /// Compile the script to bytes.
    ///
    /// # Returns
    /// The 25- or 31-byte script, or an address error if the embedded
    /// hash cannot be extracted.
    pub fn create_script(&self) -> Result<Vec<u8>, ScriptError> {
        let hash = self.address.decode_hash()?;
        let mut script = Vec::with_capacity(TIMELOCK_LEN);
        if let Some(timelock) = self.timelock {
            script.push(4);
            script.extend_from_slice(&timelock.to_be_bytes());
            script.push(OP_GREATERTHAN_TIMESTAMP);
        }
        script.push(OP_DUP);
        script.push(OP_HASH160);
        script.push(HASH_LEN as u8);
        script.extend_from_slice(&hash);
        script.push(OP_EQUALVERIFY);
        script.push(OP_CHECKSIG);
        Ok(script)
    }

    /// Structurally classify raw bytes as a P2PKH script.
    ///
    /// Checks the exact length and every opcode position; no stored tag is
    /// consulted.
    ///
    /// # Arguments
    /// * `script` - The raw script bytes.
    ///
    /// # Returns
    /// `true` if the bytes match the P2PKH pattern.
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
        body[0] == OP_DUP
            && body[1] == OP_HASH160
            && body[2] == HASH_LEN as u8
            && body[23] == OP_EQUALVERIFY
            && body[24] == OP_CHECKSIG
    }

    /// Reconstruct the model from raw script bytes.
    ///
    /// # Arguments
    /// * `script` - Raw bytes previously accepted by [`P2pkh::identify`].
    /// * `network` - Network used to render the embedded hash as an address.
    ///
    /// # Returns
    /// The decoded model, or `ParseScript` if the bytes do not match.
    pub fn parse(script: &[u8], network: Network) -> Result<Self, ScriptError> {
        if !Self::identify(script) {
            return Err(ScriptError::ParseScript("not a P2PKH script".into()));
        }
        let (timelock, hash_offset) = if script.len() == TIMELOCK_LEN {
            let timelock = u32::from_be_bytes([script[1], script[2], script[3], script[4]]);
            (Some(timelock), TIMELOCK_PREFIX + HASH_OFFSET)
        } else {
            (None, HASH_OFFSET)
        };
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&script[hash_offset..hash_offset + HASH_LEN]);
        Ok(P2pkh {
            address: Address::from_hash(&hash, crate::AddressType::P2pkh, network),
            timelock,
        })
    }
}
