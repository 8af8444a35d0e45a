//! Base58Check address handling.
//!
//! A Hathor address is 25 decoded bytes: 1 version byte, a 20-byte
//! Hash160, and a 4-byte SHA-256d checksum.  The version byte selects
//! between P2PKH and P2SH and is network-dependent.

use std::fmt;

use hathor_primitives::ec::PublicKey;
use hathor_primitives::hash::sha256d;

use crate::network::Network;
use crate::{P2pkh, P2sh, ScriptError};

/// Total decoded length of an address.
pub const ADDRESS_LEN: usize = 25;

/// Length of the embedded Hash160.
pub const HASH_LEN: usize = 20;

/// The script kind an address resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressType {
    /// Pay-to-public-key-hash.
    P2pkh,
    /// Pay-to-script-hash.
    P2sh,
}

/// A Base58Check Hathor address bound to a network.
///
/// Construction never validates; call [`Address::validate`] or
/// [`Address::is_valid`] to check the string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The Base58Check address string.
    pub base58: String,
    /// The network this address is interpreted against.
    pub network: Network,
}

impl Address {
    /// Create an address from its Base58 string without validating it.
    ///
    /// # Arguments
    /// * `base58` - The Base58Check address string.
    /// * `network` - The network to interpret version bytes against.
    pub fn new(base58: impl Into<String>, network: Network) -> Self {
        Address {
            base58: base58.into(),
            network,
        }
    }

    /// Build an address from a 20-byte hash and a script type.
    ///
    /// # Arguments
    /// * `hash` - The 20-byte Hash160.
    /// * `kind` - Whether to emit a P2PKH or P2SH address.
    /// * `network` - The target network.
    pub fn from_hash(hash: &[u8; HASH_LEN], kind: AddressType, network: Network) -> Self {
        let version = match kind {
            AddressType::P2pkh => network.version_bytes().p2pkh,
            AddressType::P2sh => network.version_bytes().p2sh,
        };
        let mut payload = Vec::with_capacity(ADDRESS_LEN);
        payload.push(version);
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);
        Address {
            base58: bs58::encode(&payload).into_string(),
            network,
        }
    }

    /// Build a P2PKH address from a compressed public key.
    ///
    /// # Arguments
    /// * `pub_key` - The public key to hash.
    /// * `network` - The target network.
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_hash(&pub_key.hash160(), AddressType::P2pkh, network)
    }

    /// Base58-decode the address string.
    ///
    /// # Returns
    /// The raw decoded bytes, or an error for malformed Base58.
    pub fn decode(&self) -> Result<Vec<u8>, ScriptError> {
        bs58::decode(&self.base58)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(self.base58.clone()))
    }

    /// Validate the address: length, checksum, and version byte.
    ///
    /// # Arguments
    /// * `skip_network` - When `true`, the version byte check against the
    ///   network is skipped (length and checksum are still enforced).
    ///
    /// # Returns
    /// `Ok(())` for a valid address, or the specific `ScriptError` describing
    /// the failure.
    pub fn validate(&self, skip_network: bool) -> Result<(), ScriptError> {
        let decoded = self.decode()?;
        if decoded.len() != ADDRESS_LEN {
            return Err(ScriptError::InvalidAddressLength(decoded.len()));
        }
        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::ChecksumFailed {
                expected: hex::encode(&checksum[..4]),
                got: hex::encode(&decoded[21..25]),
            });
        }
        if !skip_network {
            let version = self.network.version_bytes();
            if decoded[0] != version.p2pkh && decoded[0] != version.p2sh {
                return Err(ScriptError::InvalidVersionByte {
                    got: decoded[0],
                    p2pkh: version.p2pkh,
                    p2sh: version.p2sh,
                });
            }
        }
        Ok(())
    }

    /// Check validity without surfacing the failure reason.
    pub fn is_valid(&self) -> bool {
        self.validate(false).is_ok()
    }

    /// Determine whether this is a P2PKH or P2SH address.
    ///
    /// Re-validates the address first.
    ///
    /// # Returns
    /// The address type, or the validation error.
    pub fn get_type(&self) -> Result<AddressType, ScriptError> {
        self.validate(false)?;
        let decoded = self.decode()?;
        let version = self.network.version_bytes();
        if decoded[0] == version.p2pkh {
            Ok(AddressType::P2pkh)
        } else {
            Ok(AddressType::P2sh)
        }
    }

    /// Extract the embedded 20-byte hash.
    ///
    /// Validates length and checksum (network check skipped).
    pub fn decode_hash(&self) -> Result<[u8; HASH_LEN], ScriptError> {
        self.validate(true)?;
        let decoded = self.decode()?;
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&decoded[1..21]);
        Ok(hash)
    }

    /// Compile the output script for this address, without a timelock.
    ///
    /// Dispatches to the P2PKH or P2SH script builder based on the
    /// address type.
    pub fn to_script(&self) -> Result<Vec<u8>, ScriptError> {
        match self.get_type()? {
            AddressType::P2pkh => P2pkh::new(self.clone(), None).create_script(),
            AddressType::P2sh => P2sh::new(self.clone(), None).create_script(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base58)
    }
}
