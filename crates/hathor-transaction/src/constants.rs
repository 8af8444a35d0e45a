//! Protocol constants for the Hathor transaction wire format.
//!
//! Version bytes, token data masks, and structural limits come from the
//! network's protocol definition and must match the fullnode exactly.

/// Version byte of a regular block.
pub const BLOCK_VERSION: u8 = 0;
/// Version byte of a regular transaction.
pub const DEFAULT_TX_VERSION: u8 = 1;
/// Version byte of a token creation transaction.
pub const CREATE_TOKEN_TX_VERSION: u8 = 2;
/// Version byte of a merged-mined block.
pub const MERGED_MINED_BLOCK_VERSION: u8 = 3;
/// Version byte of a nano contract transaction.
pub const NANO_CONTRACTS_VERSION: u8 = 4;
/// Version byte of a proof-of-authority block.
pub const POA_BLOCK_VERSION: u8 = 5;
/// Version byte of an on-chain blueprint transaction.
pub const ON_CHAIN_BLUEPRINTS_VERSION: u8 = 6;

/// High bit of `token_data`: marks an authority output.
pub const TOKEN_AUTHORITY_MASK: u8 = 0x80;
/// Low bits of `token_data`: index into the transaction's token list.
pub const TOKEN_INDEX_MASK: u8 = 0x7f;
/// Authority value bit granting mint capability.
pub const TOKEN_MINT_MASK: i64 = 0x01;
/// Authority value bit granting melt capability.
pub const TOKEN_MELT_MASK: i64 = 0x02;

/// UID of the native token (HTR). Never listed in a transaction's tokens.
pub const NATIVE_TOKEN_UID: &str = "00";
/// Version byte of the serialized token info block.
pub const TOKEN_INFO_VERSION: u8 = 1;
/// Maximum byte length of a token name.
pub const MAX_TOKEN_NAME_LEN: usize = 30;
/// Maximum byte length of a token symbol.
pub const MAX_TOKEN_SYMBOL_LEN: usize = 5;

/// Maximum number of inputs in a transaction.
pub const MAX_INPUTS: usize = 255;
/// Maximum number of outputs in a transaction.
pub const MAX_OUTPUTS: usize = 255;
/// Maximum number of parents in a transaction.
pub const MAX_PARENTS: usize = 3;
/// Maximum accepted output script length, enforced as a validation.
pub const MAXIMUM_SCRIPT_LENGTH: usize = 256;

/// Byte length of a transaction hash.
pub const TX_HASH_SIZE: usize = 32;
/// Default value of the signal bits field.
pub const DEFAULT_SIGNAL_BITS: u8 = 0;
