//! Transaction output carrying a value or an authority grant.
//!
//! # Wire format
//!
//! | Field         | Size              |
//! |---------------|-------------------|
//! | value         | 4 or 8 bytes (BE) |
//! | token data    | 1 byte            |
//! | script length | 2 bytes (BE)      |
//! | script        | variable          |
//!
//! Values up to `i32::MAX` use the 4-byte form. Larger values use the
//! 8-byte form with the value negated, so decoders can tell the widths
//! apart by the sign of the first 4 bytes.

use hathor_primitives::{ByteReader, ByteWriter};
use hathor_script::{parse_script, Network, ParsedScript};

use crate::constants::{
    MAXIMUM_SCRIPT_LENGTH, TOKEN_AUTHORITY_MASK, TOKEN_INDEX_MASK, TOKEN_MELT_MASK,
    TOKEN_MINT_MASK,
};
use crate::TransactionError;

/// A single output.
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Amount in the smallest unit, or the authority mask for
    /// authority outputs. Always positive.
    pub value: i64,
    /// Token metadata byte: bit 7 flags an authority output, the low
    /// 7 bits index into the transaction's token list (0 is HTR).
    pub token_data: u8,
    /// Locking script.
    pub script: Vec<u8>,
    /// Parsed form of the script, when it matches a known template.
    pub decoded: Option<ParsedScript>,
}

impl Output {
    /// Create a new output.
    ///
    /// # Arguments
    /// * `value` - Amount in the smallest unit. Must be positive.
    /// * `script` - Locking script bytes.
    /// * `token_data` - Token metadata byte, 0 for plain HTR.
    pub fn new(value: i64, script: Vec<u8>, token_data: u8) -> Result<Self, TransactionError> {
        if value <= 0 {
            return Err(TransactionError::Parse(format!(
                "output value must be positive, got {value}"
            )));
        }
        Ok(Output {
            value,
            token_data,
            script,
            decoded: None,
        })
    }

    /// Whether this output grants an authority instead of funds.
    pub fn is_authority(&self) -> bool {
        self.token_data & TOKEN_AUTHORITY_MASK > 0
    }

    /// Whether this output grants mint authority.
    pub fn is_mint(&self) -> bool {
        self.is_authority() && (self.value & TOKEN_MINT_MASK) > 0
    }

    /// Whether this output grants melt authority.
    pub fn is_melt(&self) -> bool {
        self.is_authority() && (self.value & TOKEN_MELT_MASK) > 0
    }

    /// Whether this output moves the native token (HTR).
    pub fn is_token_htr(&self) -> bool {
        self.token_data & TOKEN_INDEX_MASK == 0
    }

    /// Index into the transaction's token uid list, or -1 for HTR.
    pub fn token_index(&self) -> i32 {
        (self.token_data & TOKEN_INDEX_MASK) as i32 - 1
    }

    /// The authority mask carried by this output, 0 if not an
    /// authority output.
    pub fn authorities(&self) -> i64 {
        if self.is_authority() {
            self.value
        } else {
            0
        }
    }

    /// Whether the script fits the consensus size limit.
    pub fn has_valid_length(&self) -> bool {
        self.script.len() <= MAXIMUM_SCRIPT_LENGTH
    }

    /// Serialize this output into a writer.
    pub fn serialize(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        writer.write_output_value(self.value)?;
        writer.write_u8(self.token_data);
        writer.write_u16_be(self.script.len() as u16);
        writer.write_bytes(&self.script);
        Ok(())
    }

    /// Deserialize an output from a reader.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    /// * `network` - Network used to decode the script into an address.
    pub fn read_from(reader: &mut ByteReader, network: Network) -> Result<Self, TransactionError> {
        let value = reader.read_output_value()?;
        let token_data = reader.read_u8()?;
        let script_len = reader.read_u16_be()? as usize;
        let script = reader.read_bytes(script_len)?.to_vec();
        let decoded = parse_script(&script, network).ok();
        Ok(Output {
            value,
            token_data,
            script,
            decoded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p2pkh_script() -> Vec<u8> {
        hex::decode("76a91436f6a1bf11f6b1d6d2fe8c7bdf0e51d3b1c1e9dc88ac").unwrap()
    }

    #[test]
    fn test_roundtrip_small_value() {
        let output = Output::new(1000, p2pkh_script(), 0).unwrap();
        let mut w = ByteWriter::new();
        output.serialize(&mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..4], &hex::decode("000003e8").unwrap()[..]);

        let mut reader = ByteReader::new(&bytes);
        let decoded = Output::read_from(&mut reader, Network::Mainnet).unwrap();
        assert_eq!(decoded.value, 1000);
        assert_eq!(decoded.script, output.script);
        assert!(decoded.decoded.is_some());
        let parsed = decoded.decoded.unwrap();
        assert_eq!(
            parsed.address().unwrap().base58,
            "HBXkKywZ6KWqiu2Va6ARe4uFnMpeHm3SEH"
        );
    }

    #[test]
    fn test_roundtrip_large_value() {
        let output = Output::new(3_000_000_000, p2pkh_script(), 1).unwrap();
        let mut w = ByteWriter::new();
        output.serialize(&mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..8], &hex::decode("ffffffff4d2fa200").unwrap()[..]);

        let mut reader = ByteReader::new(&bytes);
        let decoded = Output::read_from(&mut reader, Network::Mainnet).unwrap();
        assert_eq!(decoded.value, 3_000_000_000);
        assert_eq!(decoded.token_data, 1);
    }

    #[test]
    fn test_read_from_rejects_i64_min_value() {
        // 8-byte encoding whose negation does not exist as a positive i64
        let bytes = [0x80, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&bytes);
        assert!(Output::read_from(&mut reader, Network::Mainnet).is_err());
    }

    #[test]
    fn test_rejects_non_positive_value() {
        assert!(Output::new(0, p2pkh_script(), 0).is_err());
        assert!(Output::new(-5, p2pkh_script(), 0).is_err());
    }

    #[test]
    fn test_authority_flags() {
        let mint = Output::new(TOKEN_MINT_MASK, p2pkh_script(), 0x81).unwrap();
        assert!(mint.is_authority());
        assert!(mint.is_mint());
        assert!(!mint.is_melt());
        assert_eq!(mint.authorities(), TOKEN_MINT_MASK);

        let melt = Output::new(TOKEN_MELT_MASK, p2pkh_script(), 0x81).unwrap();
        assert!(melt.is_melt());
        assert!(!melt.is_mint());

        let plain = Output::new(100, p2pkh_script(), 1).unwrap();
        assert!(!plain.is_authority());
        assert_eq!(plain.authorities(), 0);
    }

    #[test]
    fn test_token_index() {
        let htr = Output::new(100, p2pkh_script(), 0).unwrap();
        assert!(htr.is_token_htr());
        assert_eq!(htr.token_index(), -1);

        let custom = Output::new(100, p2pkh_script(), 2).unwrap();
        assert!(!custom.is_token_htr());
        assert_eq!(custom.token_index(), 1);

        let authority = Output::new(1, p2pkh_script(), 0x81).unwrap();
        assert_eq!(authority.token_index(), 0);
    }

    #[test]
    fn test_script_length_limit() {
        let ok = Output::new(1, vec![0u8; 256], 0).unwrap();
        assert!(ok.has_valid_length());
        let too_long = Output::new(1, vec![0u8; 257], 0).unwrap();
        assert!(!too_long.has_valid_length());
    }
}
