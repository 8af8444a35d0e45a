//! Generic output script classification.
//!
//! Raw scripts carry no discriminator; classification is structural, in
//! preference order P2PKH, P2SH, then data script as the fallback.

use crate::network::Network;
use crate::{P2pkh, P2sh, ScriptData, ScriptError};

/// A classified output script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedScript {
    /// Pay-to-public-key-hash.
    P2pkh(P2pkh),
    /// Pay-to-script-hash.
    P2sh(P2sh),
    /// Data (NFT) script.
    Data(ScriptData),
}

impl ParsedScript {
    /// Return the destination address, if the script has one.
    pub fn address(&self) -> Option<&crate::Address> {
        match self {
            ParsedScript::P2pkh(p) => Some(&p.address),
            ParsedScript::P2sh(p) => Some(&p.address),
            ParsedScript::Data(_) => None,
        }
    }

    /// Return the timelock, if the script has one.
    pub fn timelock(&self) -> Option<u32> {
        match self {
            ParsedScript::P2pkh(p) => p.timelock,
            ParsedScript::P2sh(p) => p.timelock,
            ParsedScript::Data(_) => None,
        }
    }
}

/// Classify and decode a raw output script.
///
/// # Arguments
/// * `script` - The raw script bytes.
/// * `network` - Network used to render embedded hashes as addresses.
///
/// # Returns
/// The decoded script model, or `ParseScript` if no pattern matches
/// (including data scripts with a malformed push).
pub fn parse_script(script: &[u8], network: Network) -> Result<ParsedScript, ScriptError> {
    if P2pkh::identify(script) {
        return Ok(ParsedScript::P2pkh(P2pkh::parse(script, network)?));
    }
    if P2sh::identify(script) {
        return Ok(ParsedScript::P2sh(P2sh::parse(script, network)?));
    }
    Ok(ParsedScript::Data(ScriptData::parse(script)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Address;

    const P2PKH_ADDR: &str = "HBXkKywZ6KWqiu2Va6ARe4uFnMpeHm3SEH";
    const P2SH_ADDR: &str = "hKowQVpqh9KQnuPh3G9YjbETYdHF3EqrLp";

    #[test]
    fn test_dispatch_p2pkh() {
        let script = P2pkh::new(Address::new(P2PKH_ADDR, Network::Mainnet), Some(123))
            .create_script()
            .unwrap();
        let parsed = parse_script(&script, Network::Mainnet).unwrap();
        assert_eq!(parsed.address().unwrap().base58, P2PKH_ADDR);
        assert_eq!(parsed.timelock(), Some(123));
        assert!(matches!(parsed, ParsedScript::P2pkh(_)));
    }

    #[test]
    fn test_dispatch_p2sh() {
        let script = P2sh::new(Address::new(P2SH_ADDR, Network::Mainnet), None)
            .create_script()
            .unwrap();
        assert!(matches!(
            parse_script(&script, Network::Mainnet).unwrap(),
            ParsedScript::P2sh(_)
        ));
    }

    #[test]
    fn test_dispatch_data_fallback() {
        let script = ScriptData::new("hello").create_script().unwrap();
        let parsed = parse_script(&script, Network::Mainnet).unwrap();
        assert!(parsed.address().is_none());
        assert!(matches!(parsed, ParsedScript::Data(d) if d.data == "hello"));
    }

    #[test]
    fn test_unparseable_script() {
        assert!(parse_script(&[0xff, 0xfe], Network::Mainnet).is_err());
    }
}
