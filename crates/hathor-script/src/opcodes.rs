//! Script opcode constants and push-data helpers.
//!
//! Hathor output scripts use a small subset of the Bitcoin opcode table.

use crate::ScriptError;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Hash the top stack item with Hash160.
pub const OP_HASH160: u8 = 0xa9;
/// Verify the top two stack items are equal, fail otherwise.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Push equality of the top two stack items.
pub const OP_EQUAL: u8 = 0x87;
/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// Fail unless the transaction timestamp is past the encoded timelock.
pub const OP_GREATERTHAN_TIMESTAMP: u8 = 0x6f;
/// Extended push: next byte is the data length.
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Largest direct push length (lengths above this need OP_PUSHDATA1).
const MAX_DIRECT_PUSH: usize = 75;

/// Encode a push-data operation for the given payload.
///
/// Payloads up to 75 bytes use the direct `[len][data]` form; longer
/// payloads (up to 255 bytes) use `[OP_PUSHDATA1][len][data]`.
///
/// # Arguments
/// * `data` - The payload to push.
///
/// # Returns
/// The encoded push operation, or an error for payloads above 255 bytes.
pub fn push_data(data: &[u8]) -> Result<Vec<u8>, ScriptError> {
    if data.len() > u8::MAX as usize {
        return Err(ScriptError::ParseScript(format!(
            "push data too long: {} bytes",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(data.len() + 2);
    if data.len() > MAX_DIRECT_PUSH {
        out.push(OP_PUSHDATA1);
    }
    out.push(data.len() as u8);
    out.extend_from_slice(data);
    Ok(out)
}

/// Decode a push-data operation from the front of a script.
///
/// # Arguments
/// * `script` - Script bytes starting with a push operation.
///
/// # Returns
/// The pushed payload and the remaining tail of the script.
pub fn get_push_data(script: &[u8]) -> Result<(&[u8], &[u8]), ScriptError> {
    let (len, start) = match script.first() {
        Some(&OP_PUSHDATA1) => {
            let len = *script
                .get(1)
                .ok_or_else(|| ScriptError::ParseScript("truncated OP_PUSHDATA1".into()))?;
            (len as usize, 2)
        }
        Some(&op) if (op as usize) <= MAX_DIRECT_PUSH && op > 0 => (op as usize, 1),
        Some(&op) => {
            return Err(ScriptError::ParseScript(format!(
                "expected push opcode, got {op:#04x}"
            )))
        }
        None => return Err(ScriptError::ParseScript("empty script".into())),
    };
    if script.len() < start + len {
        return Err(ScriptError::ParseScript("truncated push data".into()));
    }
    Ok((&script[start..start + len], &script[start + len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_data_direct() {
        let encoded = push_data(b"abc").unwrap();
        assert_eq!(encoded, vec![3, b'a', b'b', b'c']);
        let (data, rest) = get_push_data(&encoded).unwrap();
        assert_eq!(data, b"abc");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_push_data_extended() {
        let payload = vec![0x55u8; 100];
        let encoded = push_data(&payload).unwrap();
        assert_eq!(encoded[0], OP_PUSHDATA1);
        assert_eq!(encoded[1], 100);
        let (data, rest) = get_push_data(&encoded).unwrap();
        assert_eq!(data, payload.as_slice());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_push_data_too_long() {
        assert!(push_data(&vec![0u8; 300]).is_err());
    }

    #[test]
    fn test_get_push_data_truncated() {
        assert!(get_push_data(&[5, 1, 2]).is_err());
        assert!(get_push_data(&[OP_PUSHDATA1]).is_err());
        assert!(get_push_data(&[]).is_err());
    }
}
