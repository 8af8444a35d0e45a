//! Input signing glue.
//!
//! Unlocking data for a P2PKH input is the DER signature and the
//! compressed public key, each as a pushdata operation. The signed
//! digest is the double sha256 of the transaction's bytes to sign.

use hathor_primitives::ec::PrivateKey;
use hathor_script::opcodes::push_data;
use hathor_transaction::Transaction;

use crate::WalletError;

/// Build the unlocking data for a P2PKH input.
///
/// # Arguments
/// * `signature` - DER encoded ECDSA signature.
/// * `public_key` - Compressed public key (33 bytes).
pub fn create_input_data(signature: &[u8], public_key: &[u8]) -> Result<Vec<u8>, WalletError> {
    let mut data = push_data(signature)?;
    data.extend(push_data(public_key)?);
    Ok(data)
}

/// Sign one input of a transaction and set its unlocking data.
///
/// # Arguments
/// * `tx` - The transaction being signed. All inputs and outputs must
///   already be in place, since the signed digest covers them.
/// * `index` - Index of the input to sign.
/// * `key` - Private key owning the spent output.
pub fn sign_input(
    tx: &mut Transaction,
    index: usize,
    key: &PrivateKey,
) -> Result<(), WalletError> {
    let digest = tx.get_sighash_all_digest()?;
    let signature = key.sign(&digest)?;
    let data = create_input_data(&signature, &key.pub_key().to_compressed())?;
    let input = tx
        .inputs
        .get_mut(index)
        .ok_or(WalletError::InputNotFound(index))?;
    input.set_data(data);
    Ok(())
}

/// Sign every input of a transaction, one key per input in order.
pub fn sign_transaction(tx: &mut Transaction, keys: &[PrivateKey]) -> Result<(), WalletError> {
    if keys.len() != tx.inputs.len() {
        return Err(WalletError::InputNotFound(keys.len()));
    }
    for (index, key) in keys.iter().enumerate() {
        sign_input(tx, index, key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hathor_primitives::ec::PublicKey;
    use hathor_script::opcodes::get_push_data;
    use hathor_transaction::{Input, Output};

    fn unsigned_tx() -> Transaction {
        let input = Input::new("01".repeat(32), 0);
        let script = hex::decode("76a91436f6a1bf11f6b1d6d2fe8c7bdf0e51d3b1c1e9dc88ac").unwrap();
        let output = Output::new(1000, script, 0).unwrap();
        let mut tx = Transaction::new(vec![input], vec![output]);
        tx.weight = 18.0;
        tx.timestamp = Some(1_700_000_001);
        tx.parents = vec!["02".repeat(32), "03".repeat(32)];
        tx
    }

    #[test]
    fn test_create_input_data_layout() {
        let data = create_input_data(&[0x30, 0x01, 0x02], &[0x02; 33]).unwrap();
        let (sig, rest) = get_push_data(&data).unwrap();
        assert_eq!(sig, &[0x30, 0x01, 0x02]);
        let (pubkey, rest) = get_push_data(rest).unwrap();
        assert_eq!(pubkey.len(), 33);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_sign_input_verifies() {
        let key = PrivateKey::random();
        let mut tx = unsigned_tx();
        sign_input(&mut tx, 0, &key).unwrap();

        let data = tx.inputs[0].data.as_ref().unwrap();
        let (sig, rest) = get_push_data(data).unwrap();
        let (pubkey_bytes, _) = get_push_data(rest).unwrap();
        let pubkey = PublicKey::from_bytes(pubkey_bytes).unwrap();
        let digest = tx.get_sighash_all_digest().unwrap();
        assert!(pubkey.verify(&digest, sig));
    }

    #[test]
    fn test_signing_does_not_change_the_digest() {
        let key = PrivateKey::random();
        let mut tx = unsigned_tx();
        let before = tx.get_sighash_all_digest().unwrap();
        sign_input(&mut tx, 0, &key).unwrap();
        let after = tx.get_sighash_all_digest().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sign_input_out_of_bounds() {
        let key = PrivateKey::random();
        let mut tx = unsigned_tx();
        assert!(matches!(
            sign_input(&mut tx, 5, &key),
            Err(WalletError::InputNotFound(5))
        ));
    }

    #[test]
    fn test_sign_transaction_requires_one_key_per_input() {
        let mut tx = unsigned_tx();
        assert!(sign_transaction(&mut tx, &[]).is_err());

        let keys = vec![PrivateKey::random()];
        sign_transaction(&mut tx, &keys).unwrap();
        assert!(tx.inputs[0].data.is_some());
    }
}
