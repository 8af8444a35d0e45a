//! UTXO selection algorithms.
//!
//! Both selectors are pure functions over a candidate list. Authority
//! UTXOs are never candidates for value selection and must be filtered
//! out by the caller.

use hathor_primitives::{PqNode, PriorityQueue};

use crate::WalletError;

/// A spendable output known to the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utxo {
    /// Hex id of the transaction holding the output.
    pub tx_id: String,
    /// Position of the output.
    pub index: u8,
    /// Uid of the token held.
    pub token: String,
    /// Value in the smallest unit.
    pub value: i64,
    /// Authority mask, 0 for a plain output.
    pub authorities: i64,
    /// Base58 address owning the output.
    pub address: String,
    /// Timelock of the output script, when present.
    pub timelock: Option<u32>,
}

/// Result of a selection run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtxoSelection {
    /// The chosen UTXOs.
    pub utxos: Vec<Utxo>,
    /// Total value of the chosen UTXOs, always >= the requested
    /// amount; the surplus becomes change.
    pub total: i64,
}

/// Select UTXOs largest-first until the amount is covered.
///
/// Fast and deterministic; tends to concentrate funds into fewer
/// outputs at the cost of sometimes over-selecting.
///
/// # Arguments
/// * `utxos` - Candidate UTXOs, all holding the same token.
/// * `amount` - Value to cover. Must be positive.
pub fn fast_utxo_selection(utxos: &[Utxo], amount: i64) -> Result<UtxoSelection, WalletError> {
    let mut heap: PriorityQueue<i64, &Utxo> = PriorityQueue::new();
    heap.add(utxos.iter().map(|u| PqNode::new(u.value, u)));

    let mut selected = Vec::new();
    let mut total = 0i64;
    while total < amount {
        match heap.pop() {
            Some(node) => {
                total += node.priority;
                selected.push(node.value.clone());
            }
            None => {
                return Err(WalletError::InsufficientFunds {
                    available: total,
                    requested: amount,
                })
            }
        }
    }
    Ok(UtxoSelection {
        utxos: selected,
        total,
    })
}

/// Select the single smallest UTXO that covers the amount, falling
/// back to largest-first accumulation when no single UTXO suffices.
///
/// Minimizes the number of inputs while avoiding needlessly large
/// change outputs.
///
/// # Arguments
/// * `utxos` - Candidate UTXOs, all holding the same token.
/// * `amount` - Value to cover. Must be positive.
pub fn best_utxo_selection(utxos: &[Utxo], amount: i64) -> Result<UtxoSelection, WalletError> {
    let best_single = utxos
        .iter()
        .filter(|u| u.value >= amount)
        .min_by_key(|u| u.value);
    if let Some(utxo) = best_single {
        return Ok(UtxoSelection {
            utxos: vec![utxo.clone()],
            total: utxo.value,
        });
    }
    fast_utxo_selection(utxos, amount)
}
