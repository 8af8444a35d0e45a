//! Proof of work weight calculation.

use crate::TransactionError;

/// Network constants driving the minimum weight formula. Fetched from
/// the fullnode's version endpoint, they differ per network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightConstants {
    /// Multiplier on the log2 of the transaction size.
    pub tx_weight_coefficient: f64,
    /// Floor below which no transaction weight may fall.
    pub tx_min_weight: f64,
    /// Shapes how fast weight grows with the amount moved.
    pub tx_min_weight_k: f64,
}

/// Minimum proof of work weight for a transaction.
///
/// # Arguments
/// * `size` - Serialized size of the transaction in bytes.
/// * `amount` - Sum of the non-authority output values.
/// * `constants` - Network weight constants. Required; passing `None`
///   fails with [`TransactionError::ConstantNotSet`].
///
/// # Returns
/// `coefficient * log2(size) + 4 / (1 + k / amount) + 4`, floored at
/// the network minimum.
pub fn minimum_tx_weight(
    size: usize,
    amount: i64,
    constants: Option<&WeightConstants>,
) -> Result<f64, TransactionError> {
    let constants = constants.ok_or(TransactionError::ConstantNotSet)?;
    let weight = constants.tx_weight_coefficient * (size as f64).log2()
        + 4.0 / (1.0 + constants.tx_min_weight_k / amount as f64)
        + 4.0;
    Ok(weight.max(constants.tx_min_weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET: WeightConstants = WeightConstants {
        tx_weight_coefficient: 1.6,
        tx_min_weight: 14.0,
        tx_min_weight_k: 100.0,
    };

    #[test]
    fn test_small_tx_hits_the_floor() {
        let weight = minimum_tx_weight(100, 1, Some(&MAINNET)).unwrap();
        assert_eq!(weight, 14.0);
    }

    #[test]
    fn test_formula_above_the_floor() {
        let weight = minimum_tx_weight(1024, 1_000_000, Some(&MAINNET)).unwrap();
        let expected = 1.6 * 10.0 + 4.0 / (1.0 + 100.0 / 1_000_000.0) + 4.0;
        assert!((weight - expected).abs() < 1e-9);
        assert!(weight > 14.0);
    }

    #[test]
    fn test_weight_grows_with_amount() {
        let small = minimum_tx_weight(1024, 1_000, Some(&MAINNET)).unwrap();
        let large = minimum_tx_weight(1024, 1_000_000, Some(&MAINNET)).unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_missing_constants() {
        assert!(matches!(
            minimum_tx_weight(100, 1, None),
            Err(TransactionError::ConstantNotSet)
        ));
    }
}
