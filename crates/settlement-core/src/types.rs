use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.1 = 10%). Never as percentages.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to a whole won, ties to even.
pub fn round_won(value: Decimal) -> Money {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_won_ties_to_even() {
        assert_eq!(round_won(dec!(0.5)), dec!(0));
        assert_eq!(round_won(dec!(1.5)), dec!(2));
        assert_eq!(round_won(dec!(2.5)), dec!(2));
        assert_eq!(round_won(dec!(-2.5)), dec!(-2));
        assert_eq!(round_won(dec!(184.14)), dec!(184));
    }

    #[test]
    fn test_round_won_strips_scale() {
        let rounded = round_won(dec!(10000.0000000000001));
        assert_eq!(rounded, dec!(10000));
        assert_eq!(rounded.scale(), 0);
    }
}
