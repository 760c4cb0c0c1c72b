use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values (EUR). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.035 = 3.5%).
pub type Rate = Decimal;

/// Percentage points as entered by the user (3.5 = 3.5%).
pub type Percent = Decimal;

/// Year counts
pub type Years = u32;

/// Convert percentage points into a decimal rate.
pub fn percent_to_rate(p: Percent) -> Rate {
    p / Decimal::ONE_HUNDRED
}

/// A metric that may be mathematically undefined for the given inputs.
///
/// `None` serializes as `null` so presentation layers can render a placeholder
/// instead of NaN or Infinity.
pub type Metric = Option<Decimal>;

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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_to_rate() {
        assert_eq!(percent_to_rate(dec!(3.5)), dec!(0.035));
        assert_eq!(percent_to_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_envelope_carries_version_and_warnings() {
        let out = with_metadata("Test", &dec!(1), vec!["w".into()], 7, dec!(2));
        assert_eq!(out.result, dec!(2));
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
