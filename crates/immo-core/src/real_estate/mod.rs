pub mod comparison;
pub mod debt_service;
pub mod depreciation;
pub mod detailed;
pub mod projection;
pub mod schedule;
pub mod simple;
pub mod validation;

use rust_decimal::Decimal;

use crate::types::Metric;

/// Record an undefined metric as an envelope warning and pass the value through.
pub(crate) fn note_undefined(metric: &str, value: Metric, warnings: &mut Vec<String>) -> Metric {
    if value.is_none() {
        tracing::debug!(metric, "metric undefined for given inputs");
        warnings.push(format!("{metric} is undefined for the given inputs"));
    }
    value
}

/// `numerator / denominator * 100`, or `None` when the denominator is zero.
pub(crate) fn percentage_of(numerator: Decimal, denominator: Decimal) -> Metric {
    numerator
        .checked_div(denominator)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
}
