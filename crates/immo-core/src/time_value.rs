use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::ImmoError;
use crate::types::{Money, Rate};
use crate::ImmoResult;

/// Fixed periodic payment that fully amortizes `principal` over `periods`
/// at a constant periodic `rate`: P * r(1+r)^n / ((1+r)^n - 1).
///
/// A zero rate degenerates to straight-line repayment `P / n`, handled
/// explicitly because the closed form is 0/0 there.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> ImmoResult<Money> {
    if periods == 0 {
        return Err(ImmoError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let out_of_range = || ImmoError::undefined("annuity_payment", "exceeds the representable range");

    let compound = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(out_of_range)?;
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(ImmoError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    // compound / denominator tends to 1, so dividing first keeps large
    // factors in range
    principal
        .checked_mul(rate)
        .zip(compound.checked_div(denominator))
        .and_then(|(interest, ratio)| interest.checked_mul(ratio))
        .ok_or_else(out_of_range)
}

/// `value * (1 + rate)^periods`, compounded period by period. `None` once a
/// step leaves the `Decimal` range.
pub fn compound_growth(value: Money, rate: Rate, periods: u32) -> Option<Money> {
    let factor = Decimal::ONE + rate;
    (0..periods).try_fold(value, |acc, _| acc.checked_mul(factor))
}

/// Closed-form payoff estimate for a loan serviced by a constant annuity
/// whose repayment share grows geometrically:
///
/// ln(annual_debt_service / (debt * repayment_rate)) / ln(1 + repayment_rate)
///
/// Undefined when the repayment rate or debt is zero, or when the logarithm
/// argument is not positive.
pub fn amortization_duration(
    annual_debt_service: Money,
    debt: Money,
    repayment_rate: Rate,
) -> ImmoResult<Decimal> {
    const METRIC: &str = "amortization_duration";

    if repayment_rate <= Decimal::ZERO {
        return Err(ImmoError::undefined(
            METRIC,
            "repayment rate must be positive",
        ));
    }

    let initial_repayment = debt * repayment_rate;
    if initial_repayment.is_zero() {
        return Err(ImmoError::undefined(METRIC, "no debt to repay"));
    }

    let ratio = annual_debt_service / initial_repayment;
    if ratio <= Decimal::ZERO {
        return Err(ImmoError::undefined(
            METRIC,
            "logarithm argument must be positive",
        ));
    }

    let denominator = (Decimal::ONE + repayment_rate).ln();
    if denominator.is_zero() {
        return Err(ImmoError::DivisionByZero {
            context: "amortization duration ln(1 + repayment_rate)".into(),
        });
    }

    Ok(ratio.ln() / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annuity_payment_sanity() {
        // 240k at 3.5% over 30 years, expected ~1077.71/month
        let payment = annuity_payment(dec!(240000), dec!(0.035) / dec!(12), 360).unwrap();
        assert!(
            (payment - dec!(1077.71)).abs() < dec!(0.01),
            "Monthly payment {payment} outside expected range"
        );
    }

    #[test]
    fn test_annuity_zero_rate_is_straight_line() {
        let payment = annuity_payment(dec!(360000), Decimal::ZERO, 360).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_annuity_zero_periods_error() {
        let err = annuity_payment(dec!(1000), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, ImmoError::InvalidInput { .. }));
    }

    #[test]
    fn test_annuity_single_period_repays_with_interest() {
        let payment = annuity_payment(dec!(1000), dec!(0.05), 1).unwrap();
        assert!((payment - dec!(1050)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_annuity_overflow_undefined() {
        // 100% a year paid monthly over 100 years: (1 + 1/12)^1200 ~ 5e41
        let err = annuity_payment(dec!(240000), Decimal::ONE / dec!(12), 1200).unwrap_err();
        assert!(matches!(err, ImmoError::UndefinedMetric { .. }));
    }

    #[test]
    fn test_annuity_large_factor_stays_in_range() {
        // (1.05)^1200 ~ 3e25 fits, but P * r * compound would not
        let payment = annuity_payment(dec!(1000000000), dec!(0.05), 1200).unwrap();
        assert!((payment - dec!(50000000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_compound_growth() {
        assert_eq!(compound_growth(dec!(100), dec!(0.10), 2), Some(dec!(121.00)));
        assert_eq!(compound_growth(dec!(100), dec!(0.10), 0), Some(dec!(100)));
    }

    #[test]
    fn test_compound_growth_overflow_is_none() {
        assert_eq!(compound_growth(Decimal::ONE, Decimal::ONE, 100), None);
    }

    #[test]
    fn test_amortization_duration_reference() {
        // 3% interest + 2% repayment: ln(0.05 / 0.02) / ln(1.02) ≈ 46.27 years
        let years = amortization_duration(dec!(12000), dec!(240000), dec!(0.02)).unwrap();
        assert!(
            (years - dec!(46.27)).abs() < dec!(0.01),
            "Expected ~46.27 years, got {years}"
        );
    }

    #[test]
    fn test_amortization_duration_zero_repayment_undefined() {
        let err = amortization_duration(dec!(7200), dec!(240000), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, ImmoError::UndefinedMetric { .. }));
    }

    #[test]
    fn test_amortization_duration_zero_debt_undefined() {
        let err = amortization_duration(Decimal::ZERO, Decimal::ZERO, dec!(0.02)).unwrap_err();
        assert!(matches!(err, ImmoError::UndefinedMetric { .. }));
    }

    #[test]
    fn test_amortization_duration_non_positive_argument_undefined() {
        let err = amortization_duration(Decimal::ZERO, dec!(100000), dec!(0.02)).unwrap_err();
        assert!(matches!(err, ImmoError::UndefinedMetric { .. }));
    }
}
