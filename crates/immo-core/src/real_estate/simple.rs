use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::debt_service::{debt_service, DebtService, DebtServiceMethod, LoanTerms};
use super::depreciation::{compute_depreciation, DEFAULT_MARGINAL_TAX_RATE};
use super::{note_undefined, percentage_of};
use crate::error::ImmoError;
use crate::types::{with_metadata, ComputationOutput, Metric, Money, Percent, Years};
use crate::ImmoResult;

/// Purchase-price multiplier above which a warning is raised.
const EXPENSIVE_MULTIPLIER: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn default_tax_rate() -> Percent {
    DEFAULT_MARGINAL_TAX_RATE
}

fn default_method() -> DebtServiceMethod {
    DebtServiceMethod::Annuity
}

/// Flattened property record: purchase, running costs, loan and depreciation
/// parameters in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInput {
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Purchase price
    pub purchase_price: Money,
    /// Living area in m²
    pub living_area: Decimal,
    /// Year of construction
    pub construction_year: u32,
    /// Monthly cold rent (Kaltmiete)
    pub monthly_rent: Money,
    /// Acquisition ancillary costs (Kaufnebenkosten)
    pub ancillary_costs: Money,
    /// One-off renovation budget
    pub renovation_costs: Money,
    /// Annual property tax (Grundsteuer)
    pub property_tax: Money,
    /// Annual non-recoverable management costs
    pub management_costs: Money,
    /// Annual maintenance allowance
    pub maintenance_costs: Money,
    /// Loan interest rate in percent per year
    pub interest_rate: Percent,
    /// Loan principal
    pub loan_amount: Money,
    /// Loan term in years
    pub loan_term_years: Years,
    /// Land share of the purchase price in percent (not depreciable)
    pub land_ratio: Percent,
    /// Linear building depreciation (AfA) in percent per year
    pub depreciation_rate: Percent,
    /// Marginal income-tax rate used for the tax saving
    #[serde(default = "default_tax_rate")]
    pub marginal_tax_rate: Percent,
    /// Loan payment convention
    #[serde(default = "default_method")]
    pub debt_service_method: DebtServiceMethod,
}

/// Derived metrics for a `PropertyInput`. Yields are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult {
    /// Price + ancillary + renovation
    pub total_investment: Money,
    pub annual_rent: Money,
    /// Tax + management + maintenance
    pub annual_operating_costs: Money,
    pub annual_net_rent: Money,
    pub monthly_payment: Metric,
    pub annual_debt_service: Metric,
    /// Net rent less debt service, per year
    pub cash_flow: Metric,
    pub monthly_cash_flow: Metric,
    pub gross_yield: Metric,
    pub net_yield: Metric,
    pub price_per_sqm: Metric,
    /// Monthly cold rent per m²
    pub rent_per_sqm: Metric,
    /// Price / annual rent (Kaufpreisfaktor)
    pub purchase_price_multiplier: Metric,
    pub building_value: Money,
    pub annual_depreciation: Money,
    pub tax_saving: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute yields, cash flow, loan payment and depreciation for a single
/// flattened property record.
///
/// Metrics that divide by zero for the given inputs are returned as `None`
/// with a warning; inputs are expected to have passed
/// [`validate_property_input`](super::validation::validate_property_input).
pub fn compute_simple_metrics(
    input: &PropertyInput,
) -> ImmoResult<ComputationOutput<PropertyResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Investment and income ---
    let total_investment = input.purchase_price + input.ancillary_costs + input.renovation_costs;
    let annual_rent = input.monthly_rent * dec!(12);
    let annual_operating_costs =
        input.property_tax + input.management_costs + input.maintenance_costs;
    let annual_net_rent = annual_rent - annual_operating_costs;

    // --- Financing ---
    let loan = LoanTerms {
        principal: input.loan_amount,
        interest_rate: input.interest_rate,
        repayment_rate: None,
        term_years: input.loan_term_years,
    };
    let service = defined_service(input.debt_service_method, &loan)?;
    let monthly_payment = note_undefined(
        "monthly_payment",
        service.as_ref().map(|ds| ds.monthly_payment),
        &mut warnings,
    );
    let annual_debt_service = service.as_ref().map(|ds| ds.annual_payment);
    let cash_flow = annual_debt_service.map(|ds| annual_net_rent - ds);
    let monthly_cash_flow = cash_flow.map(|cf| cf / dec!(12));

    // --- Yields and ratios ---
    let gross_yield = note_undefined(
        "gross_yield",
        percentage_of(annual_rent, total_investment),
        &mut warnings,
    );
    let net_yield = note_undefined(
        "net_yield",
        percentage_of(annual_net_rent, total_investment),
        &mut warnings,
    );
    let price_per_sqm = note_undefined(
        "price_per_sqm",
        input.purchase_price.checked_div(input.living_area),
        &mut warnings,
    );
    let rent_per_sqm = note_undefined(
        "rent_per_sqm",
        input.monthly_rent.checked_div(input.living_area),
        &mut warnings,
    );
    let purchase_price_multiplier = note_undefined(
        "purchase_price_multiplier",
        input.purchase_price.checked_div(annual_rent),
        &mut warnings,
    );

    // --- Depreciation ---
    let depreciation = compute_depreciation(
        input.purchase_price,
        input.land_ratio,
        input.depreciation_rate,
        input.marginal_tax_rate,
    );

    // --- Warnings for unusual metrics ---
    if let Some(cf) = cash_flow {
        if cf < Decimal::ZERO {
            warnings.push(format!(
                "Negative annual cash flow of {:.2} — rent does not cover costs and debt service",
                cf
            ));
        }
    }
    if let Some(multiplier) = purchase_price_multiplier {
        if multiplier > EXPENSIVE_MULTIPLIER {
            warnings.push(format!(
                "Purchase-price multiplier {multiplier:.1} exceeds {EXPENSIVE_MULTIPLIER} — expensive relative to rent"
            ));
        }
    }

    tracing::debug!(
        property = %input.name,
        %total_investment,
        ?cash_flow,
        "computed simple property metrics"
    );

    let output = PropertyResult {
        total_investment,
        annual_rent,
        annual_operating_costs,
        annual_net_rent,
        monthly_payment,
        annual_debt_service,
        cash_flow,
        monthly_cash_flow,
        gross_yield,
        net_yield,
        price_per_sqm,
        rent_per_sqm,
        purchase_price_multiplier,
        building_value: depreciation.building_value,
        annual_depreciation: depreciation.annual_depreciation,
        tax_saving: depreciation.tax_saving,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property Yield and Cash Flow Analysis (Annuity Loan, Linear AfA)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Debt service, with an undefined payment mapped to `None`.
pub(crate) fn defined_service(
    method: DebtServiceMethod,
    loan: &LoanTerms,
) -> ImmoResult<Option<DebtService>> {
    match debt_service(method, loan) {
        Ok(ds) => Ok(Some(ds)),
        Err(ImmoError::UndefinedMetric { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Default values of the calculator form: 80 m² flat for 300k.
    fn sample_input() -> PropertyInput {
        PropertyInput {
            name: "Altbau Leipzig".into(),
            address: None,
            city: Some("Leipzig".into()),
            postal_code: None,
            purchase_price: dec!(300000),
            living_area: dec!(80),
            construction_year: 1990,
            monthly_rent: dec!(1000),
            ancillary_costs: dec!(30000),
            renovation_costs: Decimal::ZERO,
            property_tax: dec!(300),
            management_costs: Decimal::ZERO,
            maintenance_costs: dec!(1200),
            interest_rate: dec!(3.5),
            loan_amount: dec!(240000),
            loan_term_years: 30,
            land_ratio: dec!(20),
            depreciation_rate: dec!(2),
            marginal_tax_rate: DEFAULT_MARGINAL_TAX_RATE,
            debt_service_method: DebtServiceMethod::Annuity,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let out = compute_simple_metrics(&sample_input()).unwrap().result;

        assert_eq!(out.annual_rent, dec!(12000));
        assert_eq!(out.total_investment, dec!(330000));
        assert_eq!(out.annual_operating_costs, dec!(1500));
        assert_eq!(out.annual_net_rent, dec!(10500));
        assert_eq!(out.building_value, dec!(240000));
        assert_eq!(out.annual_depreciation, dec!(4800));
        assert_eq!(out.tax_saving, dec!(2016));

        let gross = out.gross_yield.unwrap();
        assert!((gross - dec!(3.636)).abs() < dec!(0.001), "gross yield {gross}");
    }

    #[test]
    fn test_net_yield_and_multiplier() {
        let out = compute_simple_metrics(&sample_input()).unwrap().result;
        // 10500 / 330000 * 100 ≈ 3.1818
        let net = out.net_yield.unwrap();
        assert!((net - dec!(3.1818)).abs() < dec!(0.001));
        assert_eq!(out.purchase_price_multiplier, Some(dec!(25)));
    }

    #[test]
    fn test_cash_flow_uses_annuity_payment() {
        let out = compute_simple_metrics(&sample_input()).unwrap().result;
        let monthly = out.monthly_payment.unwrap();
        assert!((monthly - dec!(1077.71)).abs() < dec!(0.01));
        assert_eq!(out.annual_debt_service, Some(monthly * dec!(12)));
        // 10500 - 12932.50 ≈ -2432.50
        let cf = out.cash_flow.unwrap();
        assert!((cf - dec!(-2432.50)).abs() < dec!(0.1), "cash flow {cf}");
        assert_eq!(out.monthly_cash_flow, Some(cf / dec!(12)));
    }

    #[test]
    fn test_negative_cash_flow_warning() {
        let result = compute_simple_metrics(&sample_input()).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Negative annual cash flow")));
    }

    #[test]
    fn test_per_sqm_figures() {
        let out = compute_simple_metrics(&sample_input()).unwrap().result;
        assert_eq!(out.price_per_sqm, Some(dec!(3750)));
        assert_eq!(out.rent_per_sqm, Some(dec!(12.5)));
    }

    #[test]
    fn test_zero_rent_multiplier_undefined() {
        let mut input = sample_input();
        input.monthly_rent = Decimal::ZERO;
        let result = compute_simple_metrics(&input).unwrap();
        assert_eq!(result.result.purchase_price_multiplier, None);
        assert_eq!(result.result.gross_yield, Some(Decimal::ZERO));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("purchase_price_multiplier")));
    }

    #[test]
    fn test_zero_term_loan_payment_undefined() {
        let mut input = sample_input();
        input.loan_term_years = 0;
        let out = compute_simple_metrics(&input).unwrap().result;
        assert_eq!(out.monthly_payment, None);
        assert_eq!(out.cash_flow, None);
        // everything unrelated to the loan is still produced
        assert_eq!(out.annual_net_rent, dec!(10500));
    }

    #[test]
    fn test_cash_purchase_has_no_debt_service() {
        let mut input = sample_input();
        input.loan_amount = Decimal::ZERO;
        input.loan_term_years = 0;
        let out = compute_simple_metrics(&input).unwrap().result;
        assert_eq!(out.annual_debt_service, Some(Decimal::ZERO));
        assert_eq!(out.cash_flow, Some(dec!(10500)));
    }

    #[test]
    fn test_flat_rate_method_selectable() {
        let mut input = sample_input();
        input.debt_service_method = DebtServiceMethod::FlatRatePlusRepayment;
        let out = compute_simple_metrics(&input).unwrap().result;
        // straight-line over 30 years: 240000 * (3.5% + 3.333..%) ≈ 16400
        let annual = out.annual_debt_service.unwrap();
        assert!((annual - dec!(16400)).abs() < dec!(0.01), "annual {annual}");
    }

    #[test]
    fn test_methodology_string() {
        let result = compute_simple_metrics(&sample_input()).unwrap();
        assert_eq!(
            result.methodology,
            "Property Yield and Cash Flow Analysis (Annuity Loan, Linear AfA)"
        );
    }

    #[test]
    fn test_input_defaults_from_json() {
        let json = serde_json::json!({
            "purchase_price": 300000,
            "living_area": 80,
            "construction_year": 1990,
            "monthly_rent": 1000,
            "ancillary_costs": 30000,
            "renovation_costs": 0,
            "property_tax": 300,
            "management_costs": 0,
            "maintenance_costs": 1200,
            "interest_rate": 3.5,
            "loan_amount": 240000,
            "loan_term_years": 30,
            "land_ratio": 20,
            "depreciation_rate": 2
        });
        let input: PropertyInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.marginal_tax_rate, dec!(42));
        assert_eq!(input.debt_service_method, DebtServiceMethod::Annuity);
        assert!(input.name.is_empty());
    }
}
