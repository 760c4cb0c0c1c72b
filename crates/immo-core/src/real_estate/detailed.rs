use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::debt_service::{DebtServiceMethod, LoanTerms};
use super::simple::defined_service;
use super::{note_undefined, percentage_of};
use crate::error::ImmoError;
use crate::time_value::amortization_duration;
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Metric, Money, Percent, Years};
use crate::ImmoResult;

/// Allowed gap between equity + debt and the total cost before warning.
const FUNDING_TOLERANCE: Money = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Condition of the building as assessed by the buyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCondition {
    AsNew,
    VeryGood,
    #[default]
    Good,
    Average,
    NeedsRenovation,
    NeedsRefurbishment,
}

/// Coarse location class (A-Lage, B-Lage, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationClass {
    /// City-centre location in a major city
    Prime,
    /// Outskirts of a major city
    Secondary,
    #[default]
    MidSizeCity,
    SmallTown,
    Rural,
}

/// Purchase data with itemized transaction-cost percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyData {
    pub purchase_price: Money,
    /// Living area in m²
    pub living_area: Decimal,
    /// Plot area in m²
    #[serde(default)]
    pub plot_area: Decimal,
    pub construction_year: u32,
    #[serde(default)]
    pub condition: BuildingCondition,
    #[serde(default)]
    pub location: LocationClass,
    /// Real-estate transfer tax (Grunderwerbsteuer), % of price
    pub transfer_tax_rate: Percent,
    /// Notary fees, % of price
    pub notary_rate: Percent,
    /// Agent commission, % of price
    pub agent_rate: Percent,
    /// Land registry fees, % of price
    pub registry_rate: Percent,
}

impl PropertyData {
    /// Sum of the four transaction-cost percentages applied to the price.
    pub fn transaction_costs(&self) -> Money {
        let pct = self.transfer_tax_rate + self.notary_rate + self.agent_rate + self.registry_rate;
        self.purchase_price * percent_to_rate(pct)
    }

    /// Purchase price plus transaction costs: the base that equity and debt fund.
    pub fn total_cost(&self) -> Money {
        self.purchase_price + self.transaction_costs()
    }
}

fn default_rate_lock() -> Years {
    10
}

fn default_loan_term() -> Years {
    30
}

fn default_method() -> DebtServiceMethod {
    DebtServiceMethod::FlatRatePlusRepayment
}

/// Equity/debt split and loan conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingData {
    /// Equity invested (Eigenkapital)
    pub equity: Money,
    /// Equity as a percentage of the total cost
    pub equity_ratio: Percent,
    /// Loan amount (Darlehensbetrag)
    pub debt: Money,
    /// Interest rate in percent per year
    pub interest_rate: Percent,
    /// Initial principal repayment in percent per year (Anfangstilgung)
    pub repayment_rate: Percent,
    /// Fixed-rate period in years (Zinsbindung)
    #[serde(default = "default_rate_lock")]
    pub rate_lock_years: Years,
    /// Optional annual extra repayment allowance in percent of the loan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_repayment_rate: Option<Percent>,
    /// Term used by the annuity method and the amortization chart
    #[serde(default = "default_loan_term")]
    pub loan_term_years: Years,
    #[serde(default = "default_method")]
    pub debt_service_method: DebtServiceMethod,
}

impl FinancingData {
    /// Build from an equity amount; ratio and debt follow from `total_cost`.
    pub fn from_equity_amount(
        total_cost: Money,
        equity: Money,
        interest_rate: Percent,
        repayment_rate: Percent,
    ) -> ImmoResult<Self> {
        if total_cost <= Decimal::ZERO {
            return Err(ImmoError::invalid("total_cost", "Total cost must be positive"));
        }
        if equity < Decimal::ZERO || equity > total_cost {
            return Err(ImmoError::invalid(
                "equity",
                "Equity must be between 0 and the total cost",
            ));
        }

        let equity_ratio = (equity / total_cost * Decimal::ONE_HUNDRED).round_dp(2);
        Ok(Self::with_split(
            equity,
            equity_ratio,
            total_cost - equity,
            interest_rate,
            repayment_rate,
        ))
    }

    /// Build from an equity ratio; amounts follow from `total_cost`.
    pub fn from_equity_ratio(
        total_cost: Money,
        equity_ratio: Percent,
        interest_rate: Percent,
        repayment_rate: Percent,
    ) -> ImmoResult<Self> {
        if total_cost <= Decimal::ZERO {
            return Err(ImmoError::invalid("total_cost", "Total cost must be positive"));
        }
        if equity_ratio < Decimal::ZERO || equity_ratio > Decimal::ONE_HUNDRED {
            return Err(ImmoError::invalid(
                "equity_ratio",
                "Equity ratio must be between 0 and 100",
            ));
        }

        let equity = (total_cost * percent_to_rate(equity_ratio)).round_dp(2);
        let debt = (total_cost - equity).round_dp(2);
        Ok(Self::with_split(
            equity,
            equity_ratio,
            debt,
            interest_rate,
            repayment_rate,
        ))
    }

    fn with_split(
        equity: Money,
        equity_ratio: Percent,
        debt: Money,
        interest_rate: Percent,
        repayment_rate: Percent,
    ) -> Self {
        Self {
            equity,
            equity_ratio,
            debt,
            interest_rate,
            repayment_rate,
            rate_lock_years: default_rate_lock(),
            extra_repayment_rate: None,
            loan_term_years: default_loan_term(),
            debt_service_method: default_method(),
        }
    }

    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.debt,
            interest_rate: self.interest_rate,
            repayment_rate: Some(self.repayment_rate),
            term_years: self.loan_term_years,
        }
    }
}

/// Rental income and running-cost assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalData {
    /// Monthly cold rent (Kaltmiete)
    pub monthly_cold_rent: Money,
    /// Monthly recoverable utility costs (Nebenkosten)
    #[serde(default)]
    pub monthly_utility_cost: Money,
    /// Achievable rent per m² as entered
    #[serde(default)]
    pub rent_per_sqm: Money,
    /// Expected annual rent growth in percent
    #[serde(default)]
    pub rent_growth_rate: Percent,
    /// Vacancy and collection loss in percent of the cold rent
    pub vacancy_rate: Percent,
    /// Management costs, % of annual cold rent
    pub management_cost_rate: Percent,
    /// Maintenance costs, % of purchase price per year
    pub maintenance_cost_rate: Percent,
    /// Capital reserve, % of purchase price per year
    pub reserve_rate: Percent,
}

/// The three input groups of the detailed calculator in one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedInput {
    pub property: PropertyData,
    pub financing: FinancingData,
    pub rental: RentalData,
}

#[derive(Serialize)]
struct Assumptions<'a> {
    property: &'a PropertyData,
    financing: &'a FinancingData,
    rental: &'a RentalData,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub purchase_price: Money,
    pub transfer_tax: Money,
    pub notary_fees: Money,
    pub agent_commission: Money,
    pub registry_fees: Money,
    /// Sum of the four itemized costs
    pub transaction_costs: Money,
    /// Purchase price + transaction costs
    pub total_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingBreakdown {
    pub equity: Money,
    pub debt: Money,
    pub interest_rate: Percent,
    pub repayment_rate: Percent,
    pub debt_service_method: DebtServiceMethod,
    pub monthly_debt_service: Metric,
    pub annual_debt_service: Metric,
    /// Estimated payoff time in years
    pub amortization_duration_years: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalFigures {
    pub annual_cold_rent: Money,
    pub annual_utility_cost: Money,
    pub rent_per_sqm: Money,
    /// Annual cold rent after vacancy loss
    pub effective_income: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCosts {
    pub management: Money,
    pub maintenance: Money,
    pub reserve: Money,
    pub total: Money,
}

/// Yields in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldSet {
    /// Annual cold rent / price
    pub gross: Metric,
    /// Net operating income / total cost
    pub net: Metric,
    /// Net operating income / price, ignoring financing
    pub property: Metric,
    /// Net operating income less interest / equity
    pub equity: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSet {
    pub monthly: Metric,
    pub annual: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResult {
    pub costs: CostBreakdown,
    pub financing: FinancingBreakdown,
    pub rental: RentalFigures,
    pub operating_costs: OperatingCosts,
    pub yields: YieldSet,
    pub cash_flow: CashFlowSet,
    /// Equity yield minus property yield, in percentage points
    pub leverage_effect: Metric,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full profitability analysis from property, financing and rental data.
pub fn compute_detailed_metrics(
    property: &PropertyData,
    financing: &FinancingData,
    rental: &RentalData,
) -> ImmoResult<ComputationOutput<DetailedResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let costs = compute_costs(property);
    check_funding(&costs, financing, &mut warnings);

    // --- Financing ---
    let service = defined_service(financing.debt_service_method, &financing.loan_terms())?;
    let monthly_debt_service = note_undefined(
        "monthly_debt_service",
        service.as_ref().map(|ds| ds.monthly_payment),
        &mut warnings,
    );
    let annual_debt_service = service.as_ref().map(|ds| ds.annual_payment);

    let amortization_duration_years = annual_debt_service.and_then(|annual| {
        match amortization_duration(
            annual,
            financing.debt,
            percent_to_rate(financing.repayment_rate),
        ) {
            Ok(years) => Some(years),
            Err(e) => {
                tracing::debug!(error = %e, "amortization duration undefined");
                None
            }
        }
    });
    let amortization_duration_years = note_undefined(
        "amortization_duration_years",
        amortization_duration_years,
        &mut warnings,
    );

    // --- Rental income ---
    let annual_cold_rent = rental.monthly_cold_rent * dec!(12);
    let effective_income =
        annual_cold_rent * (Decimal::ONE - percent_to_rate(rental.vacancy_rate));

    // --- Operating costs ---
    let management = annual_cold_rent * percent_to_rate(rental.management_cost_rate);
    let maintenance = property.purchase_price * percent_to_rate(rental.maintenance_cost_rate);
    let reserve = property.purchase_price * percent_to_rate(rental.reserve_rate);
    let operating_costs = OperatingCosts {
        management,
        maintenance,
        reserve,
        total: management + maintenance + reserve,
    };

    // --- Yields ---
    let net_operating_income = effective_income - operating_costs.total;
    let interest_cost = financing.debt * percent_to_rate(financing.interest_rate);

    let gross = note_undefined(
        "gross_yield",
        percentage_of(annual_cold_rent, property.purchase_price),
        &mut warnings,
    );
    let net = note_undefined(
        "net_yield",
        percentage_of(net_operating_income, costs.total_cost),
        &mut warnings,
    );
    let property_yield = note_undefined(
        "property_yield",
        percentage_of(net_operating_income, property.purchase_price),
        &mut warnings,
    );
    let equity_yield = note_undefined(
        "equity_yield",
        percentage_of(net_operating_income - interest_cost, financing.equity),
        &mut warnings,
    );
    let leverage_effect = match (equity_yield, property_yield) {
        (Some(ey), Some(py)) => Some(ey - py),
        _ => None,
    };

    // --- Cash flow ---
    let annual_cash_flow = annual_debt_service.map(|ds| net_operating_income - ds);
    let monthly_cash_flow = annual_cash_flow.map(|cf| cf / dec!(12));

    // --- Warnings for unusual metrics ---
    if let Some(cf) = annual_cash_flow {
        if cf < Decimal::ZERO {
            warnings.push(format!(
                "Negative annual cash flow of {cf:.2} — the investment requires monthly top-ups"
            ));
        }
    }
    if let Some(le) = leverage_effect {
        if le < Decimal::ZERO {
            warnings.push(format!(
                "Negative leverage effect of {le:.2} pp — interest rate exceeds property yield"
            ));
        }
    }
    if rental.vacancy_rate > dec!(10) {
        warnings.push(format!(
            "Vacancy rate {}% exceeds 10% — above typical market norms",
            rental.vacancy_rate
        ));
    }

    tracing::debug!(
        total_cost = %costs.total_cost,
        ?equity_yield,
        ?leverage_effect,
        "computed detailed property metrics"
    );

    let output = DetailedResult {
        costs,
        financing: FinancingBreakdown {
            equity: financing.equity,
            debt: financing.debt,
            interest_rate: financing.interest_rate,
            repayment_rate: financing.repayment_rate,
            debt_service_method: financing.debt_service_method,
            monthly_debt_service,
            annual_debt_service,
            amortization_duration_years,
        },
        rental: RentalFigures {
            annual_cold_rent,
            annual_utility_cost: rental.monthly_utility_cost * dec!(12),
            rent_per_sqm: rental.rent_per_sqm,
            effective_income,
        },
        operating_costs,
        yields: YieldSet {
            gross,
            net,
            property: property_yield,
            equity: equity_yield,
        },
        cash_flow: CashFlowSet {
            monthly: monthly_cash_flow,
            annual: annual_cash_flow,
        },
        leverage_effect,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Profitability (Initial Repayment Annuity, Leverage Effect)",
        &Assumptions {
            property,
            financing,
            rental,
        },
        warnings,
        elapsed,
        output,
    ))
}

/// Convenience wrapper over [`compute_detailed_metrics`] for a combined record.
pub fn compute_detailed(input: &DetailedInput) -> ImmoResult<ComputationOutput<DetailedResult>> {
    compute_detailed_metrics(&input.property, &input.financing, &input.rental)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn compute_costs(property: &PropertyData) -> CostBreakdown {
    let price = property.purchase_price;
    let transfer_tax = price * percent_to_rate(property.transfer_tax_rate);
    let notary_fees = price * percent_to_rate(property.notary_rate);
    let agent_commission = price * percent_to_rate(property.agent_rate);
    let registry_fees = price * percent_to_rate(property.registry_rate);
    let transaction_costs = transfer_tax + notary_fees + agent_commission + registry_fees;

    CostBreakdown {
        purchase_price: price,
        transfer_tax,
        notary_fees,
        agent_commission,
        registry_fees,
        transaction_costs,
        total_cost: price + transaction_costs,
    }
}

/// Equity + debt must fund the total cost.
fn check_funding(costs: &CostBreakdown, financing: &FinancingData, warnings: &mut Vec<String>) {
    let funded = financing.equity + financing.debt;
    let gap = funded - costs.total_cost;
    if gap.abs() > FUNDING_TOLERANCE {
        warnings.push(format!(
            "Equity + debt ({funded:.2}) does not match total cost ({:.2}); gap {gap:.2}",
            costs.total_cost
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Default values of the three calculator forms.
    fn sample() -> (PropertyData, FinancingData, RentalData) {
        let property = PropertyData {
            purchase_price: dec!(300000),
            living_area: dec!(100),
            plot_area: dec!(200),
            construction_year: 2000,
            condition: BuildingCondition::Good,
            location: LocationClass::MidSizeCity,
            transfer_tax_rate: dec!(5.0),
            notary_rate: dec!(1.5),
            agent_rate: dec!(3.57),
            registry_rate: dec!(0.5),
        };
        let financing = FinancingData::from_equity_ratio(
            property.total_cost(),
            dec!(20),
            dec!(3.5),
            dec!(2.0),
        )
        .unwrap();
        let rental = RentalData {
            monthly_cold_rent: dec!(1000),
            monthly_utility_cost: dec!(250),
            rent_per_sqm: dec!(10),
            rent_growth_rate: dec!(2),
            vacancy_rate: dec!(3),
            management_cost_rate: dec!(5),
            maintenance_cost_rate: dec!(1.5),
            reserve_rate: dec!(1),
        };
        (property, financing, rental)
    }

    #[test]
    fn test_transaction_costs_itemized() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        assert_eq!(out.costs.transfer_tax, dec!(15000));
        assert_eq!(out.costs.notary_fees, dec!(4500));
        assert_eq!(out.costs.agent_commission, dec!(10710));
        assert_eq!(out.costs.registry_fees, dec!(1500));
        assert_eq!(out.costs.transaction_costs, dec!(31710));
        assert_eq!(out.costs.total_cost, dec!(331710));
    }

    #[test]
    fn test_financing_split_matches_total_cost() {
        let (p, f, r) = sample();
        assert_eq!(f.equity, dec!(66342));
        assert_eq!(f.debt, dec!(265368));
        let result = compute_detailed_metrics(&p, &f, &r).unwrap();
        assert!(!result.warnings.iter().any(|w| w.contains("does not match")));
    }

    #[test]
    fn test_unbalanced_funding_warns() {
        let (p, mut f, r) = sample();
        f.debt = dec!(200000);
        let result = compute_detailed_metrics(&p, &f, &r).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("does not match total cost")));
    }

    #[test]
    fn test_debt_service_flat_rate() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        // 265368 * 5.5% = 14595.24
        assert_eq!(out.financing.annual_debt_service, Some(dec!(14595.24)));
        assert_eq!(out.financing.monthly_debt_service, Some(dec!(1216.27)));
    }

    #[test]
    fn test_income_and_operating_costs() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        assert_eq!(out.rental.annual_cold_rent, dec!(12000));
        assert_eq!(out.rental.annual_utility_cost, dec!(3000));
        assert_eq!(out.rental.effective_income, dec!(11640));
        assert_eq!(out.operating_costs.management, dec!(600));
        assert_eq!(out.operating_costs.maintenance, dec!(4500));
        assert_eq!(out.operating_costs.reserve, dec!(3000));
        assert_eq!(out.operating_costs.total, dec!(8100));
    }

    #[test]
    fn test_yields() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        assert_eq!(out.yields.gross, Some(dec!(4)));
        // NOI 3540 / 300000 = 1.18%
        assert_eq!(out.yields.property, Some(dec!(1.18)));
        let net = out.yields.net.unwrap();
        assert!((net - dec!(1.0672)).abs() < dec!(0.0001), "net {net}");
        // (3540 - 9287.88) / 66342 * 100 ≈ -8.664
        let equity = out.yields.equity.unwrap();
        assert!((equity - dec!(-8.664)).abs() < dec!(0.001), "equity {equity}");
        let le = out.leverage_effect.unwrap();
        assert_eq!(le, equity - dec!(1.18));
    }

    #[test]
    fn test_cash_flow() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        // 3540 - 14595.24
        assert_eq!(out.cash_flow.annual, Some(dec!(-11055.24)));
        assert_eq!(out.cash_flow.monthly, Some(dec!(-921.27)));
    }

    #[test]
    fn test_amortization_duration_present() {
        let (p, f, r) = sample();
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        // ln(5.5 / 2) / ln(1.02) ≈ 51.08
        let years = out.financing.amortization_duration_years.unwrap();
        assert!((years - dec!(51.08)).abs() < dec!(0.01), "years {years}");
    }

    #[test]
    fn test_zero_repayment_duration_undefined() {
        let (p, mut f, r) = sample();
        f.repayment_rate = Decimal::ZERO;
        let result = compute_detailed_metrics(&p, &f, &r).unwrap();
        assert_eq!(result.result.financing.amortization_duration_years, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("amortization_duration_years")));
    }

    #[test]
    fn test_zero_equity_yield_undefined() {
        let (p, _, r) = sample();
        let f = FinancingData::from_equity_amount(p.total_cost(), Decimal::ZERO, dec!(3.5), dec!(2))
            .unwrap();
        let result = compute_detailed_metrics(&p, &f, &r).unwrap();
        assert_eq!(result.result.yields.equity, None);
        assert_eq!(result.result.leverage_effect, None);
        assert!(result.result.yields.property.is_some());
    }

    #[test]
    fn test_leverage_sign_follows_interest_vs_property_yield() {
        let (p, _, mut r) = sample();
        r.monthly_cold_rent = dec!(2500);
        r.vacancy_rate = Decimal::ZERO;
        // NOI = 30000 - 1500 - 4500 - 3000 = 21000 -> property yield 7%
        let cheap = FinancingData::from_equity_ratio(p.total_cost(), dec!(30), dec!(3), dec!(2))
            .unwrap();
        let out = compute_detailed_metrics(&p, &cheap, &r).unwrap().result;
        assert!(out.leverage_effect.unwrap() > Decimal::ZERO);

        let dear = FinancingData::from_equity_ratio(p.total_cost(), dec!(30), dec!(9), dec!(2))
            .unwrap();
        let out = compute_detailed_metrics(&p, &dear, &r).unwrap().result;
        assert!(out.leverage_effect.unwrap() < Decimal::ZERO);
    }

    #[test]
    fn test_from_equity_amount_derives_ratio() {
        let f = FinancingData::from_equity_amount(dec!(330000), dec!(99000), dec!(3.5), dec!(2))
            .unwrap();
        assert_eq!(f.equity_ratio, dec!(30));
        assert_eq!(f.debt, dec!(231000));
        assert_eq!(f.debt_service_method, DebtServiceMethod::FlatRatePlusRepayment);
    }

    #[test]
    fn test_from_equity_amount_rejects_overfunding() {
        let err = FinancingData::from_equity_amount(dec!(100), dec!(150), dec!(3), dec!(2))
            .unwrap_err();
        assert!(matches!(err, ImmoError::InvalidInput { .. }));
    }

    #[test]
    fn test_annuity_method_selectable() {
        let (p, mut f, r) = sample();
        f.debt_service_method = DebtServiceMethod::Annuity;
        let out = compute_detailed_metrics(&p, &f, &r).unwrap().result;
        assert_eq!(out.financing.debt_service_method, DebtServiceMethod::Annuity);
        // a 30-year annuity at 3.5% costs less than 3.5% + 2% flat
        assert!(out.financing.annual_debt_service.unwrap() < dec!(14595.24));
    }

    #[test]
    fn test_combined_input_round_trip() {
        let (property, financing, rental) = sample();
        let input = DetailedInput {
            property,
            financing,
            rental,
        };
        let via_wrapper = compute_detailed(&input).unwrap().result;
        let direct =
            compute_detailed_metrics(&input.property, &input.financing, &input.rental)
                .unwrap()
                .result;
        assert_eq!(via_wrapper, direct);
    }
}
