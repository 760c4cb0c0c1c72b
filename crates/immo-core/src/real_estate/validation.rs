//! Input rules applied by the front-ends before calling the engines.
//!
//! The compute functions accept anything numerically meaningful; these checks
//! reject what a data-entry form would.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::detailed::{DetailedInput, FinancingData, PropertyData, RentalData};
use super::projection::CashFlowProjection;
use super::simple::PropertyInput;
use crate::error::ImmoError;
use crate::types::{Money, Percent};
use crate::ImmoResult;

/// Earliest construction year accepted.
pub const MIN_CONSTRUCTION_YEAR: u32 = 1800;

const MAX_DEPRECIATION_RATE: Percent = dec!(10);
const MIN_POSTAL_CODE_LEN: usize = 5;

fn positive(field: &str, value: Decimal) -> ImmoResult<()> {
    if value <= Decimal::ZERO {
        return Err(ImmoError::invalid(field, "must be greater than 0"));
    }
    Ok(())
}

fn non_negative(field: &str, value: Decimal) -> ImmoResult<()> {
    if value < Decimal::ZERO {
        return Err(ImmoError::invalid(field, "must not be negative"));
    }
    Ok(())
}

fn percent_within(field: &str, value: Percent, max: Percent) -> ImmoResult<()> {
    if value < Decimal::ZERO || value > max {
        return Err(ImmoError::invalid(
            field,
            format!("must be between 0 and {max}"),
        ));
    }
    Ok(())
}

fn construction_year(field: &str, year: u32) -> ImmoResult<()> {
    let current = u32::try_from(Utc::now().year()).unwrap_or(u32::MAX);
    if year < MIN_CONSTRUCTION_YEAR || year > current {
        return Err(ImmoError::invalid(
            field,
            format!("must be between {MIN_CONSTRUCTION_YEAR} and {current}"),
        ));
    }
    Ok(())
}

fn optional_text(field: &str, value: Option<&str>, min_len: usize) -> ImmoResult<()> {
    if let Some(text) = value {
        if text.trim().chars().count() < min_len {
            return Err(ImmoError::invalid(
                field,
                format!("must have at least {min_len} characters"),
            ));
        }
    }
    Ok(())
}

/// Rules for the quick calculator record.
pub fn validate_property_input(input: &PropertyInput) -> ImmoResult<()> {
    optional_text("address", input.address.as_deref(), 1)?;
    optional_text("city", input.city.as_deref(), 1)?;
    optional_text("postal_code", input.postal_code.as_deref(), MIN_POSTAL_CODE_LEN)?;

    positive("purchase_price", input.purchase_price)?;
    positive("living_area", input.living_area)?;
    if input.construction_year == 0 {
        return Err(ImmoError::invalid("construction_year", "must be greater than 0"));
    }

    let non_negative_fields: [(&str, Decimal); 8] = [
        ("monthly_rent", input.monthly_rent),
        ("ancillary_costs", input.ancillary_costs),
        ("renovation_costs", input.renovation_costs),
        ("property_tax", input.property_tax),
        ("management_costs", input.management_costs),
        ("maintenance_costs", input.maintenance_costs),
        ("interest_rate", input.interest_rate),
        ("loan_amount", input.loan_amount),
    ];
    for (field, value) in non_negative_fields {
        non_negative(field, value)?;
    }

    percent_within("land_ratio", input.land_ratio, Decimal::ONE_HUNDRED)?;
    percent_within("depreciation_rate", input.depreciation_rate, MAX_DEPRECIATION_RATE)?;
    percent_within("marginal_tax_rate", input.marginal_tax_rate, Decimal::ONE_HUNDRED)?;

    Ok(())
}

pub fn validate_property_data(property: &PropertyData) -> ImmoResult<()> {
    positive("purchase_price", property.purchase_price)?;
    positive("living_area", property.living_area)?;
    non_negative("plot_area", property.plot_area)?;
    construction_year("construction_year", property.construction_year)?;

    percent_within("transfer_tax_rate", property.transfer_tax_rate, Decimal::ONE_HUNDRED)?;
    percent_within("notary_rate", property.notary_rate, Decimal::ONE_HUNDRED)?;
    percent_within("agent_rate", property.agent_rate, Decimal::ONE_HUNDRED)?;
    percent_within("registry_rate", property.registry_rate, Decimal::ONE_HUNDRED)?;
    Ok(())
}

/// Financing rules. Equity may not exceed what the purchase costs in total.
pub fn validate_financing_data(financing: &FinancingData, total_cost: Money) -> ImmoResult<()> {
    non_negative("equity", financing.equity)?;
    non_negative("debt", financing.debt)?;
    percent_within("equity_ratio", financing.equity_ratio, Decimal::ONE_HUNDRED)?;

    if financing.equity > total_cost {
        return Err(ImmoError::invalid(
            "equity",
            format!("must not exceed the total cost of {}", total_cost.round_dp(2)),
        ));
    }

    percent_within("interest_rate", financing.interest_rate, Decimal::ONE_HUNDRED)?;
    percent_within("repayment_rate", financing.repayment_rate, Decimal::ONE_HUNDRED)?;
    if let Some(extra) = financing.extra_repayment_rate {
        percent_within("extra_repayment_rate", extra, Decimal::ONE_HUNDRED)?;
    }
    Ok(())
}

fn growth_rate(field: &str, value: Percent) -> ImmoResult<()> {
    // shrinking is allowed, vanishing is not
    if value <= -Decimal::ONE_HUNDRED {
        return Err(ImmoError::invalid(field, "must be above -100"));
    }
    Ok(())
}

pub fn validate_rental_data(rental: &RentalData) -> ImmoResult<()> {
    non_negative("monthly_cold_rent", rental.monthly_cold_rent)?;
    non_negative("monthly_utility_cost", rental.monthly_utility_cost)?;
    non_negative("rent_per_sqm", rental.rent_per_sqm)?;
    growth_rate("rent_growth_rate", rental.rent_growth_rate)?;

    percent_within("vacancy_rate", rental.vacancy_rate, Decimal::ONE_HUNDRED)?;
    percent_within("management_cost_rate", rental.management_cost_rate, Decimal::ONE_HUNDRED)?;
    percent_within("maintenance_cost_rate", rental.maintenance_cost_rate, Decimal::ONE_HUNDRED)?;
    percent_within("reserve_rate", rental.reserve_rate, Decimal::ONE_HUNDRED)?;
    Ok(())
}

/// All three groups of the detailed calculator.
pub fn validate_detailed_input(input: &DetailedInput) -> ImmoResult<()> {
    validate_property_data(&input.property)?;
    validate_financing_data(&input.financing, input.property.total_cost())?;
    validate_rental_data(&input.rental)
}

pub fn validate_cash_flow_projection(projection: &CashFlowProjection) -> ImmoResult<()> {
    growth_rate("growth_rate", projection.growth_rate)
}
