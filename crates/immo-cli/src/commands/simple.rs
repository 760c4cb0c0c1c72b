use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use immo_core::real_estate::debt_service::DebtServiceMethod;
use immo_core::real_estate::simple::{self, PropertyInput};
use immo_core::real_estate::validation::validate_property_input;

use super::MethodArg;
use crate::config::CliConfig;
use crate::input;

/// Arguments for the quick property calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimpleArgs {
    /// Display name of the property
    #[arg(long, default_value = "Property")]
    pub name: String,

    /// City (descriptive)
    #[arg(long)]
    pub city: Option<String>,

    /// Purchase price in EUR
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Living area in m²
    #[arg(long)]
    pub living_area: Option<Decimal>,

    /// Year of construction
    #[arg(long)]
    pub construction_year: Option<u32>,

    /// Monthly cold rent in EUR
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Acquisition ancillary costs in EUR
    #[arg(long, default_value = "0")]
    pub ancillary_costs: Decimal,

    /// Renovation budget in EUR
    #[arg(long, default_value = "0")]
    pub renovation_costs: Decimal,

    /// Annual property tax in EUR
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual non-recoverable management costs in EUR
    #[arg(long, default_value = "0")]
    pub management_costs: Decimal,

    /// Annual maintenance allowance in EUR
    #[arg(long, default_value = "0")]
    pub maintenance_costs: Decimal,

    /// Loan interest rate in percent (3.5 = 3.5%)
    #[arg(long, default_value = "0")]
    pub interest_rate: Decimal,

    /// Loan amount in EUR
    #[arg(long, default_value = "0")]
    pub loan_amount: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub loan_term: u32,

    /// Land share of the purchase price in percent
    #[arg(long)]
    pub land_ratio: Option<Decimal>,

    /// Building depreciation rate in percent per year
    #[arg(long)]
    pub depreciation_rate: Option<Decimal>,

    /// Marginal income-tax rate in percent (default from IMMO_TAX_RATE)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Loan payment convention
    #[arg(long, value_enum, default_value = "annuity")]
    pub method: MethodArg,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simple(args: SimpleArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let property: PropertyInput = match input::load::<Value>(args.input.as_deref())? {
        Some(raw) => from_record(raw, config)?,
        None => from_flags(args, config)?,
    };

    validate_property_input(&property)?;
    let result = simple::compute_simple_metrics(&property)?;
    Ok(serde_json::to_value(result)?)
}

/// A file or stdin record. A missing `marginal_tax_rate` comes from the
/// config rather than the built-in default.
fn from_record(mut raw: Value, config: &CliConfig) -> Result<PropertyInput, Box<dyn std::error::Error>> {
    if let Value::Object(fields) = &mut raw {
        fields
            .entry("marginal_tax_rate")
            .or_insert_with(|| Value::String(config.marginal_tax_rate.to_string()));
    }
    Ok(serde_json::from_value(raw)?)
}

fn from_flags(args: SimpleArgs, config: &CliConfig) -> Result<PropertyInput, Box<dyn std::error::Error>> {
    Ok(PropertyInput {
        name: args.name,
        address: None,
        city: args.city,
        postal_code: None,
        purchase_price: args
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?,
        living_area: args
            .living_area
            .ok_or("--living-area is required (or provide --input)")?,
        construction_year: args
            .construction_year
            .ok_or("--construction-year is required (or provide --input)")?,
        monthly_rent: args
            .monthly_rent
            .ok_or("--monthly-rent is required (or provide --input)")?,
        ancillary_costs: args.ancillary_costs,
        renovation_costs: args.renovation_costs,
        property_tax: args.property_tax,
        management_costs: args.management_costs,
        maintenance_costs: args.maintenance_costs,
        interest_rate: args.interest_rate,
        loan_amount: args.loan_amount,
        loan_term_years: args.loan_term,
        land_ratio: args.land_ratio.unwrap_or(dec!(20)),
        depreciation_rate: args.depreciation_rate.unwrap_or(dec!(2)),
        marginal_tax_rate: args.tax_rate.unwrap_or(config.marginal_tax_rate),
        debt_service_method: DebtServiceMethod::from(args.method),
    })
}
