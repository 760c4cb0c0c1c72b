use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use immo_core::real_estate::debt_service::DebtServiceMethod;
use immo_core::real_estate::detailed::{self, DetailedInput, FinancingData, PropertyData, RentalData};
use immo_core::real_estate::validation::validate_detailed_input;

use super::MethodArg;
use crate::input;

/// Arguments for the detailed profitability calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DetailedArgs {
    /// Purchase price in EUR
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Living area in m²
    #[arg(long)]
    pub living_area: Option<Decimal>,

    /// Plot area in m²
    #[arg(long, default_value = "0")]
    pub plot_area: Decimal,

    /// Year of construction
    #[arg(long)]
    pub construction_year: Option<u32>,

    /// Real-estate transfer tax in percent of the price
    #[arg(long, default_value = "5.0")]
    pub transfer_tax: Decimal,

    /// Notary fees in percent of the price
    #[arg(long, default_value = "1.5")]
    pub notary: Decimal,

    /// Agent commission in percent of the price
    #[arg(long, default_value = "3.57")]
    pub agent: Decimal,

    /// Land registry fees in percent of the price
    #[arg(long, default_value = "0.5")]
    pub registry: Decimal,

    /// Equity in EUR (takes precedence over --equity-ratio)
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Equity in percent of the total cost
    #[arg(long, default_value = "20")]
    pub equity_ratio: Decimal,

    /// Loan interest rate in percent
    #[arg(long, default_value = "3.5")]
    pub interest_rate: Decimal,

    /// Initial repayment rate in percent
    #[arg(long, default_value = "2.0")]
    pub repayment_rate: Decimal,

    /// Fixed-rate period in years
    #[arg(long, default_value = "10")]
    pub rate_lock: u32,

    /// Loan term in years (annuity method)
    #[arg(long, default_value = "30")]
    pub loan_term: u32,

    /// Loan payment convention
    #[arg(long, value_enum, default_value = "flat-rate")]
    pub method: MethodArg,

    /// Monthly cold rent in EUR
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Monthly recoverable utility costs in EUR
    #[arg(long, default_value = "0")]
    pub utility_cost: Decimal,

    /// Expected annual rent growth in percent
    #[arg(long, default_value = "1.5")]
    pub rent_growth: Decimal,

    /// Vacancy rate in percent
    #[arg(long, default_value = "3.0")]
    pub vacancy: Decimal,

    /// Management costs in percent of the annual rent
    #[arg(long, default_value = "5.0")]
    pub management: Decimal,

    /// Maintenance costs in percent of the price per year
    #[arg(long, default_value = "1.5")]
    pub maintenance: Decimal,

    /// Capital reserve in percent of the price per year
    #[arg(long, default_value = "1.0")]
    pub reserve: Decimal,

    /// Path to JSON/YAML input file with property, financing and rental groups
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_detailed(args: DetailedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis: DetailedInput = match input::load(args.input.as_deref())? {
        Some(analysis) => analysis,
        None => from_flags(args)?,
    };

    validate_detailed_input(&analysis)?;
    let result = detailed::compute_detailed(&analysis)?;
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: DetailedArgs) -> Result<DetailedInput, Box<dyn std::error::Error>> {
    let property = PropertyData {
        purchase_price: args
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?,
        living_area: args
            .living_area
            .ok_or("--living-area is required (or provide --input)")?,
        plot_area: args.plot_area,
        construction_year: args
            .construction_year
            .ok_or("--construction-year is required (or provide --input)")?,
        condition: Default::default(),
        location: Default::default(),
        transfer_tax_rate: args.transfer_tax,
        notary_rate: args.notary,
        agent_rate: args.agent,
        registry_rate: args.registry,
    };

    let total_cost = property.total_cost();
    let mut financing = match args.equity {
        Some(equity) => FinancingData::from_equity_amount(
            total_cost,
            equity,
            args.interest_rate,
            args.repayment_rate,
        )?,
        None => FinancingData::from_equity_ratio(
            total_cost,
            args.equity_ratio,
            args.interest_rate,
            args.repayment_rate,
        )?,
    };
    financing.rate_lock_years = args.rate_lock;
    financing.loan_term_years = args.loan_term;
    financing.debt_service_method = DebtServiceMethod::from(args.method);

    let monthly_cold_rent = args
        .monthly_rent
        .ok_or("--monthly-rent is required (or provide --input)")?;
    let rental = RentalData {
        monthly_cold_rent,
        monthly_utility_cost: args.utility_cost,
        rent_per_sqm: monthly_cold_rent
            .checked_div(property.living_area)
            .unwrap_or(Decimal::ZERO),
        rent_growth_rate: args.rent_growth,
        vacancy_rate: args.vacancy,
        management_cost_rate: args.management,
        maintenance_cost_rate: args.maintenance,
        reserve_rate: args.reserve,
    };

    Ok(DetailedInput {
        property,
        financing,
        rental,
    })
}
