use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use immo_core::real_estate::projection::{CashFlowProjection, ProjectedCashFlow};
use immo_core::real_estate::schedule::AmortizationPlan;
use immo_core::real_estate::validation::validate_cash_flow_projection;
use immo_core::{with_metadata, Metric};

use crate::config::CliConfig;
use crate::input;

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Loan amount in EUR
    #[arg(long)]
    pub debt: Option<Decimal>,

    /// Interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Initial repayment rate in percent
    #[arg(long)]
    pub repayment_rate: Option<Decimal>,

    /// Years to project (default from IMMO_PROJECTION_YEARS)
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the cash-flow projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CashFlowArgs {
    /// Annual cash flow in year 0, in EUR
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Annual growth in percent
    #[arg(long, default_value = "1.5")]
    pub growth_rate: Decimal,

    /// Years to project (default from IMMO_PROJECTION_YEARS)
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Serialize)]
struct ProjectionOutput {
    years: Vec<ProjectedCashFlow>,
    cumulative_cash_flow: Metric,
}

pub fn run_amortization(
    args: AmortizationArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: AmortizationPlan = match input::load(args.input.as_deref())? {
        Some(plan) => plan,
        None => AmortizationPlan {
            debt: args.debt.ok_or("--debt is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            repayment_rate: args
                .repayment_rate
                .ok_or("--repayment-rate is required (or provide --input)")?,
            term_years: args.years.unwrap_or(config.projection_years),
        },
    };
    if plan.debt < Decimal::ZERO {
        return Err("debt must not be negative".into());
    }

    let start = Instant::now();
    let summary = plan.schedule();

    let mut warnings = Vec::new();
    if summary.paid_off_in_year.is_none() && summary.closing_balance > Decimal::ZERO {
        warnings.push(format!(
            "Loan not repaid within {} years; {:.2} remains outstanding",
            plan.term_years, summary.closing_balance
        ));
    }

    let output = with_metadata(
        "Initial-Repayment Annuity Schedule (constant annual payment)",
        &plan,
        warnings,
        start.elapsed().as_micros() as u64,
        summary,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_cash_flow(args: CashFlowArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let projection: CashFlowProjection = match input::load(args.input.as_deref())? {
        Some(projection) => projection,
        None => CashFlowProjection {
            initial_cash_flow: args
                .initial
                .ok_or("--initial is required (or provide --input)")?,
            growth_rate: args.growth_rate,
            years: args.years.unwrap_or(config.projection_years),
        },
    };

    validate_cash_flow_projection(&projection)?;

    let start = Instant::now();
    let output = ProjectionOutput {
        years: projection.years().collect(),
        cumulative_cash_flow: projection.cumulative(),
    };

    let mut warnings = Vec::new();
    if let Some(year) = projection.out_of_range_from() {
        warnings.push(format!(
            "Cash flow exceeds the representable range from year {year} — later values are null"
        ));
    }

    let output = with_metadata(
        "Constant-Growth Cash Flow Projection",
        &projection,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    );
    Ok(serde_json::to_value(output)?)
}
