use clap::{Args, ValueEnum};
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;

use immo_core::real_estate::comparison::{DetailedComparison, SimpleComparison};
use immo_core::real_estate::detailed::{self, DetailedInput};
use immo_core::real_estate::simple::{self, PropertyInput};
use immo_core::real_estate::validation::{validate_detailed_input, validate_property_input};
use immo_core::with_metadata;

use crate::config::CliConfig;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompareView {
    /// Yields and monthly cash flow per entry
    Yields,
    /// Annual cash flow per entry and year (detailed entries only)
    CashFlow,
}

/// Arguments for comparing saved calculations
#[derive(Args)]
pub struct CompareArgs {
    /// JSON/YAML file: `kind` ("simple" or "detailed") and a list of `entries`
    /// each with a `name` and an `input`
    #[arg(long)]
    pub input: Option<String>,

    /// What to compare
    #[arg(long, value_enum, default_value = "yields")]
    pub view: CompareView,

    /// Horizon for the cash-flow view (default from IMMO_PROJECTION_YEARS)
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Deserialize)]
struct NamedInput<I> {
    name: String,
    input: I,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ComparisonFile {
    Simple { entries: Vec<NamedInput<PropertyInput>> },
    Detailed { entries: Vec<NamedInput<DetailedInput>> },
}

pub fn run_compare(args: CompareArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let file: ComparisonFile = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for comparison")?;

    let start = Instant::now();
    let mut warnings = Vec::new();

    let value = match file {
        ComparisonFile::Simple { entries } => {
            let mut session = SimpleComparison::new();
            for entry in entries {
                validate_property_input(&entry.input)
                    .map_err(|e| format!("entry '{}': {e}", entry.name))?;
                let output = simple::compute_simple_metrics(&entry.input)?;
                warnings.extend(prefixed(&entry.name, output.warnings));
                session.add(entry.name, entry.input, output.result);
            }
            match args.view {
                CompareView::Yields => serde_json::to_value(with_metadata(
                    "Side-by-Side Yield Comparison",
                    &session.entries().iter().map(|e| &e.name).collect::<Vec<_>>(),
                    warnings,
                    start.elapsed().as_micros() as u64,
                    session.yield_rows(),
                ))?,
                CompareView::CashFlow => {
                    return Err("the cash-flow view needs detailed entries (kind: detailed)".into())
                }
            }
        }
        ComparisonFile::Detailed { entries } => {
            let mut session = DetailedComparison::new();
            for entry in entries {
                validate_detailed_input(&entry.input)
                    .map_err(|e| format!("entry '{}': {e}", entry.name))?;
                let output = detailed::compute_detailed(&entry.input)?;
                warnings.extend(prefixed(&entry.name, output.warnings));
                session.add(entry.name, entry.input, output.result);
            }
            let names: Vec<&String> = session.entries().iter().map(|e| &e.name).collect();
            match args.view {
                CompareView::Yields => serde_json::to_value(with_metadata(
                    "Side-by-Side Yield Comparison",
                    &names,
                    warnings,
                    start.elapsed().as_micros() as u64,
                    session.yield_rows(),
                ))?,
                CompareView::CashFlow => serde_json::to_value(with_metadata(
                    "Cash Flow Comparison (per-entry rent growth)",
                    &names,
                    warnings,
                    start.elapsed().as_micros() as u64,
                    session.cash_flow_comparison(args.years.unwrap_or(config.projection_years)),
                ))?,
            }
        }
    };

    Ok(value)
}

fn prefixed(name: &str, warnings: Vec<String>) -> impl Iterator<Item = String> + '_ {
    warnings.into_iter().map(move |w| format!("{name}: {w}"))
}
