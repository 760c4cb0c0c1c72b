use clap::Args;
use serde_json::Value;
use std::time::Instant;

use immo_core::location::{LocationLookup, PricingSource};
use immo_core::with_metadata;

use crate::config::CliConfig;

/// Arguments for the location price lookup
#[derive(Args)]
pub struct LocationArgs {
    /// City or address to look up (e.g. "Berlin", "80331 München")
    pub city: String,

    /// Seed for simulated values of unknown places (default from IMMO_LOCATION_SEED)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run_location(args: LocationArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let pricing = match args.seed.or(config.location_seed) {
        Some(seed) => LocationLookup::seeded(seed).lookup(&args.city)?,
        None => LocationLookup::from_entropy().lookup(&args.city)?,
    };

    let mut warnings = Vec::new();
    if pricing.source == PricingSource::Simulated {
        warnings.push(format!(
            "No reference data for '{}'; figures are simulated placeholders",
            args.city.trim()
        ));
    }

    let output = with_metadata(
        "Indicative Price and Rent per m² (reference table)",
        &args.city,
        warnings,
        start.elapsed().as_micros() as u64,
        pricing,
    );
    Ok(serde_json::to_value(output)?)
}
