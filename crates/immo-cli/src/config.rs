use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Defaults for flags that are not given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// `IMMO_PROJECTION_YEARS`: horizon for amortization and cash-flow series
    pub projection_years: u32,
    /// `IMMO_TAX_RATE`: marginal income-tax rate in percent, for flags and for
    /// input records without `marginal_tax_rate`
    pub marginal_tax_rate: Decimal,
    /// `IMMO_LOCATION_SEED`: fixes the simulated location data
    pub location_seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            projection_years: 30,
            marginal_tax_rate: dec!(42),
            location_seed: None,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let defaults = Self::default();
        Ok(Self {
            projection_years: parse_var(&lookup, "IMMO_PROJECTION_YEARS")?
                .unwrap_or(defaults.projection_years),
            marginal_tax_rate: parse_var(&lookup, "IMMO_TAX_RATE")?
                .unwrap_or(defaults.marginal_tax_rate),
            location_seed: parse_var(&lookup, "IMMO_LOCATION_SEED")?,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{key}='{raw}' is not valid: {e}").into()),
        _ => Ok(None),
    }
}
