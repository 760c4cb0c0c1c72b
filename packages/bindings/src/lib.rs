use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use immo_core::location::LocationLookup;
use immo_core::real_estate::comparison::{DetailedComparison, EntryId, SimpleComparison};
use immo_core::real_estate::detailed::{self, DetailedInput};
use immo_core::real_estate::projection::{CashFlowProjection, ProjectedCashFlow};
use immo_core::real_estate::schedule::AmortizationPlan;
use immo_core::real_estate::simple::{self, PropertyInput};
use immo_core::real_estate::validation::{
    validate_cash_flow_projection, validate_detailed_input, validate_property_input,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_simple_metrics(input_json: String) -> NapiResult<String> {
    let input: PropertyInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validate_property_input(&input).map_err(to_napi_error)?;
    let output = simple::compute_simple_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_detailed_metrics(input_json: String) -> NapiResult<String> {
    let input: DetailedInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validate_detailed_input(&input).map_err(to_napi_error)?;
    let output = detailed::compute_detailed(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let plan: AmortizationPlan = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&plan.schedule()).map_err(to_napi_error)
}

#[derive(Serialize)]
struct Projection {
    years: Vec<ProjectedCashFlow>,
    cumulative_cash_flow: Option<rust_decimal::Decimal>,
    /// First year past the representable range, if any
    out_of_range_from: Option<u32>,
}

#[napi]
pub fn cash_flow_projection(input_json: String) -> NapiResult<String> {
    let projection: CashFlowProjection =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validate_cash_flow_projection(&projection).map_err(to_napi_error)?;
    let output = Projection {
        years: projection.years().collect(),
        cumulative_cash_flow: projection.cumulative(),
        out_of_range_from: projection.out_of_range_from(),
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Price and rent levels for `city`. A seed makes simulated values repeatable.
#[napi]
pub fn lookup_location(city: String, seed: Option<i64>) -> NapiResult<String> {
    let pricing = match seed {
        Some(seed) => LocationLookup::seeded(seed as u64).lookup(&city),
        None => LocationLookup::from_entropy().lookup(&city),
    }
    .map_err(to_napi_error)?;
    serde_json::to_string(&pricing).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison session
// ---------------------------------------------------------------------------

enum Session {
    Simple(SimpleComparison),
    Detailed(DetailedComparison),
}

/// Saved calculations for side-by-side comparison. Created for one kind of
/// calculator, "simple" or "detailed".
#[napi(js_name = "ComparisonSession")]
pub struct JsComparisonSession {
    inner: Session,
}

#[napi]
impl JsComparisonSession {
    #[napi(constructor)]
    pub fn new(kind: String) -> napi::Result<Self> {
        let inner = match kind.as_str() {
            "simple" => Session::Simple(SimpleComparison::new()),
            "detailed" => Session::Detailed(DetailedComparison::new()),
            other => {
                return Err(to_napi_error(format!(
                    "unknown comparison kind '{other}', expected 'simple' or 'detailed'"
                )))
            }
        };
        Ok(Self { inner })
    }

    /// Compute `input_json` and save it under `name`. Returns the entry id.
    #[napi]
    pub fn add(&mut self, name: String, input_json: String) -> NapiResult<i64> {
        let id = match &mut self.inner {
            Session::Simple(session) => {
                let input: PropertyInput =
                    serde_json::from_str(&input_json).map_err(to_napi_error)?;
                validate_property_input(&input).map_err(to_napi_error)?;
                let output = simple::compute_simple_metrics(&input).map_err(to_napi_error)?;
                session.add(name, input, output.result)
            }
            Session::Detailed(session) => {
                let input: DetailedInput =
                    serde_json::from_str(&input_json).map_err(to_napi_error)?;
                validate_detailed_input(&input).map_err(to_napi_error)?;
                let output = detailed::compute_detailed(&input).map_err(to_napi_error)?;
                session.add(name, input, output.result)
            }
        };
        Ok(id.0 as i64)
    }

    /// Remove an entry and return it as JSON.
    #[napi]
    pub fn remove(&mut self, id: i64) -> NapiResult<String> {
        let id = EntryId(id as u64);
        match &mut self.inner {
            Session::Simple(session) => {
                let entry = session.remove(id).map_err(to_napi_error)?;
                serde_json::to_string(&entry).map_err(to_napi_error)
            }
            Session::Detailed(session) => {
                let entry = session.remove(id).map_err(to_napi_error)?;
                serde_json::to_string(&entry).map_err(to_napi_error)
            }
        }
    }

    #[napi]
    pub fn entries(&self) -> NapiResult<String> {
        match &self.inner {
            Session::Simple(session) => serde_json::to_string(session.entries()),
            Session::Detailed(session) => serde_json::to_string(session.entries()),
        }
        .map_err(to_napi_error)
    }

    #[napi]
    pub fn yield_rows(&self) -> NapiResult<String> {
        match &self.inner {
            Session::Simple(session) => serde_json::to_string(&session.yield_rows()),
            Session::Detailed(session) => serde_json::to_string(&session.yield_rows()),
        }
        .map_err(to_napi_error)
    }

    #[napi]
    pub fn cash_flow_comparison(&self, years: u32) -> NapiResult<String> {
        match &self.inner {
            Session::Simple(_) => Err(to_napi_error(
                "cash-flow comparison needs a detailed session",
            )),
            Session::Detailed(session) => {
                serde_json::to_string(&session.cash_flow_comparison(years)).map_err(to_napi_error)
            }
        }
    }

    #[napi(getter)]
    pub fn length(&self) -> u32 {
        match &self.inner {
            Session::Simple(session) => session.len() as u32,
            Session::Detailed(session) => session.len() as u32,
        }
    }

    #[napi]
    pub fn clear(&mut self) {
        match &mut self.inner {
            Session::Simple(session) => session.clear(),
            Session::Detailed(session) => session.clear(),
        }
    }
}
