//! Side-by-side comparison of saved calculations.
//!
//! A session is an owned, ordered list of named snapshots. Entries are
//! appended by [`ComparisonSession::add`], dropped by id, and never edited;
//! insertion order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ImmoError;
use crate::types::{Metric, Years};
use crate::ImmoResult;

use super::detailed::{DetailedInput, DetailedResult};
use super::projection::CashFlowProjection;
use super::simple::{PropertyInput, PropertyResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Session-scoped entry identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved calculation: the inputs and the result they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry<I, R> {
    pub id: EntryId,
    pub name: String,
    pub input: I,
    pub result: R,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSession<I, R> {
    entries: Vec<ComparisonEntry<I, R>>,
    next_id: u64,
}

/// Saved quick calculations.
pub type SimpleComparison = ComparisonSession<PropertyInput, PropertyResult>;

/// Saved detailed calculations.
pub type DetailedComparison = ComparisonSession<DetailedInput, DetailedResult>;

/// One line of the yield comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRow {
    pub id: EntryId,
    pub name: String,
    pub gross_yield: Metric,
    pub net_yield: Metric,
    /// Detailed calculations only
    pub property_yield: Metric,
    /// Detailed calculations only
    pub equity_yield: Metric,
    pub monthly_cash_flow: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowComparisonRow {
    pub year: Years,
    /// One value per entry, in session order
    pub cash_flows: Vec<Metric>,
}

/// Annual cash flow of every entry over a common horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowComparison {
    pub names: Vec<String>,
    pub rows: Vec<CashFlowComparisonRow>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

impl<I, R> Default for ComparisonSession<I, R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<I, R> ComparisonSession<I, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot and return its id.
    pub fn add(&mut self, name: impl Into<String>, input: I, result: R) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let name = name.into();
        tracing::debug!(%id, name = name.as_str(), "added comparison entry");

        self.entries.push(ComparisonEntry {
            id,
            name,
            input,
            result,
            created_at: Utc::now(),
        });
        id
    }

    /// Remove and return the entry with `id`. Order of the rest is kept.
    pub fn remove(&mut self, id: EntryId) -> ImmoResult<ComparisonEntry<I, R>> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ImmoError::NotFound { id: id.0 })?;
        tracing::debug!(%id, "removed comparison entry");
        Ok(self.entries.remove(pos))
    }

    pub fn get(&self, id: EntryId) -> Option<&ComparisonEntry<I, R>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ComparisonEntry<I, R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

impl SimpleComparison {
    pub fn yield_rows(&self) -> Vec<YieldRow> {
        self.entries
            .iter()
            .map(|e| YieldRow {
                id: e.id,
                name: e.name.clone(),
                gross_yield: e.result.gross_yield,
                net_yield: e.result.net_yield,
                property_yield: None,
                equity_yield: None,
                monthly_cash_flow: e.result.monthly_cash_flow,
            })
            .collect()
    }
}

impl DetailedComparison {
    pub fn yield_rows(&self) -> Vec<YieldRow> {
        self.entries
            .iter()
            .map(|e| YieldRow {
                id: e.id,
                name: e.name.clone(),
                gross_yield: e.result.yields.gross,
                net_yield: e.result.yields.net,
                property_yield: e.result.yields.property,
                equity_yield: e.result.yields.equity,
                monthly_cash_flow: e.result.cash_flow.monthly,
            })
            .collect()
    }

    /// Years `0..=years`; each entry's annual cash flow grows at its own rent
    /// growth rate. Undefined or out-of-range cash flows stay `None`.
    pub fn cash_flow_comparison(&self, years: Years) -> CashFlowComparison {
        let columns: Vec<Vec<Metric>> = self
            .entries
            .iter()
            .map(|e| match e.result.cash_flow.annual {
                Some(initial) => CashFlowProjection {
                    initial_cash_flow: initial,
                    growth_rate: e.input.rental.rent_growth_rate,
                    years,
                }
                .years()
                .map(|p| p.cash_flow)
                .collect(),
                None => vec![None; years as usize + 1],
            })
            .collect();

        let rows = (0..=years)
            .map(|year| CashFlowComparisonRow {
                year,
                cash_flows: columns.iter().map(|c| c[year as usize]).collect(),
            })
            .collect();

        CashFlowComparison {
            names: self.entries.iter().map(|e| e.name.clone()).collect(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
