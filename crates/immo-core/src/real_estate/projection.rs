use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::types::{percent_to_rate, Metric, Money, Percent, Rate, Years};

/// Cash flow compounded at a constant annual growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub initial_cash_flow: Money,
    /// Annual growth in percent
    pub growth_rate: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    pub year: Years,
    /// `None` from the first year that leaves the `Decimal` range
    pub cash_flow: Metric,
}

impl CashFlowProjection {
    /// Years `0..=years`, where year n is `initial * (1 + g)^n`.
    pub fn years(&self) -> ProjectedCashFlows {
        ProjectedCashFlows {
            year: 0,
            remaining: self.years as usize + 1,
            current: Some(self.initial_cash_flow),
            factor: Decimal::ONE + percent_to_rate(self.growth_rate),
        }
    }

    /// Sum of all projected cash flows, year 0 included. `None` when a year
    /// or the running total is out of range.
    pub fn cumulative(&self) -> Metric {
        self.years()
            .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.cash_flow?))
    }

    /// First projected year whose cash flow is out of range.
    pub fn out_of_range_from(&self) -> Option<Years> {
        self.years().find(|p| p.cash_flow.is_none()).map(|p| p.year)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectedCashFlows {
    year: Years,
    remaining: usize,
    current: Metric,
    factor: Rate,
}

impl Iterator for ProjectedCashFlows {
    type Item = ProjectedCashFlow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = ProjectedCashFlow {
            year: self.year,
            cash_flow: self.current,
        };
        self.remaining -= 1;
        // only step forward when another year is due
        if self.remaining > 0 {
            self.year += 1;
            self.current = self.current.and_then(|cf| cf.checked_mul(self.factor));
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProjectedCashFlows {}
impl FusedIterator for ProjectedCashFlows {}
