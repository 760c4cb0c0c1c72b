//! Year-by-year loan amortization under a constant initial annuity
//! (interest rate + initial repayment rate), as plotted in the repayment chart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::types::{percent_to_rate, Money, Percent, Rate, Years};

/// Parameters of the amortization projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPlan {
    pub debt: Money,
    /// Interest rate in percent per year
    pub interest_rate: Percent,
    /// Initial repayment rate in percent per year
    pub repayment_rate: Percent,
    /// Projection horizon in years
    pub term_years: Years,
}

/// One year of the projection. `remaining_principal` is the balance at the
/// start of the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: Years,
    pub remaining_principal: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
}

/// A collected schedule with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub annual_payment: Money,
    pub years: Vec<AmortizationYear>,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Balance left after the last projected year
    pub closing_balance: Money,
    /// Year in which the loan was repaid, if within the horizon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_off_in_year: Option<Years>,
}

impl AmortizationPlan {
    /// Fixed annual payment, debt * (interest + repayment); never recalculated.
    pub fn annual_payment(&self) -> Money {
        self.debt * percent_to_rate(self.interest_rate + self.repayment_rate)
    }

    /// Lazily iterate the projection from year 0. Each call starts afresh.
    ///
    /// Yields years `0..=term_years`, stopping after the year in which the
    /// remaining principal reaches zero.
    pub fn years(&self) -> AmortizationYears {
        AmortizationYears {
            year: 0,
            term_years: self.term_years,
            remaining: self.debt,
            payment: self.annual_payment(),
            rate: percent_to_rate(self.interest_rate),
            finished: self.debt <= Decimal::ZERO,
        }
    }

    /// Principal still outstanding once the projection ends.
    pub fn closing_balance(&self) -> Money {
        self.years()
            .last()
            .map(|y| y.remaining_principal - y.principal_portion)
            .unwrap_or(self.debt.max(Decimal::ZERO))
    }

    /// Collect the projection together with its totals.
    pub fn schedule(&self) -> AmortizationSummary {
        let years: Vec<AmortizationYear> = self.years().collect();

        let total_interest: Money = years.iter().map(|y| y.interest_portion).sum();
        let total_principal: Money = years.iter().map(|y| y.principal_portion).sum();
        let closing_balance = years
            .last()
            .map(|y| y.remaining_principal - y.principal_portion)
            .unwrap_or(self.debt.max(Decimal::ZERO));
        let paid_off_in_year = match years.last() {
            Some(last) if closing_balance.is_zero() => Some(last.year),
            _ => None,
        };

        tracing::debug!(
            years = years.len(),
            %closing_balance,
            "built amortization schedule"
        );

        AmortizationSummary {
            annual_payment: self.annual_payment(),
            years,
            total_interest,
            total_principal,
            closing_balance,
            paid_off_in_year,
        }
    }
}

/// Iterator returned by [`AmortizationPlan::years`].
#[derive(Debug, Clone)]
pub struct AmortizationYears {
    year: Years,
    term_years: Years,
    remaining: Money,
    payment: Money,
    rate: Rate,
    finished: bool,
}

impl Iterator for AmortizationYears {
    type Item = AmortizationYear;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.year > self.term_years {
            return None;
        }

        let interest_portion = self.remaining * self.rate;
        // the final instalment only repays what is left
        let principal_portion = (self.payment - interest_portion)
            .min(self.remaining)
            .max(Decimal::ZERO);

        let record = AmortizationYear {
            year: self.year,
            remaining_principal: self.remaining,
            interest_portion,
            principal_portion,
        };

        self.remaining = (self.remaining - principal_portion).max(Decimal::ZERO);
        if self.remaining.is_zero() {
            self.finished = true;
        }
        self.year += 1;

        Some(record)
    }
}

impl FusedIterator for AmortizationYears {}
