use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ImmoError;
use crate::time_value::annuity_payment;
use crate::types::{percent_to_rate, Money, Percent, Years};
use crate::ImmoResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the periodic loan payment is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServiceMethod {
    /// Fully amortizing fixed-rate annuity, paid monthly:
    /// P * r(1+r)^n / ((1+r)^n - 1) with r = rate / 12, n = years * 12
    Annuity,
    /// Initial annual payment = debt * (interest rate + repayment rate),
    /// held constant. The usual German "Zins plus Anfangstilgung" quote.
    FlatRatePlusRepayment,
}

/// Loan parameters shared by both engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Outstanding principal at origination
    pub principal: Money,
    /// Nominal interest rate in percent per year
    pub interest_rate: Percent,
    /// Initial principal repayment in percent per year. When absent the
    /// flat-rate method falls back to straight-line repayment over the term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_rate: Option<Percent>,
    /// Loan term in years
    pub term_years: Years,
}

/// Periodic debt service derived from `LoanTerms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtService {
    pub method: DebtServiceMethod,
    pub monthly_payment: Money,
    pub annual_payment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute monthly and annual debt service for `loan` under `method`.
///
/// A zero principal costs nothing under either method, whatever the term.
pub fn debt_service(method: DebtServiceMethod, loan: &LoanTerms) -> ImmoResult<DebtService> {
    if loan.principal.is_zero() {
        return Ok(DebtService {
            method,
            monthly_payment: Decimal::ZERO,
            annual_payment: Decimal::ZERO,
        });
    }

    match method {
        DebtServiceMethod::Annuity => annuity_service(loan),
        DebtServiceMethod::FlatRatePlusRepayment => flat_rate_service(loan),
    }
}

fn annuity_service(loan: &LoanTerms) -> ImmoResult<DebtService> {
    if loan.term_years == 0 {
        return Err(ImmoError::undefined(
            "monthly_payment",
            "annuity over a zero-year term",
        ));
    }

    let monthly_rate = percent_to_rate(loan.interest_rate) / dec!(12);
    let periods = loan.term_years.checked_mul(12).ok_or_else(|| {
        ImmoError::undefined("monthly_payment", "loan term has too many monthly periods")
    })?;
    let monthly_payment = annuity_payment(loan.principal, monthly_rate, periods)?;
    let annual_payment = monthly_payment
        .checked_mul(dec!(12))
        .ok_or_else(|| ImmoError::undefined("annual_payment", "exceeds the representable range"))?;

    Ok(DebtService {
        method: DebtServiceMethod::Annuity,
        monthly_payment,
        annual_payment,
    })
}

fn flat_rate_service(loan: &LoanTerms) -> ImmoResult<DebtService> {
    let repayment_rate = match loan.repayment_rate {
        Some(t) => t,
        None if loan.term_years > 0 => Decimal::ONE_HUNDRED / Decimal::from(loan.term_years),
        None => {
            return Err(ImmoError::undefined(
                "annual_payment",
                "no repayment rate and a zero-year term",
            ))
        }
    };

    let annual_payment = loan.principal * percent_to_rate(loan.interest_rate + repayment_rate);

    Ok(DebtService {
        method: DebtServiceMethod::FlatRatePlusRepayment,
        monthly_payment: annual_payment / dec!(12),
        annual_payment,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
