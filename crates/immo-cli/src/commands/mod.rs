pub mod compare;
pub mod detailed;
pub mod location;
pub mod series;
pub mod simple;

use clap::ValueEnum;
use immo_core::real_estate::debt_service::DebtServiceMethod;

/// `--method` flag values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Fully amortizing monthly annuity over the loan term
    Annuity,
    /// Interest rate plus initial repayment rate on the loan amount
    FlatRate,
}

impl From<MethodArg> for DebtServiceMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Annuity => DebtServiceMethod::Annuity,
            MethodArg::FlatRate => DebtServiceMethod::FlatRatePlusRepayment,
        }
    }
}
