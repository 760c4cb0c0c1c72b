//! Building depreciation (AfA) and the resulting income-tax shield.
//!
//! Only the building is depreciable; the land share of the purchase price is
//! excluded before the linear rate is applied.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{percent_to_rate, Metric, Money, Percent};

/// Marginal income-tax rate assumed when none is supplied.
pub const DEFAULT_MARGINAL_TAX_RATE: Percent = dec!(42);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depreciation {
    /// Purchase price less the land share
    pub building_value: Money,
    /// Linear annual write-off
    pub annual_depreciation: Money,
    /// Income tax saved by the write-off at the marginal rate
    pub tax_saving: Money,
    /// Years until the building is fully written off (100 / rate);
    /// undefined for a zero rate
    pub write_off_years: Metric,
}

pub fn building_value(purchase_price: Money, land_ratio: Percent) -> Money {
    purchase_price * (Decimal::ONE - percent_to_rate(land_ratio))
}

pub fn annual_depreciation(building_value: Money, depreciation_rate: Percent) -> Money {
    building_value * percent_to_rate(depreciation_rate)
}

pub fn tax_saving(annual_depreciation: Money, marginal_tax_rate: Percent) -> Money {
    annual_depreciation * percent_to_rate(marginal_tax_rate)
}

/// Full depreciation breakdown for a purchase.
pub fn compute_depreciation(
    purchase_price: Money,
    land_ratio: Percent,
    depreciation_rate: Percent,
    marginal_tax_rate: Percent,
) -> Depreciation {
    let building_value = building_value(purchase_price, land_ratio);
    let annual_depreciation = annual_depreciation(building_value, depreciation_rate);

    Depreciation {
        building_value,
        annual_depreciation,
        tax_saving: tax_saving(annual_depreciation, marginal_tax_rate),
        write_off_years: Decimal::ONE_HUNDRED.checked_div(depreciation_rate),
    }
}
