use immo_core::real_estate::debt_service::DebtServiceMethod;
use immo_core::real_estate::simple::{compute_simple_metrics, PropertyInput};
use immo_core::real_estate::validation::validate_property_input;
use immo_core::ImmoError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Quick calculator
// ===========================================================================

fn apartment() -> PropertyInput {
    // 80 m² flat, 300k purchase, 80% financed over 30 years
    serde_json::from_value(serde_json::json!({
        "name": "Eigentumswohnung Südvorstadt",
        "city": "Leipzig",
        "postal_code": "04275",
        "purchase_price": 300000,
        "living_area": 80,
        "construction_year": 1995,
        "monthly_rent": 1000,
        "ancillary_costs": 30000,
        "renovation_costs": 0,
        "property_tax": 300,
        "management_costs": 0,
        "maintenance_costs": 1200,
        "interest_rate": 3.5,
        "loan_amount": 240000,
        "loan_term_years": 30,
        "land_ratio": 20,
        "depreciation_rate": 2
    }))
    .unwrap()
}

#[test]
fn test_quick_calculation_end_to_end() {
    let input = apartment();
    validate_property_input(&input).unwrap();

    let output = compute_simple_metrics(&input).unwrap();
    let r = &output.result;

    // Total investment = 300k + 30k ancillary
    assert_eq!(r.total_investment, dec!(330000));
    // Net rent = 12000 - 1500
    assert_eq!(r.annual_net_rent, dec!(10500));

    // Annuity on 240k at 3.5% over 30 years ≈ 1077.71 / month
    let monthly = r.monthly_payment.unwrap();
    assert!((monthly - dec!(1077.71)).abs() < dec!(0.01), "monthly {monthly}");

    // Cash flow = 10500 - 12932.52 ≈ -2432.5
    let cf = r.cash_flow.unwrap();
    assert!((cf - dec!(-2432.5)).abs() < dec!(0.1), "cash flow {cf}");
    assert_eq!(r.monthly_cash_flow.unwrap(), cf / dec!(12));

    assert_eq!(r.price_per_sqm, Some(dec!(3750)));
    assert_eq!(r.rent_per_sqm, Some(dec!(12.5)));
    assert_eq!(r.purchase_price_multiplier, Some(dec!(25)));

    assert!(output
        .warnings
        .iter()
        .any(|w| w.to_lowercase().contains("negative")));
}

#[test]
fn test_envelope_shape() {
    let output = compute_simple_metrics(&apartment()).unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert!(json.get("result").is_some());
    assert!(json["methodology"].as_str().unwrap().contains("Annuity"));
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
    assert_eq!(json["assumptions"]["loan_term_years"], 30);
}

#[test]
fn test_undefined_metrics_serialize_as_null() {
    let input = PropertyInput {
        monthly_rent: Decimal::ZERO,
        ..apartment()
    };
    let output = compute_simple_metrics(&input).unwrap();
    let json = serde_json::to_value(&output.result).unwrap();

    assert!(json["purchase_price_multiplier"].is_null());
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("purchase_price_multiplier")));
    // gross yield is still defined: 0 / 330000
    assert_eq!(output.result.gross_yield, Some(Decimal::ZERO));
}

#[test]
fn test_method_changes_only_debt_service() {
    let annuity = compute_simple_metrics(&apartment()).unwrap().result;
    let flat = compute_simple_metrics(&PropertyInput {
        debt_service_method: DebtServiceMethod::FlatRatePlusRepayment,
        ..apartment()
    })
    .unwrap()
    .result;

    assert_ne!(annuity.annual_debt_service, flat.annual_debt_service);
    assert_eq!(annuity.gross_yield, flat.gross_yield);
    assert_eq!(annuity.tax_saving, flat.tax_saving);
}

#[test]
fn test_validation_rejects_bad_form_values() {
    let input = PropertyInput {
        living_area: Decimal::ZERO,
        ..apartment()
    };
    match validate_property_input(&input) {
        Err(ImmoError::InvalidInput { field, .. }) => assert_eq!(field, "living_area"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_price_per_sqm_reconstructs_price() {
    let prices = [dec!(300000), dec!(187654.32), dec!(99999)];
    let areas = [dec!(3), dec!(7), dec!(83.3), dec!(41.17), dec!(80)];

    for price in prices {
        for area in areas {
            let input = PropertyInput {
                purchase_price: price,
                living_area: area,
                ..apartment()
            };
            let r = compute_simple_metrics(&input).unwrap().result;
            let per_sqm = r.price_per_sqm.unwrap();
            let gap = (per_sqm * area - price).abs();
            assert!(gap < dec!(0.000001), "{price} / {area}: off by {gap}");
        }
    }
}

#[test]
fn test_valid_steep_annuity_reports_undefined_payment() {
    // accepted by the form rules, but (1 + 1/12)^1200 leaves the Decimal range
    let input = PropertyInput {
        interest_rate: dec!(100),
        loan_term_years: 100,
        ..apartment()
    };
    validate_property_input(&input).unwrap();

    let output = compute_simple_metrics(&input).unwrap();
    assert_eq!(output.result.monthly_payment, None);
    assert_eq!(output.result.cash_flow, None);
    assert!(output.warnings.iter().any(|w| w.contains("monthly_payment")));
    assert_eq!(output.result.annual_net_rent, dec!(10500));
}
