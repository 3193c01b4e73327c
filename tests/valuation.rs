//! End-to-end valuation scenarios combining projection, growth
//! estimation, discounting and blending.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use rust_valuation::analysis::comparables::{
    combine_valuations, equity_value_from_ev_ebitda, equity_value_from_pe,
};
use rust_valuation::analysis::dcf::{project_constant_growth, valuate};
use rust_valuation::analysis::fcf::{average_fcf_margin, fcf_from_statements, project_from_revenue};
use rust_valuation::analysis::growth::estimate_growth;
use rust_valuation::error::{ConfigError, DataError, Error, ValuationError};
use rust_valuation::models::{CashFlowSeries, ValuationAssumptions};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}

fn base_assumptions() -> ValuationAssumptions {
    ValuationAssumptions {
        discount_rate: 0.10,
        terminal_growth_rate: 0.03,
        growth_rate: 0.05,
        net_debt: 0.0,
        share_count: 1.0,
        unit_multiplier: 1.0,
    }
}

#[test]
fn test_full_dcf_pipeline_from_base_fcf() {
    // FCF.py scenario: FCF 38 from statements, 5% growth, 5 years,
    // 10% WACC, 3% terminal growth, 150 net debt, 50M shares.
    let fcf_0 = fcf_from_statements(48.0, 20.0, 5.0, 25.0);
    assert_eq!(fcf_0, 38.0);

    let forecast = project_constant_growth(fcf_0, 0.05, 5).unwrap();
    let assumptions = ValuationAssumptions {
        discount_rate: 0.10,
        terminal_growth_rate: 0.03,
        growth_rate: 0.05,
        net_debt: 150.0,
        share_count: 50_000_000.0,
        unit_multiplier: 1_000_000.0,
    };

    let result = valuate(&forecast, &assumptions).unwrap();

    // Terminal value off year-5 FCF: 38 * 1.05^5 * 1.03 / 0.07.
    let fcf_5 = 38.0 * 1.05f64.powi(5);
    let tv = fcf_5 * 1.03 / 0.07;
    assert_close(result.terminal_value, tv, 1e-6);
    assert_close(result.pv_of_terminal_value, tv / 1.1f64.powi(5), 1e-6);

    assert_close(result.equity_value, result.enterprise_value - 150.0, 1e-9);
    assert_close(
        result.fair_value_per_share,
        result.equity_value * 1_000_000.0 / 50_000_000.0,
        1e-9,
    );
}

#[test]
fn test_spec_scenario_three_year_series() {
    let series = CashFlowSeries::from_amounts(vec![100.0, 105.0, 110.25]).unwrap();
    let result = valuate(&series, &base_assumptions()).unwrap();

    assert_close(result.present_values[0], 90.91, 0.01);
    assert_close(result.present_values[1], 86.78, 0.01);
    assert_close(result.present_values[2], 82.83, 0.01);
    assert_close(result.pv_of_cash_flows, 260.52, 0.01);
    assert_close(result.terminal_value, 110.25 * 1.03 / 0.07, 1e-9);
    assert_close(result.pv_of_terminal_value, 1218.82, 0.01);
    assert_close(result.enterprise_value, 1479.34, 0.01);
}

#[test]
fn test_growth_estimation_feeds_projection() {
    // fcf_v1.0.0.py flow: estimate growth from history, compound the last
    // observation forward, then value the forecast.
    let history = CashFlowSeries::from_amounts(vec![100.0, 95.0, 120.0]).unwrap();
    let estimate = estimate_growth(&history).unwrap();

    assert_eq!(estimate.observations, 2);
    assert_close(estimate.average, 0.1066, 0.0005);
    assert_close(estimate.trimmed_mean, estimate.average, 1e-12);

    let forecast = project_constant_growth(history.last(), estimate.trimmed_mean, 4).unwrap();
    assert_eq!(forecast.len(), 4);
    assert_close(
        forecast.amounts()[0],
        120.0 * (1.0 + estimate.trimmed_mean),
        1e-9,
    );

    let result = valuate(&forecast, &base_assumptions()).unwrap();
    assert!(result.enterprise_value > 0.0);
}

#[test]
fn test_ipo_blend_scenario() {
    // IPO_Valuation.py scenario: DCF + P/E + EV/EBITDA blended 50/25/25.
    let forecast = CashFlowSeries::from_amounts(vec![10.0, 14.0, 18.0, 22.0, 26.0]).unwrap();
    let assumptions = ValuationAssumptions {
        discount_rate: 0.12,
        terminal_growth_rate: 0.03,
        growth_rate: 0.0,
        net_debt: 50.0,
        share_count: 100_000_000.0,
        unit_multiplier: 1_000_000.0,
    };

    let dcf = valuate(&forecast, &assumptions).unwrap();

    let pe_equity = equity_value_from_pe(&[18.0, 20.0, 22.0], 20.0).unwrap();
    assert_close(pe_equity, 400.0, 1e-9);

    let ev_ebitda_equity =
        equity_value_from_ev_ebitda(&[9.0, 10.0, 11.0], 35.0, 50.0).unwrap();
    assert_close(ev_ebitda_equity, 300.0, 1e-9);

    let weighted = combine_valuations(
        &[dcf.equity_value, pe_equity, ev_ebitda_equity],
        &[0.5, 0.25, 0.25],
    )
    .unwrap();
    assert_close(
        weighted,
        0.5 * dcf.equity_value + 0.25 * 400.0 + 0.25 * 300.0,
        1e-9,
    );
}

#[test]
fn test_weighted_blend_identity() {
    let weighted =
        combine_valuations(&[1000.0, 900.0, 1100.0], &[0.5, 0.25, 0.25]).unwrap();
    assert_close(weighted, 1000.0, 1e-12);
}

#[test]
fn test_revenue_margin_forecast_pipeline() {
    // dcf_ipo_interactive.py mode 1: revenue growth plus average margin.
    let margin = average_fcf_margin(&[400.0, 450.0, 500.0], &[60.0, 63.0, 80.0]).unwrap();
    let forecast = project_from_revenue(500.0, 0.06, margin, 5).unwrap();

    assert_eq!(forecast.len(), 5);
    assert_close(forecast.amounts()[0], 500.0 * 1.06 * margin, 1e-9);

    let result = valuate(&forecast, &base_assumptions()).unwrap();
    assert!(result.fair_value_per_share > 0.0);
}

#[test]
fn test_error_taxonomy_surfaces_to_caller() {
    let series = CashFlowSeries::from_amounts(vec![100.0, 105.0]).unwrap();

    // Terminal growth at the discount rate: undefined perpetuity.
    let mut assumptions = base_assumptions();
    assumptions.terminal_growth_rate = 0.10;
    assert_matches!(
        valuate(&series, &assumptions),
        Err(Error::Valuation(
            ValuationError::TerminalGrowthExceedsDiscount { .. }
        ))
    );

    // Non-positive share count.
    let mut assumptions = base_assumptions();
    assumptions.share_count = 0.0;
    assert_matches!(
        valuate(&series, &assumptions),
        Err(Error::Config(ConfigError::NonPositiveShareCount { .. }))
    );

    // Zero predecessor in a growth computation.
    let zero_series = CashFlowSeries::from_amounts(vec![0.0, 50.0]).unwrap();
    assert_matches!(
        estimate_growth(&zero_series),
        Err(Error::Data(DataError::ZeroBaseValue { period: 1 }))
    );

    // Empty series is rejected at construction.
    assert_matches!(
        CashFlowSeries::from_amounts(vec![]),
        Err(Error::Data(DataError::SeriesTooShort { .. }))
    );
}

#[test]
fn test_deserialization_rejects_empty_series() {
    // An empty JSON array must fail at the boundary, not slip past the
    // series invariant and blow up later inside valuate.
    let parsed = serde_json::from_str::<CashFlowSeries>("[]");
    assert!(parsed.is_err());
    assert!(parsed
        .unwrap_err()
        .to_string()
        .contains("need at least 1"));

    let ok: CashFlowSeries = serde_json::from_str("[100.0, 105.0]").unwrap();
    assert_eq!(ok.len(), 2);
}

#[test]
fn test_result_serializes_to_json() {
    let series = CashFlowSeries::from_amounts(vec![100.0, 105.0, 110.25]).unwrap();
    let result = valuate(&series, &base_assumptions()).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: rust_valuation::ValuationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
