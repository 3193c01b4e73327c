//! Free-cash-flow derivation from statement line items, and the
//! revenue-times-margin forecasting model.

use tracing::debug;

use crate::error::{ConfigError, DataError, Result};
use crate::models::CashFlowSeries;

/// Free cash flow to the firm, approximated from income-statement and
/// balance-sheet line items:
///
/// `FCF = net income + D&A - change in working capital - capex`
///
/// `change_in_working_capital` is positive for a cash outflow (working
/// capital increased); `capex` is the positive spend amount.
pub fn fcf_from_statements(
    net_income: f64,
    depreciation_amortization: f64,
    change_in_working_capital: f64,
    capex: f64,
) -> f64 {
    net_income + depreciation_amortization - change_in_working_capital - capex
}

/// Average FCF margin (FCF / revenue) over aligned historical series.
pub fn average_fcf_margin(revenue: &[f64], fcf: &[f64]) -> Result<f64> {
    if revenue.len() != fcf.len() {
        return Err(DataError::LengthMismatch {
            left: revenue.len(),
            right: fcf.len(),
        }
        .into());
    }
    if revenue.is_empty() {
        return Err(DataError::SeriesTooShort {
            required: 1,
            actual: 0,
        }
        .into());
    }

    let mut sum = 0.0;
    for (i, (&rev, &cf)) in revenue.iter().zip(fcf.iter()).enumerate() {
        if rev == 0.0 {
            return Err(DataError::ZeroRevenue { period: i + 1 }.into());
        }
        sum += cf / rev;
    }

    Ok(sum / revenue.len() as f64)
}

/// Forecast FCF by compounding revenue and applying a constant FCF margin:
/// period t revenue is `last_revenue * (1 + revenue_growth)^t`, and FCF is
/// revenue times `fcf_margin`.
pub fn project_from_revenue(
    last_revenue: f64,
    revenue_growth: f64,
    fcf_margin: f64,
    horizon_periods: usize,
) -> Result<CashFlowSeries> {
    if horizon_periods == 0 {
        return Err(DataError::EmptyHorizon.into());
    }
    if revenue_growth <= -1.0 {
        return Err(ConfigError::RateBelowNegativeOne {
            field: "revenue_growth",
            value: revenue_growth,
        }
        .into());
    }

    let amounts: Vec<f64> = (1..=horizon_periods)
        .map(|t| last_revenue * (1.0 + revenue_growth).powi(t as i32) * fcf_margin)
        .collect();

    debug!(
        last_revenue,
        revenue_growth, fcf_margin, horizon_periods, "projected FCF from revenue"
    );

    CashFlowSeries::from_amounts(amounts)
}
