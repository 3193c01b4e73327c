//! Discounted-cash-flow core: constant-growth projection, discounting,
//! Gordon-growth terminal value, and the full valuation pipeline.

use tracing::debug;

use crate::error::{ConfigError, DataError, Result, ValuationError};
use crate::models::{CashFlowSeries, ValuationAssumptions, ValuationResult};

/// Project a cash-flow series from a single base value at a constant growth
/// rate.
///
/// Period t (1-indexed) is computed with the closed form
/// `base_value * (1 + growth_rate)^t` rather than by iterative
/// multiplication, so high-horizon projections match the formula exactly
/// instead of accumulating per-step rounding.
///
/// A negative `base_value` is allowed and propagates through every period
/// (a currently cash-flow-negative entity). A growth rate at or below
/// -100% is rejected.
pub fn project_constant_growth(
    base_value: f64,
    growth_rate: f64,
    horizon_periods: usize,
) -> Result<CashFlowSeries> {
    if horizon_periods == 0 {
        return Err(DataError::EmptyHorizon.into());
    }
    if growth_rate <= -1.0 {
        return Err(ConfigError::RateBelowNegativeOne {
            field: "growth_rate",
            value: growth_rate,
        }
        .into());
    }

    let amounts: Vec<f64> = (1..=horizon_periods)
        .map(|t| base_value * (1.0 + growth_rate).powi(t as i32))
        .collect();

    CashFlowSeries::from_amounts(amounts)
}

/// Discount each period of a series back to present value at `discount_rate`.
///
/// Output is aligned with the input: element i is the PV of period i + 1.
pub fn discount_series(series: &CashFlowSeries, discount_rate: f64) -> Result<Vec<f64>> {
    if discount_rate <= -1.0 {
        return Err(ConfigError::RateBelowNegativeOne {
            field: "discount_rate",
            value: discount_rate,
        }
        .into());
    }

    Ok(series
        .iter()
        .map(|(t, amount)| amount / (1.0 + discount_rate).powi(t as i32))
        .collect())
}

/// Gordon-growth terminal value at the forecast horizon, plus its present
/// value.
///
/// Rejects `discount_rate <= terminal_growth_rate`: the perpetuity
/// denominator is zero or negative there, and the formula would silently
/// emit an infinite or negative "terminal value".
pub fn terminal_value(
    last_period_cash_flow: f64,
    terminal_growth_rate: f64,
    discount_rate: f64,
    horizon_periods: usize,
) -> Result<(f64, f64)> {
    if discount_rate <= -1.0 {
        return Err(ConfigError::RateBelowNegativeOne {
            field: "discount_rate",
            value: discount_rate,
        }
        .into());
    }
    if discount_rate <= terminal_growth_rate {
        return Err(ValuationError::TerminalGrowthExceedsDiscount {
            discount_rate,
            terminal_growth_rate,
        }
        .into());
    }

    let tv = last_period_cash_flow * (1.0 + terminal_growth_rate)
        / (discount_rate - terminal_growth_rate);
    let pv_tv = tv / (1.0 + discount_rate).powi(horizon_periods as i32);

    Ok((tv, pv_tv))
}

/// Run the full DCF pipeline over an explicit forecast series.
///
/// Discounts the series, attaches a terminal value off the last period,
/// sums to enterprise value, subtracts net debt, and divides by the share
/// count. Per-share output is scaled by `assumptions.unit_multiplier`
/// first, so a series in millions can be priced against a share count in
/// units.
pub fn valuate(series: &CashFlowSeries, assumptions: &ValuationAssumptions) -> Result<ValuationResult> {
    if assumptions.share_count <= 0.0 {
        return Err(ConfigError::NonPositiveShareCount {
            share_count: assumptions.share_count,
        }
        .into());
    }

    let present_values = discount_series(series, assumptions.discount_rate)?;
    let pv_of_cash_flows: f64 = present_values.iter().sum();

    let (tv, pv_tv) = terminal_value(
        series.last(),
        assumptions.terminal_growth_rate,
        assumptions.discount_rate,
        series.len(),
    )?;

    let enterprise_value = pv_of_cash_flows + pv_tv;
    let equity_value = enterprise_value - assumptions.net_debt;
    let fair_value_per_share =
        equity_value * assumptions.unit_multiplier / assumptions.share_count;

    debug!(
        pv_of_cash_flows,
        terminal_value = tv,
        pv_of_terminal_value = pv_tv,
        enterprise_value,
        equity_value,
        "dcf valuation complete"
    );

    Ok(ValuationResult {
        projected: series.clone(),
        present_values,
        pv_of_cash_flows,
        terminal_value: tv,
        pv_of_terminal_value: pv_tv,
        enterprise_value,
        equity_value,
        fair_value_per_share,
    })
}
