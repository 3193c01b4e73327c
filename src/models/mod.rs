use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Ordered free-cash-flow series. Periods are consecutive integers starting
/// at 1; amounts are in whatever currency unit the caller works in
/// (typically millions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    amounts: Vec<f64>,
}

// Deserialization goes through `from_amounts` so an empty JSON array is
// rejected instead of smuggling in an empty series.
impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = crate::error::Error;

    fn try_from(amounts: Vec<f64>) -> Result<Self> {
        Self::from_amounts(amounts)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.amounts
    }
}

impl CashFlowSeries {
    /// Build a series from amounts for periods 1..=n. The series must hold
    /// at least one period.
    pub fn from_amounts(amounts: Vec<f64>) -> Result<Self> {
        if amounts.is_empty() {
            return Err(DataError::SeriesTooShort {
                required: 1,
                actual: 0,
            }
            .into());
        }
        Ok(Self { amounts })
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Cash flow of the final explicit-forecast period.
    pub fn last(&self) -> f64 {
        *self.amounts.last().expect("series is never empty")
    }

    /// Iterate as (period, amount) pairs, periods numbered from 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| (i + 1, amount))
    }
}

/// Discounting and capital-structure assumptions for a valuation run.
/// Immutable once built; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// WACC or cost of equity, as a decimal (0.10 = 10%).
    pub discount_rate: f64,
    /// Long-run perpetuity growth rate. May be zero or negative, but must
    /// stay below `discount_rate`.
    pub terminal_growth_rate: f64,
    /// Annual growth applied when projecting from a single base cash flow.
    /// Unused when the caller supplies an explicit forecast series.
    pub growth_rate: f64,
    /// Total debt minus cash, same unit as the series. Negative means net cash.
    pub net_debt: f64,
    /// Shares outstanding, in units (not currency).
    pub share_count: f64,
    /// Multiplier applied to equity value before the per-share division,
    /// e.g. 1_000_000.0 when the series is in millions but the share count
    /// is in units. Defaults to 1.0 (no conversion).
    #[serde(default = "default_unit_multiplier")]
    pub unit_multiplier: f64,
}

fn default_unit_multiplier() -> f64 {
    1.0
}

/// Full output of a DCF run. All fields are derived; the struct is plain
/// data for the caller to format, serialize, or plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// The explicit-forecast series that was discounted.
    pub projected: CashFlowSeries,
    /// Present value of each explicit-forecast period, same order.
    pub present_values: Vec<f64>,
    /// Sum of the explicit-period present values.
    pub pv_of_cash_flows: f64,
    /// Gordon-growth terminal value, stated at the forecast horizon.
    pub terminal_value: f64,
    pub pv_of_terminal_value: f64,
    pub enterprise_value: f64,
    /// Enterprise value less net debt.
    pub equity_value: f64,
    /// Equity value (after the unit multiplier) divided by share count.
    pub fair_value_per_share: f64,
}
