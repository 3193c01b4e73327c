//! Closed-form simple linear regression, used to extend a cash-flow
//! series along its historical trend as an alternative to constant-growth
//! compounding.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::models::CashFlowSeries;

/// Ordinary-least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 for a perfectly linear series.
    pub r_squared: f64,
}

impl TrendFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a straight line through (x, y) pairs with the closed-form OLS
/// estimator. Needs at least two points and nonzero variance in x.
pub fn fit_linear_trend(x: &[f64], y: &[f64]) -> Result<TrendFit> {
    if x.len() != y.len() {
        return Err(DataError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        }
        .into());
    }
    if x.len() < 2 {
        return Err(DataError::SeriesTooShort {
            required: 2,
            actual: x.len(),
        }
        .into());
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return Err(DataError::DegenerateTrend.into());
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_total: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, v)| (v - (slope * a + intercept)).powi(2))
        .sum();

    // A flat series is fit exactly by slope 0 / intercept mean_y.
    let r_squared = if ss_total == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_total
    };

    Ok(TrendFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fit a linear trend to a historical series (x = period index) and
/// project it `horizon_periods` past the last observation. The returned
/// forecast series is renumbered from period 1.
pub fn project_linear_trend(
    series: &CashFlowSeries,
    horizon_periods: usize,
) -> Result<CashFlowSeries> {
    if horizon_periods == 0 {
        return Err(DataError::EmptyHorizon.into());
    }

    let x: Vec<f64> = series.iter().map(|(t, _)| t as f64).collect();
    let y: Vec<f64> = series.amounts().to_vec();
    let fit = fit_linear_trend(&x, &y)?;

    let last_period = series.len() as f64;
    let amounts: Vec<f64> = (1..=horizon_periods)
        .map(|i| fit.predict(last_period + i as f64))
        .collect();

    CashFlowSeries::from_amounts(amounts)
}
