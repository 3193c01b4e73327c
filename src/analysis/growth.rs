//! Historical growth estimation: period-over-period percentage changes,
//! their simple average, and a trimmed average that ignores extremes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::models::CashFlowSeries;

/// Growth statistics derived from a historical cash-flow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    /// Arithmetic mean of the period-over-period growth rates.
    pub average: f64,
    /// Mean of the growth rates inside the inclusive [P10, P90] band.
    /// With only a handful of observations this collapses to `average`.
    pub trimmed_mean: f64,
    /// Number of growth observations (series length minus one).
    pub observations: usize,
}

/// Period-over-period percentage changes: `(v[i] - v[i-1]) / v[i-1]`.
///
/// Growth from a zero cash flow is undefined and surfaced as an error
/// rather than silently producing infinity. The same applies across a sign
/// change (negative to positive or back): the percentage there says nothing
/// useful about a turnaround, so the caller must decide how to handle it.
pub fn growth_rates(series: &CashFlowSeries) -> Result<Vec<f64>> {
    if series.len() < 2 {
        return Err(DataError::SeriesTooShort {
            required: 2,
            actual: series.len(),
        }
        .into());
    }

    let amounts = series.amounts();
    let mut rates = Vec::with_capacity(amounts.len() - 1);

    for i in 1..amounts.len() {
        let prev = amounts[i - 1];
        let next = amounts[i];

        if prev == 0.0 {
            return Err(DataError::ZeroBaseValue { period: i }.into());
        }
        if prev * next < 0.0 {
            return Err(DataError::SignChange {
                from: i,
                to: i + 1,
                prev,
                next,
            }
            .into());
        }

        rates.push((next - prev) / prev);
    }

    Ok(rates)
}

/// Estimate a forecast growth rate from historical cash flows.
///
/// Returns both the simple average growth and a trimmed average over the
/// inclusive 10th-90th percentile band (linear-interpolation percentiles).
/// When the interpolated band excludes every observation, which happens
/// with very short histories, the trimmed mean falls back to the full
/// sample.
pub fn estimate_growth(series: &CashFlowSeries) -> Result<GrowthEstimate> {
    let rates = growth_rates(series)?;
    let observations = rates.len();

    let average = rates.iter().sum::<f64>() / observations as f64;

    let mut sorted = rates.clone();
    sorted.sort_by(f64::total_cmp);
    let lower = percentile(&sorted, 0.10);
    let upper = percentile(&sorted, 0.90);

    let trimmed: Vec<f64> = rates
        .iter()
        .copied()
        .filter(|&g| g >= lower && g <= upper)
        .collect();

    let trimmed_mean = if trimmed.is_empty() {
        average
    } else {
        trimmed.iter().sum::<f64>() / trimmed.len() as f64
    };

    debug!(
        observations,
        average, trimmed_mean, "estimated historical growth"
    );

    Ok(GrowthEstimate {
        average,
        trimmed_mean,
        observations,
    })
}

/// Linear-interpolation percentile over an ascending-sorted slice,
/// `p` in [0, 1].
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
