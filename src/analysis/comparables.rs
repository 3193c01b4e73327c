//! Comparable-multiple valuation (forward P/E and EV/EBITDA) and the
//! weighted blend used to combine it with a DCF result.

use tracing::debug;

use crate::error::{ConfigError, DataError, Result};

/// Tolerance for the weights-sum-to-one check in [`combine_valuations`].
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Equity value implied by the peer-average forward P/E multiple applied
/// to forward earnings. Earnings and the returned value share a unit.
pub fn equity_value_from_pe(peer_pe_multiples: &[f64], forward_earnings: f64) -> Result<f64> {
    let avg = average_multiple(peer_pe_multiples)?;
    Ok(avg * forward_earnings)
}

/// Equity value implied by the peer-average EV/EBITDA multiple: the
/// multiple prices the enterprise, so net debt comes off afterwards.
pub fn equity_value_from_ev_ebitda(
    peer_ev_ebitda_multiples: &[f64],
    forward_ebitda: f64,
    net_debt: f64,
) -> Result<f64> {
    let avg = average_multiple(peer_ev_ebitda_multiples)?;
    Ok(avg * forward_ebitda - net_debt)
}

/// Blend several equity values (e.g. DCF, P/E, EV/EBITDA) with explicit
/// weights.
///
/// Weights must be non-negative and sum to 1 within
/// [`WEIGHT_SUM_TOLERANCE`]. A weight vector that does not sum to one is
/// rejected outright instead of being renormalized; renormalizing would
/// mask an operator mistake.
pub fn combine_valuations(values: &[f64], weights: &[f64]) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(ConfigError::WeightCountMismatch {
            values: values.len(),
            weights: weights.len(),
        }
        .into());
    }

    for (index, &weight) in weights.iter().enumerate() {
        if weight < 0.0 {
            return Err(ConfigError::NegativeWeight { index, weight }.into());
        }
    }

    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightsDoNotSumToOne {
            sum,
            tolerance: WEIGHT_SUM_TOLERANCE,
        }
        .into());
    }

    let blended = values
        .iter()
        .zip(weights.iter())
        .map(|(v, w)| v * w)
        .sum::<f64>();

    debug!(?values, ?weights, blended, "combined valuations");

    Ok(blended)
}

fn average_multiple(multiples: &[f64]) -> Result<f64> {
    if multiples.is_empty() {
        return Err(DataError::EmptyPeerSet.into());
    }
    Ok(multiples.iter().sum::<f64>() / multiples.len() as f64)
}
