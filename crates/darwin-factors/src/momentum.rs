//! Twelve-Month-Ex-One-Month Momentum
//!
//! Trailing one-year price return with the most recent month's return subtracted,
//! removing the short-term reversal effect from the momentum signal.

use serde::{Deserialize, Serialize};

/// Configuration for the momentum factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MomentumConfig {
    /// Observations back from the end for the one-year price (default: 252)
    pub lookback: usize,
    /// Observations back from the end for the one-month price (default: 21)
    pub skip: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            lookback: 252,
            skip: 21,
        }
    }
}

/// `(p_now / p_12m − 1) − (p_now / p_1m − 1)` over closes sorted ascending by date.
///
/// `p_12m` and `p_1m` are the closes `lookback` and `skip` observations back from the
/// end, counting the last close as the first. Fewer than `lookback` closes, or any
/// non-finite intermediate, yields `None`.
pub fn momentum_ex_recent(closes: &[f64], config: &MomentumConfig) -> Option<f64> {
    let n = closes.len();
    if config.lookback == 0 || config.skip == 0 || n < config.lookback.max(config.skip) {
        return None;
    }

    let price_now = closes[n - 1];
    let price_12m = closes[n - config.lookback];
    let price_1m = closes[n - config.skip];

    let momentum = (price_now / price_12m - 1.0) - (price_now / price_1m - 1.0);
    momentum.is_finite().then_some(momentum)
}
