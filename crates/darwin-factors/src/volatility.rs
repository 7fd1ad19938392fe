//! Annualized Historical Volatility
//!
//! Sample standard deviation of simple daily returns over the full price history,
//! scaled by the square root of the number of trading days in a year.

use serde::{Deserialize, Serialize};

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Configuration for the volatility factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolatilityConfig {
    /// Minimum number of price observations (default: 3)
    pub min_observations: usize,
    /// Periods per year for annualization (default: 252)
    pub periods_per_year: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            min_observations: 3,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// Carry the last known close forward over missing (`NaN`) closes.
///
/// Leading gaps have nothing to carry and stay missing.
pub fn forward_filled(closes: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    closes
        .iter()
        .map(|close| {
            if !close.is_nan() {
                last = *close;
            }
            last
        })
        .collect()
}

/// Simple period-over-period returns `p[t] / p[t-1] − 1` over forward-filled closes.
///
/// Undefined returns (a leading gap, or `0 / 0`) are skipped. A move away from a zero
/// close is kept as an infinite return.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    forward_filled(closes)
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .filter(|ret| !ret.is_nan())
        .collect()
}

/// Whether any return is infinite, which leaves return statistics undefined.
pub fn has_infinite_return(returns: &[f64]) -> bool {
    returns.iter().any(|ret| ret.is_infinite())
}

/// Sample standard deviation (n − 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// `stdev(returns) × √periods_per_year`; `None` below `min_observations` closes.
pub fn annualized_volatility(closes: &[f64], config: &VolatilityConfig) -> Option<f64> {
    if closes.len() < config.min_observations {
        return None;
    }
    let returns = simple_returns(closes);
    if has_infinite_return(&returns) {
        return None;
    }
    sample_std(&returns)
        .map(|std| std * config.periods_per_year.sqrt())
        .filter(|vol| vol.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_close_is_forward_filled() {
        let closes = [10.0, f64::NAN, 11.0, 12.1];
        let returns = simple_returns(&closes);
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.0);
        assert_relative_eq!(returns[1], 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns[2], 0.1, epsilon = 1e-12);

        let expected = sample_std(&[0.0, 0.1, 0.1]).unwrap() * 252.0_f64.sqrt();
        let vol = annualized_volatility(&closes, &VolatilityConfig::default()).unwrap();
        assert_relative_eq!(vol, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_leading_gap_has_no_return() {
        let returns = simple_returns(&[f64::NAN, f64::NAN, 10.0, 11.0]);
        assert_eq!(returns.len(), 1);
        assert_relative_eq!(returns[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_close_leaves_volatility_missing() {
        let closes = [10.0, 0.0, 10.0, 11.0];
        assert!(has_infinite_return(&simple_returns(&closes)));
        assert_eq!(
            annualized_volatility(&closes, &VolatilityConfig::default()),
            None
        );
    }

    #[test]
    fn test_zero_to_zero_is_skipped() {
        let returns = simple_returns(&[0.0, 0.0, 5.0]);
        assert_eq!(returns, vec![f64::INFINITY]);
    }

    #[test]
    fn test_alternating_returns() {
        // Returns alternate +10% / -10%: mean 0, sample std known in closed form.
        let mut closes = vec![100.0];
        for i in 0..40 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last * 1.1 } else { last * 0.9 });
        }

        let returns = simple_returns(&closes);
        let n = returns.len() as f64;
        let expected_std = (n * 0.01 / (n - 1.0)).sqrt();
        let vol = annualized_volatility(&closes, &VolatilityConfig::default()).unwrap();
        assert_relative_eq!(vol, expected_std * 252.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_minimum_observations() {
        let config = VolatilityConfig::default();
        assert_eq!(annualized_volatility(&[], &config), None);
        assert_eq!(annualized_volatility(&[10.0], &config), None);
        assert_eq!(annualized_volatility(&[10.0, 11.0], &config), None);
        assert!(annualized_volatility(&[10.0, 11.0, 10.5], &config).is_some());
    }

    #[test]
    fn test_constant_prices() {
        let vol = annualized_volatility(&[5.0; 10], &VolatilityConfig::default()).unwrap();
        assert_eq!(vol, 0.0);
    }
}
