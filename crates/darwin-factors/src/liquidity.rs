//! Amihud-Style Illiquidity
//!
//! Average absolute daily return per unit of market value. Larger values mean a given
//! amount of capital moves the price further, i.e. the security is less liquid.
//!
//! The classic Amihud measure divides by traded value; this variant divides by total
//! market value, so the provider's money-flow volumes are not an input.

use crate::volatility::{has_infinite_return, simple_returns};

/// Mean of `|r_t| / market_value` over all daily returns.
///
/// `market_value` is the scaled market value (see [`crate::size::scaled_market_value`]).
/// An empty price history, a history with no usable return, an infinite return (a move
/// away from a zero close), or a missing or zero market value yields `None`.
pub fn amihud_illiquidity(closes: &[f64], market_value: Option<f64>) -> Option<f64> {
    let market_value = market_value?;
    let returns = simple_returns(closes);
    if returns.is_empty() || has_infinite_return(&returns) {
        return None;
    }
    let total: f64 = returns.iter().map(|ret| ret.abs() / market_value).sum();
    let mean = total / returns.len() as f64;
    mean.is_finite().then_some(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_amihud() {
        let closes = [100.0, 102.0, 99.96];
        let value = amihud_illiquidity(&closes, Some(1e12)).unwrap();
        let expected = (0.02 + 0.02) / 2.0 / 1e12;
        assert_relative_eq!(value, expected, epsilon = 1e-20);
    }

    #[test]
    fn test_requires_returns() {
        assert_eq!(amihud_illiquidity(&[], Some(1e12)), None);
        assert_eq!(amihud_illiquidity(&[10.0], Some(1e12)), None);
    }

    #[test]
    fn test_zero_close_leaves_amihud_missing() {
        assert_eq!(amihud_illiquidity(&[10.0, 0.0, 10.0], Some(1e12)), None);
    }

    #[test]
    fn test_missing_close_is_forward_filled() {
        let value = amihud_illiquidity(&[10.0, f64::NAN, 11.0], Some(1e12)).unwrap();
        assert_relative_eq!(value, (0.0 + 0.1) / 2.0 / 1e12, epsilon = 1e-20);
    }

    #[test]
    fn test_requires_market_value() {
        assert_eq!(amihud_illiquidity(&[10.0, 11.0], None), None);
        assert_eq!(amihud_illiquidity(&[10.0, 11.0], Some(0.0)), None);
    }
}
