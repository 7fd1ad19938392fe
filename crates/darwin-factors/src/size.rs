//! Log Market Value Factor
//!
//! Measures company size as the natural logarithm of total market value.
//! The provider's `total_mv` is multiplied by a fixed factor of 1e6 before the log is
//! taken. This is the panel's scaling convention, not a unit conversion: Tushare reports
//! `total_mv` in ten-thousand yuan, so the scaled figure is not a yuan amount.

/// Multiplier applied to the provider's market value before any size computation.
pub const MARKET_VALUE_SCALE: f64 = 1_000_000.0;

/// Market value under the panel scaling convention, if the provider value is usable.
pub fn scaled_market_value(total_mv: Option<f64>) -> Option<f64> {
    total_mv
        .map(|mv| mv * MARKET_VALUE_SCALE)
        .filter(|mv| mv.is_finite())
}

/// `ln(total_mv × 1e6)`.
///
/// Missing, zero and negative market values have no logarithm and yield `None`.
pub fn log_market_value(total_mv: Option<f64>) -> Option<f64> {
    scaled_market_value(total_mv)
        .filter(|mv| *mv > 0.0)
        .map(f64::ln)
}
