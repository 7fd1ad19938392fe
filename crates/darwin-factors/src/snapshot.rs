//! Point-in-time views over provider frames.
//!
//! The valuation snapshot is strict: its columns must be present and the latest row is
//! chosen by trade date. Quality and growth snapshots take the provider's first row and
//! treat absent columns as missing values.

use darwin_data::frame;
use darwin_data::Result;
use polars::prelude::*;

/// Latest valuation and size indicators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicSnapshot {
    /// Trade date of the selected row (`YYYYMMDD`)
    pub trade_date: Option<String>,
    /// Total market value, provider units
    pub total_mv: Option<f64>,
    /// Price to earnings
    pub pe: Option<f64>,
    /// Price to trailing-twelve-month earnings
    pub pe_ttm: Option<f64>,
    /// Price to book
    pub pb: Option<f64>,
    /// Turnover rate
    pub turnover_rate: Option<f64>,
}

impl BasicSnapshot {
    /// The row with the greatest `trade_date`, or `None` for an empty frame.
    pub fn latest(df: &DataFrame) -> Result<Option<Self>> {
        if df.height() == 0 {
            return Ok(None);
        }
        let sorted = frame::sort_by(df, "trade_date", true)?;
        Ok(Some(Self {
            trade_date: frame::str_values(&sorted, "trade_date")?
                .into_iter()
                .next()
                .flatten(),
            total_mv: frame::f64_at(&sorted, "total_mv", 0)?,
            pe: frame::f64_at(&sorted, "pe", 0)?,
            pe_ttm: frame::f64_at(&sorted, "pe_ttm", 0)?,
            pb: frame::f64_at(&sorted, "pb", 0)?,
            turnover_rate: frame::f64_at(&sorted, "turnover_rate", 0)?,
        }))
    }
}

fn lenient_first(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    if df.height() == 0 || df.column(name).is_err() {
        return Ok(None);
    }
    frame::f64_at(df, name, 0)
}

/// Profitability indicators from the most recent report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualitySnapshot {
    /// Return on equity
    pub roe: Option<f64>,
    /// Gross profit margin
    pub grossprofit_margin: Option<f64>,
}

impl QualitySnapshot {
    /// First provider row, or all-missing when the frame is empty.
    pub fn first(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            roe: lenient_first(df, "roe")?,
            grossprofit_margin: lenient_first(df, "grossprofit_margin")?,
        })
    }
}

/// Growth indicators from the most recent report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthSnapshot {
    /// Operating revenue growth, year over year
    pub revenue_growth: Option<f64>,
    /// Net profit growth, year over year
    pub profit_growth: Option<f64>,
}

impl GrowthSnapshot {
    /// First provider row, or all-missing when the frame is empty.
    pub fn first(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            revenue_growth: lenient_first(df, "or_yoy")?,
            profit_growth: lenient_first(df, "np_yoy")?,
        })
    }
}

/// Daily closes in ascending date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    closes: Vec<f64>,
}

impl PriceHistory {
    /// Sort a `trade_date, close` frame ascending. Null closes become `NaN`.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        if df.height() == 0 {
            return Ok(Self::default());
        }
        let sorted = frame::sort_by(df, "trade_date", false)?;
        let closes = frame::f64_values(&sorted, "close")?
            .into_iter()
            .map(|close| close.unwrap_or(f64::NAN))
            .collect();
        Ok(Self { closes })
    }

    /// Closes, oldest first.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Whether the history has no observations.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_basic_by_trade_date() {
        let df = df!(
            "trade_date" => ["20240103", "20240105", "20240104"],
            "ts_code" => ["600000.SH", "600000.SH", "600000.SH"],
            "total_mv" => [1.0, 3.0, 2.0],
            "pe" => [Some(4.0), None, Some(4.2)],
            "pe_ttm" => [4.1, 4.3, 4.2],
            "pb" => [0.3, 0.5, 0.4],
            "turnover_rate" => [0.1, 0.3, 0.2],
        )
        .unwrap();

        let latest = BasicSnapshot::latest(&df).unwrap().unwrap();
        assert_eq!(latest.trade_date.as_deref(), Some("20240105"));
        assert_eq!(latest.total_mv, Some(3.0));
        assert_eq!(latest.pe, None);
        assert_eq!(latest.pb, Some(0.5));
    }

    #[test]
    fn test_empty_basic() {
        let df = darwin_data::Endpoint::Basic.empty_frame().unwrap();
        assert_eq!(BasicSnapshot::latest(&df).unwrap(), None);
    }

    #[test]
    fn test_basic_requires_columns() {
        let df = df!("trade_date" => ["20240105"]).unwrap();
        assert!(BasicSnapshot::latest(&df).is_err());
    }

    #[test]
    fn test_quality_takes_first_row() {
        let df = df!(
            "ts_code" => ["600000.SH", "600000.SH"],
            "roe" => [9.5, 7.0],
            "grossprofit_margin" => [None, Some(30.0)],
        )
        .unwrap();
        let quality = QualitySnapshot::first(&df).unwrap();
        assert_eq!(quality.roe, Some(9.5));
        assert_eq!(quality.grossprofit_margin, None);
    }

    #[test]
    fn test_growth_placeholder_when_empty() {
        let df = darwin_data::Endpoint::Growth.empty_frame().unwrap();
        assert_eq!(GrowthSnapshot::first(&df).unwrap(), GrowthSnapshot::default());
    }

    #[test]
    fn test_price_history_sorted_ascending() {
        let df = df!(
            "trade_date" => ["20240105", "20240103", "20240104"],
            "close" => [Some(12.0), Some(10.0), None],
        )
        .unwrap();
        let history = PriceHistory::from_frame(&df).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.closes()[0], 10.0);
        assert!(history.closes()[1].is_nan());
        assert_eq!(history.closes()[2], 12.0);
    }
}
