//! The queries a per-security factor calculation issues.

use crate::error::Result;
use polars::prelude::*;
use std::fmt;
use std::future::Future;

/// Provider datasets used by the factor calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Daily valuation and size indicators (`daily_basic`)
    Basic,
    /// Profitability indicators (`fina_indicator`)
    Quality,
    /// Growth indicators (`fina_indicator`)
    Growth,
    /// Daily bars (`daily`)
    Daily,
    /// Money flow by order size (`moneyflow`)
    MoneyFlow,
    /// Listed securities (`stock_basic`)
    Universe,
}

impl Endpoint {
    /// Tushare API name.
    pub const fn api_name(&self) -> &'static str {
        match self {
            Self::Basic => "daily_basic",
            Self::Quality | Self::Growth => "fina_indicator",
            Self::Daily => "daily",
            Self::MoneyFlow => "moneyflow",
            Self::Universe => "stock_basic",
        }
    }

    /// Fields requested from the provider.
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &[
                "trade_date",
                "ts_code",
                "total_mv",
                "pe",
                "pe_ttm",
                "pb",
                "turnover_rate",
            ],
            Self::Quality => &[
                "ts_code",
                "roe",
                "profit_gr",
                "op_of_gr",
                "grossprofit_margin",
            ],
            Self::Growth => &["ts_code", "or_yoy", "np_yoy"],
            Self::Daily => &["trade_date", "close"],
            Self::MoneyFlow => &[
                "buy_sm_vol",
                "sell_sm_vol",
                "buy_md_vol",
                "sell_md_vol",
                "buy_lg_vol",
                "sell_lg_vol",
                "buy_elg_vol",
                "sell_elg_vol",
            ],
            Self::Universe => &["ts_code", "symbol", "name", "area", "industry", "list_date"],
        }
    }

    /// Whether a field of this endpoint carries text rather than numbers.
    pub fn is_text_field(field: &str) -> bool {
        matches!(
            field,
            "ts_code"
                | "trade_date"
                | "symbol"
                | "name"
                | "area"
                | "industry"
                | "list_date"
                | "ann_date"
                | "end_date"
        )
    }

    /// A frame with this endpoint's columns and no rows.
    pub fn empty_frame(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .fields()
            .iter()
            .map(|field| {
                if Self::is_text_field(field) {
                    Series::new((*field).into(), Vec::<Option<String>>::new()).into()
                } else {
                    Series::new((*field).into(), Vec::<Option<f64>>::new()).into()
                }
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Basic => "basic",
            Self::Quality => "quality",
            Self::Growth => "growth",
            Self::Daily => "daily",
            Self::MoneyFlow => "money_flow",
            Self::Universe => "universe",
        };
        f.write_str(label)
    }
}

/// A provider of the series a factor calculation needs.
///
/// Every per-security query returns the provider's rows as a [`DataFrame`] whose columns
/// are [`Endpoint::fields`]. An empty frame means the provider had no data; it is not an
/// error.
pub trait MarketDataSource: Send + Sync {
    /// Valuation and size rows: `trade_date, ts_code, total_mv, pe, pe_ttm, pb, turnover_rate`.
    fn basic_snapshot(&self, ts_code: &str) -> impl Future<Output = Result<DataFrame>> + Send;

    /// Profitability rows: `ts_code, roe, profit_gr, op_of_gr, grossprofit_margin`.
    fn quality_snapshot(&self, ts_code: &str) -> impl Future<Output = Result<DataFrame>> + Send;

    /// Growth rows: `ts_code, or_yoy, np_yoy`.
    fn growth_snapshot(&self, ts_code: &str) -> impl Future<Output = Result<DataFrame>> + Send;

    /// Full daily close history: `trade_date, close`.
    fn daily_prices(&self, ts_code: &str) -> impl Future<Output = Result<DataFrame>> + Send;

    /// Buy and sell volumes by order size bucket.
    fn money_flow(&self, ts_code: &str) -> impl Future<Output = Result<DataFrame>> + Send;

    /// Codes of all listed securities, in provider order.
    fn universe(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}
