//! Per-security factor calculation.
//!
//! Issues the queries for one security in a fixed order, aligns the snapshots with the
//! daily history and assembles a [`FactorRecord`]. Any field whose inputs are missing or
//! too short is left empty; only an empty valuation snapshot or a failed query drops the
//! security.

use crate::error::SecurityFailure;
use crate::liquidity::amihud_illiquidity;
use crate::momentum::{MomentumConfig, momentum_ex_recent};
use crate::record::FactorRecord;
use crate::size::{log_market_value, scaled_market_value};
use crate::snapshot::{BasicSnapshot, GrowthSnapshot, PriceHistory, QualitySnapshot};
use crate::volatility::{VolatilityConfig, annualized_volatility};
use darwin_data::MarketDataSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the factor calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculatorConfig {
    /// Momentum windows
    pub momentum: MomentumConfig,
    /// Volatility requirements and annualization
    pub volatility: VolatilityConfig,
}

/// Computes one [`FactorRecord`] per security from a [`MarketDataSource`].
#[derive(Debug)]
pub struct FactorCalculator<S> {
    source: S,
    config: CalculatorConfig,
}

impl<S: MarketDataSource> FactorCalculator<S> {
    /// Create a calculator with default windows.
    pub fn new(source: S) -> Self {
        Self::with_config(source, CalculatorConfig::default())
    }

    /// Create a calculator with custom windows.
    pub const fn with_config(source: S, config: CalculatorConfig) -> Self {
        Self { source, config }
    }

    /// The underlying data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The active configuration.
    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Compute the factor record for `ts_code`.
    ///
    /// # Errors
    /// [`crate::FailureKind::MissingBasic`] when the valuation snapshot is empty,
    /// [`crate::FailureKind::Data`] when any query or decoding step fails.
    pub async fn compute(&self, ts_code: &str) -> Result<FactorRecord, SecurityFailure> {
        match self.try_compute(ts_code).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(SecurityFailure::missing_basic(ts_code)),
            Err(err) => Err(SecurityFailure::data(ts_code, &err)),
        }
    }

    async fn try_compute(&self, ts_code: &str) -> darwin_data::Result<Option<FactorRecord>> {
        let basic_df = self.source.basic_snapshot(ts_code).await?;
        let Some(basic) = BasicSnapshot::latest(&basic_df)? else {
            return Ok(None);
        };
        let market_value = scaled_market_value(basic.total_mv);

        let quality = QualitySnapshot::first(&self.source.quality_snapshot(ts_code).await?)?;
        // Same dataset as the quality snapshot, requested separately for the growth fields.
        let growth = GrowthSnapshot::first(&self.source.growth_snapshot(ts_code).await?)?;

        let prices = PriceHistory::from_frame(&self.source.daily_prices(ts_code).await?)?;
        let momentum = momentum_ex_recent(prices.closes(), &self.config.momentum);
        let volatility = annualized_volatility(prices.closes(), &self.config.volatility);

        // Fetched for parity with the provider workflow; not an input to any factor yet.
        let money_flow = self.source.money_flow(ts_code).await?;
        debug!(
            ts_code,
            rows = money_flow.height(),
            "money flow fetched, unused"
        );

        let amihud = if prices.is_empty() {
            None
        } else {
            amihud_illiquidity(prices.closes(), market_value)
        };

        debug!(
            ts_code,
            trade_date = basic.trade_date.as_deref().unwrap_or("-"),
            observations = prices.len(),
            "factors computed"
        );

        Ok(Some(FactorRecord {
            ts_code: ts_code.to_string(),
            ln_mv: log_market_value(basic.total_mv),
            pe: basic.pe,
            pe_ttm: basic.pe_ttm,
            pb: basic.pb,
            momentum_12m_ex1m: momentum,
            volatility,
            turnover_rate: basic.turnover_rate,
            amihud,
            roe: quality.roe,
            grossprofit_margin: quality.grossprofit_margin,
            revenue_growth: growth.revenue_growth,
            profit_growth: growth.profit_growth,
        }))
    }
}
