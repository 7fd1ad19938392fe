//! Tushare Pro API client with request pacing.

use super::payload::{TushareRequest, TushareResponse};
use crate::config::TushareConfig;
use crate::error::{DataError, Result};
use crate::frame;
use crate::source::{Endpoint, MarketDataSource};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Keeps consecutive requests at least `min_interval` apart.
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Tushare Pro client.
///
/// Cheap to share by reference across concurrent calculations; request pacing is the
/// only state and sits behind an async mutex.
pub struct TushareClient {
    client: reqwest::Client,
    config: TushareConfig,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl std::fmt::Debug for TushareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TushareClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TushareClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    /// Returns [`DataError::MissingToken`] for a blank token, or a network error if the
    /// HTTP client cannot be built.
    pub fn new(config: TushareConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(DataError::MissingToken);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_request_interval))),
            config,
        })
    }

    /// The configuration this client was built with.
    pub const fn config(&self) -> &TushareConfig {
        &self.config
    }

    /// Issue one API call and return the result table as a frame.
    pub async fn query(
        &self,
        api_name: &str,
        params: BTreeMap<&str, &str>,
        fields: &[&str],
    ) -> Result<DataFrame> {
        self.rate_limiter.lock().await.wait().await;

        let request = TushareRequest {
            api_name,
            token: &self.config.token,
            params,
            fields: fields.join(","),
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "{} returned HTTP {}",
                api_name,
                response.status()
            )));
        }

        let body: TushareResponse = response.json().await.map_err(DataError::Network)?;
        let df = body.into_payload(api_name)?.into_frame()?;
        debug!(api = api_name, rows = df.height(), "tushare query");
        Ok(df)
    }

    async fn query_security(&self, endpoint: Endpoint, ts_code: &str) -> Result<DataFrame> {
        if ts_code.is_empty() {
            return Err(DataError::InvalidSymbol("Empty ts_code".to_string()));
        }
        let mut params = BTreeMap::new();
        params.insert("ts_code", ts_code);
        let df = self
            .query(endpoint.api_name(), params, endpoint.fields())
            .await?;
        // Tushare answers an unknown code with an empty, field-less table.
        if df.width() == 0 {
            return endpoint.empty_frame();
        }
        Ok(df)
    }
}

impl MarketDataSource for TushareClient {
    async fn basic_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.query_security(Endpoint::Basic, ts_code).await
    }

    async fn quality_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.query_security(Endpoint::Quality, ts_code).await
    }

    async fn growth_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.query_security(Endpoint::Growth, ts_code).await
    }

    async fn daily_prices(&self, ts_code: &str) -> Result<DataFrame> {
        self.query_security(Endpoint::Daily, ts_code).await
    }

    async fn money_flow(&self, ts_code: &str) -> Result<DataFrame> {
        self.query_security(Endpoint::MoneyFlow, ts_code).await
    }

    async fn universe(&self) -> Result<Vec<String>> {
        let mut params = BTreeMap::new();
        params.insert("exchange", "");
        params.insert("list_status", "L");
        let endpoint = Endpoint::Universe;
        let df = self
            .query(endpoint.api_name(), params, endpoint.fields())
            .await?;
        if df.width() == 0 {
            return Ok(Vec::new());
        }
        Ok(frame::str_values(&df, "ts_code")?
            .into_iter()
            .flatten()
            .collect())
    }
}
