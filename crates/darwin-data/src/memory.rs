//! Deterministic in-memory data source.
//!
//! Serves frames registered per security and endpoint. Endpoints with nothing registered
//! answer with an empty frame of the right schema, matching how the provider reports
//! missing data. Failures can be injected per endpoint to exercise error paths.

use crate::error::{DataError, Result};
use crate::source::{Endpoint, MarketDataSource};
use polars::prelude::*;
use std::collections::HashMap;

/// In-memory [`MarketDataSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    universe: Vec<String>,
    frames: HashMap<(String, Endpoint), DataFrame>,
    failures: HashMap<(String, Endpoint), String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame for one security and endpoint.
    ///
    /// The security is appended to the universe the first time it is seen.
    pub fn insert(&mut self, ts_code: &str, endpoint: Endpoint, frame: DataFrame) {
        self.register(ts_code);
        self.frames.insert((ts_code.to_string(), endpoint), frame);
    }

    /// Builder form of [`Self::insert`].
    pub fn with_frame(mut self, ts_code: &str, endpoint: Endpoint, frame: DataFrame) -> Self {
        self.insert(ts_code, endpoint, frame);
        self
    }

    /// Make every query of `endpoint` for `ts_code` fail with `reason`.
    pub fn with_failure(mut self, ts_code: &str, endpoint: Endpoint, reason: &str) -> Self {
        self.register(ts_code);
        self.failures
            .insert((ts_code.to_string(), endpoint), reason.to_string());
        self
    }

    /// Add a security to the universe without any data.
    pub fn with_security(mut self, ts_code: &str) -> Self {
        self.register(ts_code);
        self
    }

    fn register(&mut self, ts_code: &str) {
        if !self.universe.iter().any(|code| code == ts_code) {
            self.universe.push(ts_code.to_string());
        }
    }

    fn lookup(&self, ts_code: &str, endpoint: Endpoint) -> Result<DataFrame> {
        let key = (ts_code.to_string(), endpoint);
        if let Some(reason) = self.failures.get(&key) {
            return Err(DataError::Injected {
                endpoint: endpoint.to_string(),
                symbol: ts_code.to_string(),
                reason: reason.clone(),
            });
        }
        self.frames
            .get(&key)
            .cloned()
            .map_or_else(|| endpoint.empty_frame(), Ok)
    }
}

impl MarketDataSource for MemorySource {
    async fn basic_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.lookup(ts_code, Endpoint::Basic)
    }

    async fn quality_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.lookup(ts_code, Endpoint::Quality)
    }

    async fn growth_snapshot(&self, ts_code: &str) -> Result<DataFrame> {
        self.lookup(ts_code, Endpoint::Growth)
    }

    async fn daily_prices(&self, ts_code: &str) -> Result<DataFrame> {
        self.lookup(ts_code, Endpoint::Daily)
    }

    async fn money_flow(&self, ts_code: &str) -> Result<DataFrame> {
        self.lookup(ts_code, Endpoint::MoneyFlow)
    }

    async fn universe(&self) -> Result<Vec<String>> {
        Ok(self.universe.clone())
    }
}
