//! Concurrent factor pipeline.
//!
//! Dispatches one [`FactorCalculator::compute`] per security with a fixed number in flight,
//! collects successes in arrival order and tallies failures by kind. A failing security is
//! logged and dropped; it never aborts the run.

use crate::error::PipelineError;
use darwin_data::MarketDataSource;
use darwin_factors::{FactorCalculator, FactorRecord, FailureKind, SecurityFailure};
use darwin_output::{FactorTable, FactorTableExporter};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of securities computed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default limit on a single security's computation.
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Computations in flight at once (at least 1)
    pub concurrency: usize,
    /// Per-security time limit; `None` waits indefinitely
    pub invocation_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            invocation_timeout: Some(DEFAULT_INVOCATION_TIMEOUT),
        }
    }
}

impl PipelineConfig {
    /// Set the concurrency ceiling. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set or clear the per-security time limit.
    #[must_use]
    pub const fn with_invocation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.invocation_timeout = timeout;
        self
    }
}

/// Counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Securities dispatched
    pub total: usize,
    /// Securities that produced a record
    pub succeeded: usize,
    /// Dropped securities per failure kind
    pub failures: BTreeMap<FailureKind, usize>,
}

impl RunStats {
    /// Total dropped securities.
    pub fn dropped(&self) -> usize {
        self.failures.values().sum()
    }

    /// Dropped securities of one kind.
    pub fn failed(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    fn record_failure(&mut self, failure: &SecurityFailure) {
        *self.failures.entry(failure.kind).or_insert(0) += 1;
    }
}

/// Records and counts produced by [`run_pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// Successful records, in completion order
    pub records: Vec<FactorRecord>,
    /// Run counts
    pub stats: RunStats,
}

async fn compute_bounded<S: MarketDataSource>(
    calculator: &FactorCalculator<S>,
    ts_code: &str,
    limit: Option<Duration>,
) -> Result<FactorRecord, SecurityFailure> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, calculator.compute(ts_code))
            .await
            .unwrap_or_else(|_| Err(SecurityFailure::timeout(ts_code, limit))),
        None => calculator.compute(ts_code).await,
    }
}

/// Compute a record for every code, at most `config.concurrency` at a time.
///
/// Completion order is not dispatch order. Each code is dispatched exactly once and ends
/// either as a record or as a failure counted in [`RunStats::failures`].
pub async fn run_pipeline<S: MarketDataSource>(
    calculator: &FactorCalculator<S>,
    codes: &[String],
    config: &PipelineConfig,
    progress: Option<&ProgressBar>,
) -> PipelineOutcome {
    let mut outcome = PipelineOutcome {
        records: Vec::with_capacity(codes.len()),
        stats: RunStats {
            total: codes.len(),
            ..RunStats::default()
        },
    };

    let limit = config.invocation_timeout;
    let mut results = stream::iter(codes)
        .map(|code| compute_bounded(calculator, code, limit))
        .buffer_unordered(config.concurrency.max(1));

    while let Some(result) = results.next().await {
        match result {
            Ok(record) => {
                debug!(ts_code = %record.ts_code, "computed factors");
                outcome.stats.succeeded += 1;
                outcome.records.push(record);
            }
            Err(failure) => {
                match progress {
                    Some(pb) => pb.suspend(|| warn!("{}", failure)),
                    None => warn!("{}", failure),
                }
                outcome.stats.record_failure(&failure);
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    info!(
        total = outcome.stats.total,
        succeeded = outcome.stats.succeeded,
        dropped = outcome.stats.dropped(),
        "pipeline finished"
    );
    outcome
}

/// A computed and exported panel.
#[derive(Debug, Clone)]
pub struct PanelRun {
    /// The exported table
    pub table: FactorTable,
    /// Run counts
    pub stats: RunStats,
    /// Files written, full table first
    pub paths: Vec<PathBuf>,
}

/// Run the pipeline over `codes` and export the resulting table.
///
/// # Errors
///
/// Returns [`PipelineError::Export`] if the files cannot be written. Per-security failures
/// are counted in [`PanelRun::stats`] instead.
pub async fn build_panel<S: MarketDataSource>(
    calculator: &FactorCalculator<S>,
    codes: &[String],
    config: &PipelineConfig,
    exporter: &FactorTableExporter,
    progress: Option<&ProgressBar>,
) -> Result<PanelRun, PipelineError> {
    let outcome = run_pipeline(calculator, codes, config, progress).await;
    let table = FactorTable::new(outcome.records);
    let paths = exporter.export(&table)?;
    info!(
        rows = table.len(),
        files = paths.len(),
        dir = %exporter.output_dir().display(),
        "exported factor panel"
    );
    Ok(PanelRun {
        table,
        stats: outcome.stats,
        paths,
    })
}
