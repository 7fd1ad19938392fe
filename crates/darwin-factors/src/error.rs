//! Per-security failure reporting.

use darwin_data::DataError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a security produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// The valuation snapshot came back empty
    MissingBasic,
    /// A query or its decoding failed
    Data,
    /// The calculation exceeded its time budget
    Timeout,
}

impl FailureKind {
    /// All kinds, in reporting order.
    pub const ALL: [Self; 3] = [Self::MissingBasic, Self::Data, Self::Timeout];

    /// Short label used in logs and summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MissingBasic => "missing_basic",
            Self::Data => "data_error",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A security that was dropped from the panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{ts_code} dropped ({kind}): {reason}")]
pub struct SecurityFailure {
    /// Security code
    pub ts_code: String,
    /// Failure category
    pub kind: FailureKind,
    /// Human-readable cause
    pub reason: String,
}

impl SecurityFailure {
    /// The valuation snapshot was empty.
    pub fn missing_basic(ts_code: &str) -> Self {
        Self {
            ts_code: ts_code.to_string(),
            kind: FailureKind::MissingBasic,
            reason: "empty daily_basic snapshot".to_string(),
        }
    }

    /// A data query failed.
    pub fn data(ts_code: &str, err: &DataError) -> Self {
        Self {
            ts_code: ts_code.to_string(),
            kind: FailureKind::Data,
            reason: err.to_string(),
        }
    }

    /// The calculation did not finish within `limit`.
    pub fn timeout(ts_code: &str, limit: Duration) -> Self {
        Self {
            ts_code: ts_code.to_string(),
            kind: FailureKind::Timeout,
            reason: format!("no result after {:?}", limit),
        }
    }
}
