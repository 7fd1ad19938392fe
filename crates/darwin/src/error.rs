//! Errors that abort a whole run.
//!
//! Per-security problems never surface here; they are counted in
//! [`crate::RunStats`] and the security is dropped.

use darwin_data::DataError;
use darwin_output::ExportError;
use thiserror::Error;

/// Error type for run-level operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The universe could not be fetched.
    #[error("Universe fetch error: {0}")]
    Universe(#[from] DataError),

    /// The panel could not be written.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
