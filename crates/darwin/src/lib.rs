#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/darwin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pipeline;
pub mod universe;

// Re-export main types from sub-crates
pub use darwin_data as data;
pub use darwin_factors as factors;
pub use darwin_output as output;

pub use error::PipelineError;
pub use pipeline::{PanelRun, PipelineConfig, PipelineOutcome, RunStats, build_panel, run_pipeline};
pub use universe::{ListedUniverse, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
