#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/darwin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame;
pub mod memory;
pub mod source;
pub mod tushare;

pub use config::TushareConfig;
pub use error::{DataError, Result};
pub use memory::MemorySource;
pub use source::{Endpoint, MarketDataSource};
pub use tushare::TushareClient;

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
