#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/darwin/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calculator;
pub mod error;
pub mod liquidity;
pub mod momentum;
pub mod record;
pub mod registry;
pub mod size;
pub mod snapshot;
pub mod volatility;

pub use calculator::{CalculatorConfig, FactorCalculator};
pub use error::{FailureKind, SecurityFailure};
pub use record::{FactorColumn, FactorRecord};

// Re-export registry types for convenience
pub use registry::{
    FactorCategory, FactorInfo, available_factors, factors_by_category, get_factor_info,
};
