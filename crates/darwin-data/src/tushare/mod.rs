//! Tushare Pro data provider.

pub mod client;
pub mod payload;

pub use client::TushareClient;
pub use payload::{TusharePayload, TushareRequest, TushareResponse};
