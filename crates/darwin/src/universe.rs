//! Universe management.
//!
//! The universe is the ordered list of security codes a run dispatches. It is normally
//! fetched from the provider's listing endpoint; codes may also be given explicitly.

use darwin_data::{MarketDataSource, Result};
use std::collections::HashSet;

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Listed securities, in provider order with duplicates removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListedUniverse {
    codes: Vec<String>,
}

impl ListedUniverse {
    /// Build from explicit codes. Blank codes and repeats are dropped.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let codes = codes
            .into_iter()
            .map(|code| code.into().trim().to_string())
            .filter(|code| !code.is_empty() && seen.insert(code.clone()))
            .collect();
        Self { codes }
    }

    /// Fetch the listed securities from `source`.
    pub async fn fetch<S: MarketDataSource>(source: &S) -> Result<Self> {
        Ok(Self::from_codes(source.universe().await?))
    }

    /// Keep only the first `n` codes.
    #[must_use]
    pub fn take(mut self, n: usize) -> Self {
        self.codes.truncate(n);
        self
    }

    /// Codes in dispatch order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether there are no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Universe for ListedUniverse {
    fn symbols(&self) -> Vec<String> {
        self.codes.clone()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.codes.iter().any(|code| code == symbol)
    }

    fn size(&self) -> usize {
        self.codes.len()
    }
}
