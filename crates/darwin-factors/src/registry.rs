//! Factor Registry
//!
//! Metadata for every exported factor column: category, description and the provider
//! fields it is derived from.

use crate::record::FactorColumn;
use std::fmt;
use std::str::FromStr;

/// Available factor categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    /// Value factors (PE, PB)
    Value,
    /// Momentum factors
    Momentum,
    /// Size factors (market value)
    Size,
    /// Volatility factors
    Volatility,
    /// Quality factors (ROE, margins)
    Quality,
    /// Growth factors (revenue and profit growth)
    Growth,
    /// Liquidity factors (turnover, Amihud illiquidity)
    Liquidity,
}

impl FactorCategory {
    /// All categories.
    pub const ALL: [Self; 7] = [
        Self::Size,
        Self::Value,
        Self::Momentum,
        Self::Volatility,
        Self::Liquidity,
        Self::Quality,
        Self::Growth,
    ];

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::Momentum => "Momentum",
            Self::Size => "Size",
            Self::Volatility => "Volatility",
            Self::Quality => "Quality",
            Self::Growth => "Growth",
            Self::Liquidity => "Liquidity",
        }
    }
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FactorCategory {
    type Err = String;

    /// Case-insensitive match on [`FactorCategory::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                format!(
                    "unknown factor category '{}' (expected one of {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Factor metadata
#[derive(Debug, Clone)]
pub struct FactorInfo {
    /// Exported column
    pub column: FactorColumn,
    /// Factor category
    pub category: FactorCategory,
    /// Brief description of what the factor measures
    pub description: &'static str,
    /// Provider fields the factor is derived from
    pub inputs: &'static [&'static str],
}

impl FactorInfo {
    /// Column name.
    pub const fn name(&self) -> &'static str {
        self.column.name()
    }
}

/// Get all available factor info, in export order
pub fn available_factors() -> Vec<FactorInfo> {
    vec![
        FactorInfo {
            column: FactorColumn::LnMv,
            category: FactorCategory::Size,
            description: "Natural log of total market value scaled by 1e6",
            inputs: &["daily_basic.total_mv"],
        },
        FactorInfo {
            column: FactorColumn::Pe,
            category: FactorCategory::Value,
            description: "Price to earnings",
            inputs: &["daily_basic.pe"],
        },
        FactorInfo {
            column: FactorColumn::PeTtm,
            category: FactorCategory::Value,
            description: "Price to trailing-twelve-month earnings",
            inputs: &["daily_basic.pe_ttm"],
        },
        FactorInfo {
            column: FactorColumn::Pb,
            category: FactorCategory::Value,
            description: "Price to book",
            inputs: &["daily_basic.pb"],
        },
        FactorInfo {
            column: FactorColumn::Momentum,
            category: FactorCategory::Momentum,
            description: "12-month return minus the most recent 1-month return",
            inputs: &["daily.close"],
        },
        FactorInfo {
            column: FactorColumn::Volatility,
            category: FactorCategory::Volatility,
            description: "Annualized standard deviation of daily returns",
            inputs: &["daily.close"],
        },
        FactorInfo {
            column: FactorColumn::TurnoverRate,
            category: FactorCategory::Liquidity,
            description: "Latest daily turnover rate",
            inputs: &["daily_basic.turnover_rate"],
        },
        FactorInfo {
            column: FactorColumn::Amihud,
            category: FactorCategory::Liquidity,
            description: "Mean absolute daily return per unit of market value",
            inputs: &["daily.close", "daily_basic.total_mv"],
        },
        FactorInfo {
            column: FactorColumn::Roe,
            category: FactorCategory::Quality,
            description: "Return on equity from the latest report",
            inputs: &["fina_indicator.roe"],
        },
        FactorInfo {
            column: FactorColumn::GrossprofitMargin,
            category: FactorCategory::Quality,
            description: "Gross profit margin from the latest report",
            inputs: &["fina_indicator.grossprofit_margin"],
        },
        FactorInfo {
            column: FactorColumn::RevenueGrowth,
            category: FactorCategory::Growth,
            description: "Operating revenue growth, year over year",
            inputs: &["fina_indicator.or_yoy"],
        },
        FactorInfo {
            column: FactorColumn::ProfitGrowth,
            category: FactorCategory::Growth,
            description: "Net profit growth, year over year",
            inputs: &["fina_indicator.np_yoy"],
        },
    ]
}

/// Get factors by category
pub fn factors_by_category(category: FactorCategory) -> Vec<FactorInfo> {
    available_factors()
        .into_iter()
        .filter(|f| f.category == category)
        .collect()
}

/// Get factor info by column name
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors().into_iter().find(|f| f.name() == name)
}
