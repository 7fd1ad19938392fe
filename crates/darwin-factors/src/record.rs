//! The per-security factor row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the factor panel.
///
/// Field order is the exported column order. `None` marks a value that could not be
/// observed or computed and is written as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// Security code
    pub ts_code: String,
    /// Log of total market value in base currency units
    pub ln_mv: Option<f64>,
    /// Price to earnings
    pub pe: Option<f64>,
    /// Price to trailing-twelve-month earnings
    pub pe_ttm: Option<f64>,
    /// Price to book
    pub pb: Option<f64>,
    /// Twelve-month return excluding the most recent month
    pub momentum_12m_ex1m: Option<f64>,
    /// Annualized volatility of daily returns
    pub volatility: Option<f64>,
    /// Daily turnover rate
    pub turnover_rate: Option<f64>,
    /// Amihud-style illiquidity
    pub amihud: Option<f64>,
    /// Return on equity
    pub roe: Option<f64>,
    /// Gross profit margin
    pub grossprofit_margin: Option<f64>,
    /// Revenue growth, year over year
    pub revenue_growth: Option<f64>,
    /// Net profit growth, year over year
    pub profit_growth: Option<f64>,
}

impl FactorRecord {
    /// A record for `ts_code` with every factor missing.
    pub fn empty(ts_code: impl Into<String>) -> Self {
        Self {
            ts_code: ts_code.into(),
            ln_mv: None,
            pe: None,
            pe_ttm: None,
            pb: None,
            momentum_12m_ex1m: None,
            volatility: None,
            turnover_rate: None,
            amihud: None,
            roe: None,
            grossprofit_margin: None,
            revenue_growth: None,
            profit_growth: None,
        }
    }

    /// Value of one factor column.
    pub const fn value(&self, column: FactorColumn) -> Option<f64> {
        match column {
            FactorColumn::LnMv => self.ln_mv,
            FactorColumn::Pe => self.pe,
            FactorColumn::PeTtm => self.pe_ttm,
            FactorColumn::Pb => self.pb,
            FactorColumn::Momentum => self.momentum_12m_ex1m,
            FactorColumn::Volatility => self.volatility,
            FactorColumn::TurnoverRate => self.turnover_rate,
            FactorColumn::Amihud => self.amihud,
            FactorColumn::Roe => self.roe,
            FactorColumn::GrossprofitMargin => self.grossprofit_margin,
            FactorColumn::RevenueGrowth => self.revenue_growth,
            FactorColumn::ProfitGrowth => self.profit_growth,
        }
    }

    /// Whether every factor holds a finite value.
    pub fn is_complete(&self) -> bool {
        FactorColumn::ALL
            .iter()
            .all(|column| self.value(*column).is_some_and(f64::is_finite))
    }

    /// Number of factors with a value.
    pub fn coverage(&self) -> usize {
        FactorColumn::ALL
            .iter()
            .filter(|column| self.value(**column).is_some())
            .count()
    }
}

/// Factor columns of [`FactorRecord`], identifier excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactorColumn {
    /// `ln_mv`
    LnMv,
    /// `pe`
    Pe,
    /// `pe_ttm`
    PeTtm,
    /// `pb`
    Pb,
    /// `momentum_12m_ex1m`
    Momentum,
    /// `volatility`
    Volatility,
    /// `turnover_rate`
    TurnoverRate,
    /// `amihud`
    Amihud,
    /// `roe`
    Roe,
    /// `grossprofit_margin`
    GrossprofitMargin,
    /// `revenue_growth`
    RevenueGrowth,
    /// `profit_growth`
    ProfitGrowth,
}

impl FactorColumn {
    /// Identifier column name.
    pub const ID: &'static str = "ts_code";

    /// All factor columns in export order.
    pub const ALL: [Self; 12] = [
        Self::LnMv,
        Self::Pe,
        Self::PeTtm,
        Self::Pb,
        Self::Momentum,
        Self::Volatility,
        Self::TurnoverRate,
        Self::Amihud,
        Self::Roe,
        Self::GrossprofitMargin,
        Self::RevenueGrowth,
        Self::ProfitGrowth,
    ];

    /// Column name, identical to the serialized field name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LnMv => "ln_mv",
            Self::Pe => "pe",
            Self::PeTtm => "pe_ttm",
            Self::Pb => "pb",
            Self::Momentum => "momentum_12m_ex1m",
            Self::Volatility => "volatility",
            Self::TurnoverRate => "turnover_rate",
            Self::Amihud => "amihud",
            Self::Roe => "roe",
            Self::GrossprofitMargin => "grossprofit_margin",
            Self::RevenueGrowth => "revenue_growth",
            Self::ProfitGrowth => "profit_growth",
        }
    }

    /// Look a column up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }
}

impl fmt::Display for FactorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> FactorRecord {
        FactorRecord {
            ts_code: "600000.SH".to_string(),
            ln_mv: Some(25.0),
            pe: Some(5.0),
            pe_ttm: Some(5.1),
            pb: Some(0.4),
            momentum_12m_ex1m: Some(0.1),
            volatility: Some(0.2),
            turnover_rate: Some(0.3),
            amihud: Some(1e-12),
            roe: Some(8.0),
            grossprofit_margin: Some(30.0),
            revenue_growth: Some(-2.0),
            profit_growth: Some(4.0),
        }
    }

    #[test]
    fn test_empty_record() {
        let record = FactorRecord::empty("000001.SZ");
        assert_eq!(record.coverage(), 0);
        assert!(!record.is_complete());
    }

    #[test]
    fn test_complete_record() {
        let record = full_record();
        assert!(record.is_complete());
        assert_eq!(record.coverage(), 12);
        assert_eq!(record.value(FactorColumn::Pb), Some(0.4));
    }

    #[test]
    fn test_non_finite_is_incomplete() {
        let mut record = full_record();
        record.volatility = Some(f64::NAN);
        assert!(!record.is_complete());
        assert_eq!(record.coverage(), 12);
    }

    #[test]
    fn test_column_names_round_trip() {
        for column in FactorColumn::ALL {
            assert_eq!(FactorColumn::from_name(column.name()), Some(column));
        }
        assert_eq!(FactorColumn::from_name(FactorColumn::ID), None);
    }

    #[test]
    fn test_column_names_match_serialized_fields() {
        let value = serde_json::to_value(full_record()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FactorColumn::ALL.len() + 1);
        for column in FactorColumn::ALL {
            assert!(object.contains_key(column.name()), "{}", column);
        }
    }
}
