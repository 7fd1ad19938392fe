//! Small accessors over provider frames.

use crate::error::{DataError, Result};
use polars::prelude::*;

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))
}

/// Sort a frame by one column.
///
/// Tushare dates are `YYYYMMDD` strings, so lexical order is chronological order.
pub fn sort_by(df: &DataFrame, by: &str, descending: bool) -> Result<DataFrame> {
    column(df, by)?;
    let sorted = df
        .clone()
        .lazy()
        .sort(
            [by],
            SortMultipleOptions::default()
                .with_order_descending(descending)
                .with_nulls_last(true),
        )
        .collect()?;
    Ok(sorted)
}

/// Read a column as nullable `f64` values.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as nullable strings.
pub fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Read one numeric cell; out-of-range rows and nulls are `None`.
pub fn f64_at(df: &DataFrame, name: &str, row: usize) -> Result<Option<f64>> {
    Ok(f64_values(df, name)?.get(row).copied().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "trade_date" => ["20240103", "20240105", "20240104"],
            "close" => [Some(10.0), None, Some(11.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_sort_descending() {
        let sorted = sort_by(&sample(), "trade_date", true).unwrap();
        let dates = str_values(&sorted, "trade_date").unwrap();
        assert_eq!(dates[0].as_deref(), Some("20240105"));
        assert_eq!(dates[2].as_deref(), Some("20240103"));
    }

    #[test]
    fn test_sort_ascending() {
        let sorted = sort_by(&sample(), "trade_date", false).unwrap();
        let closes = f64_values(&sorted, "close").unwrap();
        assert_eq!(closes, vec![Some(10.0), Some(11.0), None]);
    }

    #[test]
    fn test_missing_column() {
        let err = f64_values(&sample(), "open").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(name) if name == "open"));
    }

    #[test]
    fn test_f64_at_out_of_range() {
        let df = sample();
        assert_eq!(f64_at(&df, "close", 0).unwrap(), Some(10.0));
        assert_eq!(f64_at(&df, "close", 1).unwrap(), None);
        assert_eq!(f64_at(&df, "close", 9).unwrap(), None);
    }
}
