//! End-of-run summary.

use crate::export::FactorTable;
use chrono::NaiveDate;
use darwin_factors::{FactorColumn, FailureKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Date the run was performed
    pub run_date: NaiveDate,
    /// Securities dispatched
    pub universe_size: usize,
    /// Records exported
    pub records: usize,
    /// Dropped securities per failure kind
    pub failures: BTreeMap<String, usize>,
    /// Non-missing values per factor column, in export order
    pub coverage: Vec<(String, usize)>,
}

impl RunSummary {
    /// Summarize an exported table.
    pub fn new(
        run_date: NaiveDate,
        universe_size: usize,
        table: &FactorTable,
        failures: &BTreeMap<FailureKind, usize>,
    ) -> Self {
        Self {
            run_date,
            universe_size,
            records: table.len(),
            failures: FailureKind::ALL
                .iter()
                .map(|kind| (kind.label().to_string(), *failures.get(kind).unwrap_or(&0)))
                .collect(),
            coverage: FactorColumn::ALL
                .iter()
                .map(|column| (column.name().to_string(), table.coverage(*column)))
                .collect(),
        }
    }

    /// Total dropped securities.
    pub fn dropped(&self) -> usize {
        self.failures.values().sum()
    }

    /// Render as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();
        let rule = "─".repeat(44);

        output.push_str(&format!("Factor panel for {}\n", self.run_date));
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!("{:<28}{:>16}\n", "Universe", self.universe_size));
        output.push_str(&format!("{:<28}{:>16}\n", "Records", self.records));
        output.push_str(&format!("{:<28}{:>16}\n", "Dropped", self.dropped()));
        for (kind, count) in &self.failures {
            output.push_str(&format!("  {:<26}{:>16}\n", kind, count));
        }
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!("{:<28}{:>16}\n", "Factor", "Coverage"));
        for (name, count) in &self.coverage {
            let pct = if self.records == 0 {
                0.0
            } else {
                *count as f64 / self.records as f64 * 100.0
            };
            output.push_str(&format!("  {:<26}{:>8} ({:>5.1}%)\n", name, count, pct));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darwin_factors::FactorRecord;

    fn sample_table() -> FactorTable {
        FactorTable::new(vec![
            FactorRecord {
                ln_mv: Some(24.0),
                ..FactorRecord::empty("600000.SH")
            },
            FactorRecord::empty("000001.SZ"),
        ])
    }

    #[test]
    fn test_summary_counts() {
        let mut failures = BTreeMap::new();
        failures.insert(FailureKind::MissingBasic, 3);
        failures.insert(FailureKind::Timeout, 1);

        let summary = RunSummary::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            6,
            &sample_table(),
            &failures,
        );

        assert_eq!(summary.records, 2);
        assert_eq!(summary.dropped(), 4);
        assert_eq!(summary.failures.get("missing_basic"), Some(&3));
        assert_eq!(summary.failures.get("data_error"), Some(&0));
        assert_eq!(summary.coverage.len(), 12);
        assert_eq!(summary.coverage[0], ("ln_mv".to_string(), 1));
    }

    #[test]
    fn test_ascii_table() {
        let summary = RunSummary::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            2,
            &sample_table(),
            &BTreeMap::new(),
        );
        let text = summary.to_ascii_table();
        assert!(text.contains("Factor panel for 2024-01-05"));
        assert!(text.contains("ln_mv"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("profit_growth"));
    }

    #[test]
    fn test_ascii_table_layout() {
        let mut failures = BTreeMap::new();
        failures.insert(FailureKind::Timeout, 2);
        let summary = RunSummary::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            4,
            &sample_table(),
            &failures,
        );
        let text = summary.to_ascii_table();
        let lines: Vec<&str> = text.lines().collect();

        // title, two rules, three totals, three failure kinds, header, twelve columns
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[2], format!("{:<28}{:>16}", "Universe", 4));
        assert_eq!(lines[4], format!("{:<28}{:>16}", "Dropped", 2));
        assert!(lines.contains(&"  timeout                                  2"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_table_coverage() {
        let summary = RunSummary::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            0,
            &FactorTable::default(),
            &BTreeMap::new(),
        );
        assert_eq!(summary.records, 0);
        assert!(summary.to_ascii_table().contains("0.0%"));
    }
}
