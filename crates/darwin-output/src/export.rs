//! CSV export of the factor panel.
//!
//! The full table goes to `all_factors.csv`; each factor column is also written on its
//! own as `<column>.csv` with the security code, so downstream jobs can load a single
//! factor without parsing the wide table.

use darwin_factors::{FactorColumn, FactorRecord};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the full table.
pub const FULL_TABLE_FILE: &str = "all_factors.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output is not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Collected factor records, kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorTable {
    records: Vec<FactorRecord>,
}

impl FactorTable {
    /// Wrap records without reordering them.
    pub const fn new(records: Vec<FactorRecord>) -> Self {
        Self { records }
    }

    /// Records in arrival order.
    pub fn records(&self) -> &[FactorRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Two-column view of one factor.
    pub fn column(&self, column: FactorColumn) -> FactorColumnView<'_> {
        FactorColumnView {
            column,
            records: &self.records,
        }
    }

    /// Number of rows with a value in `column`.
    pub fn coverage(&self, column: FactorColumn) -> usize {
        self.records
            .iter()
            .filter(|record| record.value(column).is_some())
            .count()
    }
}

impl From<Vec<FactorRecord>> for FactorTable {
    fn from(records: Vec<FactorRecord>) -> Self {
        Self::new(records)
    }
}

/// `ts_code` plus one factor column.
#[derive(Debug, Clone, Copy)]
pub struct FactorColumnView<'a> {
    column: FactorColumn,
    records: &'a [FactorRecord],
}

impl FactorColumnView<'_> {
    /// The factor this view exposes.
    pub const fn factor(&self) -> FactorColumn {
        self.column
    }

    /// File name used when the view is exported.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.column.name())
    }
}

/// Types that can be written as CSV.
pub trait CsvExport {
    /// Write CSV rows to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError>;

    /// Render the CSV into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Write the CSV to `path`, prefixed with a UTF-8 byte-order mark when `bom` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    fn export_to_file(&self, path: &Path, bom: bool) -> Result<(), ExportError> {
        let mut file = BufWriter::new(File::create(path)?);
        if bom {
            file.write_all(UTF8_BOM)?;
        }
        self.write_csv(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl CsvExport for FactorTable {
    /// Header comes from the record fields; an empty table writes nothing.
    fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl CsvExport for FactorColumnView<'_> {
    fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record([FactorColumn::ID, self.column.name()])?;
        for record in self.records {
            wtr.serialize((&record.ts_code, record.value(self.column)))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Writes the full table and the per-factor files into one directory.
#[derive(Debug, Clone)]
pub struct FactorTableExporter {
    output_dir: PathBuf,
    byte_order_mark: bool,
}

impl FactorTableExporter {
    /// Export into `output_dir`, created on demand, with a byte-order mark.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            byte_order_mark: true,
        }
    }

    /// Toggle the leading UTF-8 byte-order mark.
    pub const fn with_byte_order_mark(mut self, enabled: bool) -> Self {
        self.byte_order_mark = enabled;
        self
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `all_factors.csv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_full_table(&self, table: &FactorTable) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(FULL_TABLE_FILE);
        table.export_to_file(&path, self.byte_order_mark)?;
        debug!(path = %path.display(), rows = table.len(), "wrote full table");
        Ok(path)
    }

    /// Write one `<column>.csv` per factor column.
    ///
    /// An empty table has no columns to split, so nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written.
    pub fn write_factor_files(&self, table: &FactorTable) -> Result<Vec<PathBuf>, ExportError> {
        if table.is_empty() {
            return Ok(Vec::new());
        }
        fs::create_dir_all(&self.output_dir)?;
        FactorColumn::ALL
            .iter()
            .map(|column| {
                let view = table.column(*column);
                let path = self.output_dir.join(view.file_name());
                view.export_to_file(&path, self.byte_order_mark)?;
                Ok(path)
            })
            .collect()
    }

    /// Write the full table, then the per-factor files. Returns every path written.
    ///
    /// # Errors
    ///
    /// Returns the first write error; files written before it are left in place.
    pub fn export(&self, table: &FactorTable) -> Result<Vec<PathBuf>, ExportError> {
        let mut paths = vec![self.write_full_table(table)?];
        paths.extend(self.write_factor_files(table)?);
        Ok(paths)
    }
}
