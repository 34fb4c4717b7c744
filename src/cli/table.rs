//! CSV table loading and outlier-free writing

use crate::cli::error::{CliError, CliResult};
use crate::detection::{OutlierError, OutlierMask};
use csv::{ReaderBuilder, StringRecord, Writer};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A headered CSV held in memory as text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Read a headered CSV file.
    ///
    /// Any failure (I/O, no header, ragged rows) is reported as
    /// [`CliError::UnreadableCsv`]; the underlying cause is logged at debug.
    pub fn read(path: &Path) -> CliResult<Self> {
        let unreadable = |cause: &dyn std::fmt::Display| {
            debug!(path = %path.display(), %cause, "csv read failed");
            CliError::UnreadableCsv(path.to_path_buf())
        };

        let file = std::fs::File::open(path).map_err(|e| unreadable(&e))?;
        Table::from_reader(file).map_err(|e| unreadable(&e))
    }

    /// Parse a headered CSV from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "no columns to parse").into());
        }
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the first column named `name`, in row order.
    pub fn column(&self, name: &str) -> CliResult<Vec<&str>> {
        let index = self
            .headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| CliError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row.get(index).unwrap_or("")).collect())
    }

    /// Write the header and every row not flagged by `mask`; returns the
    /// number of rows written.
    pub fn write_retained(&self, destination: &Path, mask: &OutlierMask) -> CliResult<usize> {
        let writer = Writer::from_path(destination)?;
        self.write_retained_to(writer, mask)
    }

    pub fn write_retained_to<W: io::Write>(
        &self, mut writer: Writer<W>, mask: &OutlierMask,
    ) -> CliResult<usize> {
        if mask.len() != self.rows.len() {
            return Err(OutlierError::LengthMismatch {
                expected: self.rows.len(),
                actual: mask.len(),
            }
            .into());
        }

        writer.write_record(&self.headers)?;
        let retained = mask.retained();
        let mut written = 0;
        for (row, &keep) in self.rows.iter().zip(retained.iter()) {
            if keep {
                writer.write_record(row)?;
                written += 1;
            }
        }
        writer.flush()?;
        Ok(written)
    }
}

/// `<parent>/<stem>-altered<.ext>` next to the source file.
pub fn default_destination(source: &Path) -> PathBuf {
    let stem = source.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let extension =
        source.extension().map(|ext| format!(".{}", ext.to_string_lossy())).unwrap_or_default();
    source.with_file_name(format!("{stem}-altered{extension}"))
}
