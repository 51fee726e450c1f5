//! Attendance file reader using calamine (workbooks) and csv (delimited text)

use anyhow::{Context, Result};
use calamine::{Reader, open_workbook_auto};
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

pub mod grid;

pub use grid::{Grid, RawCell};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Workbook,
}

impl FileFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(FileFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(FileFormat::Workbook),
            _ => None,
        }
    }
}

/// Read the first sheet of a file into a grid of raw cells
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();

    match FileFormat::from_path(path) {
        Some(FileFormat::Csv) => read_csv(path),
        Some(FileFormat::Workbook) => read_workbook(path),
        None => Err(anyhow::anyhow!(
            "Unsupported file format: {}",
            path.display()
        )),
    }
}

fn plain_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // No leading zeros, so ids like "0012" stay text
    RE.get_or_init(|| Regex::new(r"^-?(0|[1-9]\d*)(\.\d+)?$").unwrap())
}

/// Type one CSV field the way a spreadsheet would: plain decimals become numbers
pub fn csv_field_to_cell(field: &str) -> RawCell {
    if field.is_empty() {
        return RawCell::Empty;
    }

    let trimmed = field.trim();
    if plain_number_re().is_match(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            return RawCell::Number(n);
        }
    }
    RawCell::text(field)
}

/// Read a delimited text file. Header handling is left to the normalizer.
///
/// Fields are decoded lossily, so a stray Windows-1252 byte in a name does
/// not reject the whole file.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut rows = Vec::new();
    let mut lossy_fields = 0usize;
    for (index, record) in reader.byte_records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read CSV record {}", index + 1))?;
        rows.push(
            record
                .iter()
                .map(|bytes| {
                    let field = String::from_utf8_lossy(bytes);
                    if matches!(field, Cow::Owned(_)) {
                        lossy_fields += 1;
                    }
                    csv_field_to_cell(&field)
                })
                .collect(),
        );
    }

    if lossy_fields > 0 {
        tracing::warn!(
            fields = lossy_fields,
            path = %path.display(),
            "csv contains bytes that are not UTF-8; replaced"
        );
    }
    tracing::debug!(rows = rows.len(), path = %path.display(), "read csv grid");
    Ok(Grid::new(rows))
}

/// Read the first worksheet of an Excel/ODS workbook
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("Failed to read first worksheet")?,
        None => return Ok(Grid::default()),
    };

    // calamine trims leading empty columns; restore them so column indices line up with the sheet
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let rows: Vec<Vec<RawCell>> = range
        .rows()
        .map(|row| {
            std::iter::repeat_n(RawCell::Empty, leading_cols)
                .chain(row.iter().cloned().map(RawCell::from))
                .collect()
        })
        .collect();

    tracing::debug!(rows = rows.len(), path = %path.display(), "read workbook grid");
    Ok(Grid::new(rows))
}
