//! Import preparation: header validation and preview for an attendance file
//!
//! Everything here runs before the original file is sent anywhere. Only
//! structural problems (nothing to read, required columns missing) block the
//! import; cell values that fail to decode are shown as they were written.

use crate::normalizer::{self, DEFAULT_PREVIEW_ROWS, HeaderValidationResult, NormalizedRow};
use crate::reader::{self, Grid};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Message shown when a file cannot be read at all
pub const INVALID_FILE_MESSAGE: &str =
    "Invalid file. Please upload a valid CSV or Excel attendance file.";

/// Reasons an import is blocked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("The file is empty or has no header row")]
    EmptyFile,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFile,
}

/// Preview options
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Number of data rows to include in the preview
    pub preview_rows: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// An accepted import, ready to show before upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportPreview {
    pub validation: HeaderValidationResult,
    /// Header followed by normalized data rows
    pub rows: Vec<NormalizedRow>,
    /// Number of non-blank data rows in the whole file
    pub data_row_count: usize,
}

impl ImportPreview {
    pub fn header(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or_default()
    }

    pub fn data_rows(&self) -> &[NormalizedRow] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Validate a parsed grid and build its preview
pub fn prepare_import(grid: &Grid, options: &ImportOptions) -> Result<ImportPreview, ImportError> {
    let header = match grid.header() {
        Some(header) if !header.is_empty() => header,
        _ => return Err(ImportError::EmptyFile),
    };

    let validation = normalizer::classify_headers(header);
    if !validation.valid {
        tracing::info!(missing = ?validation.missing_columns, "import rejected");
        return Err(ImportError::MissingColumns(validation.missing_columns));
    }

    let data_row_count = grid
        .data_rows()
        .iter()
        .filter(|row| normalizer::is_data_row(row))
        .count();

    Ok(ImportPreview {
        validation,
        rows: normalizer::build_preview(grid, options.preview_rows),
        data_row_count,
    })
}

/// Read a file and prepare its import. Reader failures become [`ImportError::InvalidFile`].
pub fn preview_file<P: AsRef<Path>>(
    path: P,
    options: &ImportOptions,
) -> Result<ImportPreview, ImportError> {
    let path = path.as_ref();
    let grid = reader::read_grid(path).map_err(|e| {
        tracing::warn!(
            path = %path.display(),
            error = %format!("{:#}", e),
            "failed to read attendance file"
        );
        ImportError::InvalidFile
    })?;

    prepare_import(&grid, options)
}
