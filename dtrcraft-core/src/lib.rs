//! dtrcraft-core: attendance import normalization and DTR problem detection
//!
//! Two independent pieces live here. The normalizer reads a loosely formatted
//! attendance spreadsheet, works out which column is which from the header
//! row, and decodes Excel dates and times into display strings. The detector
//! runs a fixed list of rules over processed attendance records and reports
//! missing punches, implausible hours and weekend attendance.

pub mod config;
pub mod detector;
pub mod import;
pub mod normalizer;
pub mod problem;
pub mod reader;
pub mod record;
pub mod rules;
pub mod summary;

pub use config::DtrConfig;
pub use detector::{Detector, RecordReport, detect};
pub use import::{ImportError, ImportOptions, ImportPreview, prepare_import, preview_file};
pub use normalizer::{
    ColumnRole, HeaderValidationResult, NormalizedRow, classify_headers, classify_row,
    format_excel_date, format_excel_time, format_numeric, normalize_header_text,
};
pub use problem::{Problem, ProblemType, Severity};
pub use reader::{Grid, RawCell, read_grid};
pub use record::{AttendanceRecord, load_records, parse_records};
pub use rules::DtrRule;
pub use summary::DetectionSummary;
