//! Attendance spreadsheet normalization
//!
//! Infers what each column holds from its header, then decodes data rows
//! into display strings aligned with the header row.

pub mod date;
pub mod header;
pub mod numeric;
pub mod time;

pub use date::format_excel_date;
pub use header::{
    ColumnRole, HeaderValidationResult, classify_headers, normalize_header_text, resolve_roles,
};
pub use numeric::format_numeric;
pub use time::format_excel_time;

use crate::reader::{Grid, RawCell};

/// Display strings for one row, one per header column
pub type NormalizedRow = Vec<String>;

/// Number of data rows shown in an import preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Decode one cell according to its column role
pub fn normalize_cell(cell: &RawCell, role: ColumnRole) -> String {
    if cell.is_empty_equivalent() {
        return String::new();
    }

    match role {
        ColumnRole::Date => format_excel_date(cell),
        ColumnRole::NextDay => match cell {
            RawCell::Text(s) if time::is_zero_time_string(s) || numeric::is_zero_text(s) => {
                String::new()
            }
            _ => format_excel_time(cell),
        },
        ColumnRole::TimeIn | ColumnRole::TimeOut => match cell {
            RawCell::Text(s) if matches!(s.trim(), "0:00" | "00:00") => String::new(),
            _ => format_excel_time(cell),
        },
        ColumnRole::Hours => match cell {
            RawCell::Text(s) if numeric::is_zero_text(s) => String::new(),
            _ => format_numeric(cell),
        },
        ColumnRole::EmployeeId | ColumnRole::Day | ColumnRole::Unknown => cell.display(),
    }
}

/// Normalize a data row against its header row
pub fn classify_row(row: &[RawCell], header_row: &[RawCell]) -> NormalizedRow {
    normalize_with_roles(row, &resolve_roles(header_row))
}

/// Normalize a data row with roles already resolved. The result always has one entry per role.
pub fn normalize_with_roles(row: &[RawCell], roles: &[ColumnRole]) -> NormalizedRow {
    roles
        .iter()
        .enumerate()
        .map(|(index, role)| {
            row.get(index)
                .map(|cell| normalize_cell(cell, *role))
                .unwrap_or_default()
        })
        .collect()
}

/// A row counts as data when any cell past the first column holds something
pub fn is_data_row(row: &[RawCell]) -> bool {
    row.iter().skip(1).any(|cell| !cell.is_blank())
}

/// Header plus the first `limit` data rows, each normalized
pub fn build_preview(grid: &Grid, limit: usize) -> Vec<NormalizedRow> {
    let Some(header) = grid.header() else {
        return Vec::new();
    };

    let roles = resolve_roles(header);
    let header_row: NormalizedRow = header.iter().map(RawCell::display).collect();

    std::iter::once(header_row)
        .chain(
            grid.data_rows()
                .iter()
                .filter(|row| is_data_row(row))
                .take(limit)
                .map(|row| normalize_with_roles(row, &roles)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::header::STANDARD_HEADER;

    fn row(cells: &[&str]) -> Vec<RawCell> {
        cells.iter().map(|s| RawCell::from(*s)).collect()
    }

    #[test]
    fn test_biometric_row() {
        let header = row(&STANDARD_HEADER);
        let data = row(&["1001", "1/16/2024", "Tue", "8:00", "17:00", "", "", "", "8.00"]);

        let normalized = classify_row(&data, &header);
        assert_eq!(normalized.len(), header.len());
        assert_eq!(normalized[0], "1001");
        assert_eq!(normalized[1], "2024-01-16");
        assert_eq!(normalized[2], "Tue");
        assert_eq!(normalized[3], "08:00 AM");
        assert_eq!(normalized[4], "05:00 PM");
        assert_eq!(normalized[5], "");
        assert_eq!(normalized[7], "");
        assert_eq!(normalized[8], "8.00");
    }

    #[test]
    fn test_numeric_cells_from_workbook() {
        let header = row(&STANDARD_HEADER);
        let data = vec![
            RawCell::Number(1001.0),
            RawCell::Number(45307.0),
            RawCell::text("Tue"),
            RawCell::Number(0.3125),
            RawCell::Number(0.0),
            RawCell::Empty,
            RawCell::Empty,
            RawCell::Number(0.25),
            RawCell::Number(0.0),
        ];

        let normalized = classify_row(&data, &header);
        assert_eq!(normalized[0], "1001");
        assert_eq!(normalized[1], "2024-01-16");
        assert_eq!(normalized[3], "07:30 AM");
        assert_eq!(normalized[4], "");
        assert_eq!(normalized[7], "06:00 AM");
        assert_eq!(normalized[8], "");
    }

    #[test]
    fn test_zero_strings_are_blank() {
        let header = row(&STANDARD_HEADER);
        let data = row(&["1001", "1/16/2024", "Sat", "00:00", "0:00", "", "", "0", "0.00"]);

        let normalized = classify_row(&data, &header);
        assert_eq!(normalized[3], "");
        assert_eq!(normalized[4], "");
        assert_eq!(normalized[7], "");
        assert_eq!(normalized[8], "");
    }

    #[test]
    fn test_row_length_follows_header() {
        let header = row(&STANDARD_HEADER);

        let short = classify_row(&row(&["1001", "1/16/2024"]), &header);
        assert_eq!(short.len(), header.len());
        assert!(short[2..].iter().all(|s| s.is_empty()));

        let long = classify_row(&row(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]), &header);
        assert_eq!(long.len(), header.len());
    }

    #[test]
    fn test_positional_roles_for_blank_headers() {
        let header = row(&["", "", "", "In", "Out"]);
        let normalized = classify_row(&row(&["E-7", "2/3/2024", "Sat", "9:00", "18:00"]), &header);
        assert_eq!(normalized, vec!["E-7", "2024-02-03", "Sat", "09:00 AM", "06:00 PM"]);
    }

    #[test]
    fn test_preview_skips_blank_rows_and_limits() {
        let mut rows = vec![row(&STANDARD_HEADER)];
        rows.push(row(&["1001", "", "", "", "", "", "", "", ""]));
        for day in 1..=8 {
            let date = format!("1/{}/2024", day);
            rows.push(row(&[
                "1001",
                date.as_str(),
                "",
                "8:00",
                "17:00",
                "",
                "",
                "",
                "8",
            ]));
        }
        let grid = Grid::new(rows);

        let preview = build_preview(&grid, DEFAULT_PREVIEW_ROWS);
        assert_eq!(preview.len(), 1 + DEFAULT_PREVIEW_ROWS);
        assert_eq!(preview[0][0], "Employee No.");
        assert_eq!(preview[1][1], "2024-01-01");
        assert_eq!(preview[5][1], "2024-01-05");
    }

    #[test]
    fn test_preview_of_empty_grid() {
        assert!(build_preview(&Grid::default(), DEFAULT_PREVIEW_ROWS).is_empty());
    }
}
