//! Grid data structures

use std::fmt;

/// A raw cell as handed back by a spreadsheet or CSV parser.
///
/// No type tag beyond this is attached: whether a number is an Excel date,
/// a fractional-day time or a plain quantity is decided by the column it
/// sits in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawCell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl RawCell {
    /// Create a text cell
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }

    /// Check if the cell is absent or an empty string
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.is_empty(),
            RawCell::Number(_) => false,
        }
    }

    /// Absent, empty string, or numeric zero
    pub fn is_empty_equivalent(&self) -> bool {
        match self {
            RawCell::Number(n) => *n == 0.0,
            other => other.is_blank(),
        }
    }

    /// Display form used when a value passes through unchanged
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Number(n) => write!(f, "{}", n),
            RawCell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Text(s)
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl From<calamine::Data> for RawCell {
    fn from(data: calamine::Data) -> Self {
        use calamine::Data;

        match data {
            Data::Empty | Data::Error(_) => RawCell::Empty,
            Data::Int(i) => RawCell::Number(i as f64),
            Data::Float(f) => RawCell::Number(f),
            // Keep the serial so the date/time decoders see what a sheet library would hand back
            Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s),
            Data::Bool(b) => RawCell::Text(b.to_string()),
        }
    }
}

/// A parsed file: row 0 is the header row, rows 1.. are data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<RawCell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        Self { rows }
    }

    /// Get the header row
    pub fn header(&self) -> Option<&[RawCell]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Get all rows after the header
    pub fn data_rows(&self) -> &[Vec<RawCell>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header().is_none_or(|h| h.is_empty())
    }
}

/// Build a grid from string literals, mostly useful in tests
impl<const N: usize> From<Vec<[&str; N]>> for Grid {
    fn from(rows: Vec<[&str; N]>) -> Self {
        Grid::new(
            rows.into_iter()
                .map(|row| row.iter().map(|s| RawCell::from(*s)).collect())
                .collect(),
        )
    }
}
