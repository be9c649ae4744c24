//! Single survey values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Label used for missing values in charts and frequency outputs.
pub const MISSING_LABEL: &str = "(missing)";

/// One value of a dataset.
///
/// Missing values are explicit. Cells order numbers by value, then text
/// lexicographically, with `Missing` last, so sorted outputs are stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Build a text cell, mapping blank strings to `Missing`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Display label; missing values render as [`MISSING_LABEL`].
    pub fn label(&self) -> String {
        match self {
            Cell::Missing => MISSING_LABEL.to_string(),
            other => other.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Number(_) => 0,
            Cell::Text(_) => 1,
            Cell::Missing => 2,
        }
    }
}

/// Parses a raw value as a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats a number without a trailing `.0` and without negative zero.
pub fn format_number(value: f64) -> String {
    format!("{}", normalize_zero(value))
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => f.write_str(&format_number(*value)),
            Cell::Text(value) => f.write_str(value),
            Cell::Missing => Ok(()),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => normalize_zero(*a).total_cmp(&normalize_zero(*b)),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Cell::Number(value) => normalize_zero(*value).to_bits().hash(state),
            Cell::Text(value) => value.hash(state),
            Cell::Missing => {}
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sorts_last() {
        let mut cells = vec![
            Cell::Missing,
            Cell::Text("urban".into()),
            Cell::Number(3.0),
            Cell::Text("rural".into()),
            Cell::Number(-1.0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Cell::Number(-1.0),
                Cell::Number(3.0),
                Cell::Text("rural".into()),
                Cell::Text("urban".into()),
                Cell::Missing,
            ]
        );
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Cell::Number(-0.0), Cell::Number(0.0));
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn parses_only_finite_numbers() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("doce"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn formats_whole_numbers_without_fraction() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(Cell::Missing.label(), MISSING_LABEL);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Cell::Number(1.5),
            Cell::Text("si".into()),
            Cell::Missing,
        ])
        .expect("serialize cells");
        assert_eq!(json, r#"[1.5,"si",null]"#);
    }
}
