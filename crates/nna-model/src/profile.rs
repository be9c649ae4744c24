use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::dataset::ColumnKind;

/// Descriptive statistics of a numeric column.
///
/// `std` is the sample standard deviation and is `None` below two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}

/// A value and how many rows hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: Cell,
    pub count: usize,
    /// Share of all rows, in percent.
    pub share_pct: f64,
}

/// Data dictionary entry for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub row_count: usize,
    pub non_null: usize,
    pub null_count: usize,
    /// Distinct present values; missing is not counted.
    pub distinct_count: usize,
    pub missing_pct: f64,
    /// First present values, as text.
    pub samples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    /// Most frequent values (missing included) for non-numeric columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_values: Vec<ValueCount>,
}
