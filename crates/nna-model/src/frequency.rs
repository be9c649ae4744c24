use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// One observed key combination and its row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// One value per grouping column.
    pub key: Vec<Cell>,
    pub count: usize,
    /// Share of counted rows, in percent.
    pub share_pct: f64,
}

/// Row counts grouped by one or two columns.
///
/// Rows are sorted by count descending, then key ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub columns: Vec<String>,
    pub rows: Vec<FrequencyRow>,
    /// Rows in the dataset.
    pub total_rows: usize,
    /// Rows left out because their key had a missing value.
    pub excluded_rows: usize,
}

impl FrequencyTable {
    /// Sum of all counts; equals `total_rows - excluded_rows`.
    pub fn counted_rows(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// Stable name built from the grouping columns, e.g. `zona__sexo`.
    pub fn name(&self) -> String {
        self.columns.join("__")
    }

    pub fn count_of(&self, key: &[Cell]) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.key.as_slice() == key)
            .map(|row| row.count)
    }
}
