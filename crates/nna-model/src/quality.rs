use serde::{Deserialize, Serialize};

use crate::dataset::ColumnKind;

/// Quality metrics and flags for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFlags {
    pub name: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    pub distinct_count: usize,
    /// Share of present values held by the most frequent value (0..=1).
    pub dominant_share: f64,
    /// Distinct count over row count (0..=1).
    pub distinct_ratio: f64,
    pub missing_pct: f64,
    pub near_constant: bool,
    pub high_cardinality: bool,
    pub unique_id_candidate: bool,
    /// At most one distinct present value.
    pub constant: bool,
    pub high_missing: bool,
}

impl ColumnFlags {
    pub fn any(&self) -> bool {
        self.near_constant
            || self.high_cardinality
            || self.unique_id_candidate
            || self.constant
            || self.high_missing
    }
}

/// Column flags plus dataset-level duplicate count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub row_count: usize,
    /// Rows whose full value tuple already appeared earlier.
    pub duplicate_rows: usize,
    pub columns: Vec<ColumnFlags>,
}

impl QualityFlags {
    pub fn column(&self, name: &str) -> Option<&ColumnFlags> {
        self.columns.iter().find(|flags| flags.name == name)
    }

    pub fn near_constant_columns(&self) -> Vec<&str> {
        self.names_where(|flags| flags.near_constant)
    }

    pub fn high_cardinality_columns(&self) -> Vec<&str> {
        self.names_where(|flags| flags.high_cardinality)
    }

    pub fn unique_id_candidates(&self) -> Vec<&str> {
        self.names_where(|flags| flags.unique_id_candidate)
    }

    pub fn constant_columns(&self) -> Vec<&str> {
        self.names_where(|flags| flags.constant)
    }

    pub fn high_missing_columns(&self) -> Vec<&str> {
        self.names_where(|flags| flags.high_missing)
    }

    fn names_where(&self, predicate: impl Fn(&ColumnFlags) -> bool) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|flags| predicate(flags))
            .map(|flags| flags.name.as_str())
            .collect()
    }
}
