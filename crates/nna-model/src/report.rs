use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::dataset::ColumnKind;
use crate::frequency::FrequencyTable;
use crate::profile::ColumnProfile;
use crate::quality::QualityFlags;

/// Shape of the dataset at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataOverview {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub kind_counts: BTreeMap<ColumnKind, usize>,
    pub missing_cells: usize,
}

/// Pearson correlations between numeric columns.
///
/// `values[i][j]` is `None` when fewer than two complete pairs exist or a
/// column is constant over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// Everything one profiling pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub overview: DataOverview,
    pub dictionary: Vec<ColumnProfile>,
    pub quality: QualityFlags,
    pub missingness: BTreeMap<String, f64>,
    pub frequencies: Vec<FrequencyTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    pub charts: Vec<ChartSpec>,
    /// Value-count limit used for the dictionary and top-N charts.
    pub top_n: usize,
}
