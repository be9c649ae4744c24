use std::collections::BTreeMap;

use nna_model::{Column, DataOverview, Dataset};

/// Rows, columns, column kinds and total missing cells.
pub fn overview(dataset: &Dataset) -> DataOverview {
    let mut kind_counts = BTreeMap::new();
    for column in dataset.columns() {
        *kind_counts.entry(column.kind()).or_insert(0) += 1;
    }
    DataOverview {
        rows: dataset.row_count(),
        columns: dataset.column_count(),
        column_names: dataset
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        kind_counts,
        missing_cells: dataset.columns().iter().map(Column::null_count).sum(),
    }
}
