use nna_model::{Cell, Column, CorrelationMatrix, Dataset};

use crate::numeric::pearson;

/// Pearson correlation between every pair of numeric columns, using rows
/// where both values are present.
///
/// `None` when the dataset has fewer than two numeric columns.
pub fn correlation_matrix(dataset: &Dataset) -> Option<CorrelationMatrix> {
    let numeric: Vec<&Column> = dataset
        .columns()
        .iter()
        .filter(|column| column.kind().is_numeric())
        .collect();
    if numeric.len() < 2 {
        return None;
    }
    let values = numeric
        .iter()
        .map(|left| {
            numeric
                .iter()
                .map(|right| pearson(&complete_pairs(left, right)))
                .collect()
        })
        .collect();
    Some(CorrelationMatrix {
        columns: numeric
            .iter()
            .map(|column| column.name().to_string())
            .collect(),
        values,
    })
}

fn complete_pairs(left: &Column, right: &Column) -> Vec<(f64, f64)> {
    left.cells()
        .iter()
        .zip(right.cells())
        .filter_map(|(x, y)| Some((Cell::as_f64(x)?, Cell::as_f64(y)?)))
        .collect()
}
