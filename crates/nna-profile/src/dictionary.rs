//! Per-column data dictionary.

use nna_model::{
    Cell, Column, ColumnProfile, Dataset, ProfileError, ProfileOptions, Result, ValueCount,
    percentage,
};

use crate::numeric::numeric_summary;

/// Builds one [`ColumnProfile`] per column, in dataset order.
///
/// Fails with [`ProfileError::EmptyDataset`] when the dataset has no columns.
/// A dataset with columns but no rows yields zero counts.
pub fn build_data_dictionary(
    dataset: &Dataset,
    options: &ProfileOptions,
) -> Result<Vec<ColumnProfile>> {
    if dataset.is_empty() {
        return Err(ProfileError::no_columns());
    }
    Ok(dataset
        .columns()
        .iter()
        .map(|column| profile_column(column, options))
        .collect())
}

/// Profile of a single column.
pub fn profile_column(column: &Column, options: &ProfileOptions) -> ColumnProfile {
    let row_count = column.len();
    let null_count = column.null_count();
    let kind = column.kind();
    let samples = column
        .cells()
        .iter()
        .filter(|cell| !cell.is_missing())
        .take(options.sample_values)
        .map(ToString::to_string)
        .collect();
    let numeric = if kind.is_numeric() {
        numeric_summary(&column.numbers())
    } else {
        None
    };
    let top_values = if kind.is_numeric() {
        Vec::new()
    } else {
        top_values(column, options.charts.top_n, options.decimals)
    };
    ColumnProfile {
        name: column.name().to_string(),
        kind,
        row_count,
        non_null: row_count - null_count,
        null_count,
        distinct_count: column.distinct_values().len(),
        missing_pct: percentage(null_count, row_count, options.decimals),
        samples,
        numeric,
        top_values,
    }
}

/// Most frequent values, missing included, by count descending then value.
pub fn top_values(column: &Column, limit: usize, decimals: u32) -> Vec<ValueCount> {
    let mut counts: Vec<(&Cell, usize)> = column.value_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
        .into_iter()
        .take(limit)
        .map(|(value, count)| ValueCount {
            value: value.clone(),
            count,
            share_pct: percentage(count, column.len(), decimals),
        })
        .collect()
}
