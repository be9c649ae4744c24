//! Chart specifications for the rendering collaborator.

use std::collections::BTreeSet;

use nna_model::{
    Bar, Cell, ChartOptions, ChartSpec, ColumnKind, CorrelationMatrix, Dataset, FrequencyTable,
    percentage,
};

use crate::dictionary::top_values;
use crate::numeric::{boxplot, histogram};

/// Builds every chart for a profiled dataset.
///
/// Order: missingness bar, histograms, boxplots, top-N bars, cross-tab
/// heatmaps (one per two-column frequency table), correlation heatmap.
pub fn chart_specs(
    dataset: &Dataset,
    frequencies: &[FrequencyTable],
    correlation: Option<&CorrelationMatrix>,
    options: &ChartOptions,
    decimals: u32,
) -> Vec<ChartSpec> {
    let mut charts = Vec::new();
    if let Some(chart) = missingness_bar(dataset, decimals) {
        charts.push(chart);
    }
    charts.extend(histograms(dataset, options));
    charts.extend(boxplots(dataset, options));
    charts.extend(top_categories(dataset, options));
    charts.extend(frequencies.iter().filter_map(cross_tab_heatmap));
    if let Some(matrix) = correlation {
        charts.push(ChartSpec::CorrelationHeatmap {
            columns: matrix.columns.clone(),
            values: matrix.values.clone(),
        });
    }
    charts
}

/// Missing percentage per column, sorted ascending (ties by name).
pub fn missingness_bar(dataset: &Dataset, decimals: u32) -> Option<ChartSpec> {
    if dataset.is_empty() {
        return None;
    }
    let mut bars: Vec<Bar> = dataset
        .columns()
        .iter()
        .map(|column| Bar {
            label: column.name().to_string(),
            value: percentage(column.null_count(), dataset.row_count(), decimals),
        })
        .collect();
    bars.sort_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.label.cmp(&b.label)));
    Some(ChartSpec::MissingnessBar { bars })
}

pub fn histograms(dataset: &Dataset, options: &ChartOptions) -> Vec<ChartSpec> {
    dataset
        .columns_of_kind(ColumnKind::Numeric)
        .take(options.max_histograms)
        .map(|column| ChartSpec::Histogram {
            column: column.name().to_string(),
            bins: histogram(&column.numbers(), options.histogram_bins),
            missing: column.null_count(),
        })
        .collect()
}

pub fn boxplots(dataset: &Dataset, options: &ChartOptions) -> Vec<ChartSpec> {
    dataset
        .columns_of_kind(ColumnKind::Numeric)
        .take(options.max_boxplots)
        .filter_map(|column| {
            Some(ChartSpec::Boxplot {
                column: column.name().to_string(),
                stats: boxplot(&column.numbers())?,
            })
        })
        .collect()
}

/// Top-N bars for categorical columns; identifiers and free text are skipped.
pub fn top_categories(dataset: &Dataset, options: &ChartOptions) -> Vec<ChartSpec> {
    dataset
        .columns_of_kind(ColumnKind::Categorical)
        .map(|column| {
            let top = top_values(column, options.top_n, 0);
            let shown: usize = top.iter().map(|value| value.count).sum();
            ChartSpec::TopCategories {
                column: column.name().to_string(),
                top_n: options.top_n,
                bars: top
                    .iter()
                    .map(|value| Bar {
                        label: value.value.label(),
                        value: value.count as f64,
                    })
                    .collect(),
                other_count: column.len() - shown,
            }
        })
        .collect()
}

/// Heatmap of a two-column frequency table; `None` for single-column tables.
pub fn cross_tab_heatmap(table: &FrequencyTable) -> Option<ChartSpec> {
    let [row_column, column_column] = table.columns.as_slice() else {
        return None;
    };
    let row_keys: BTreeSet<&Cell> = table.rows.iter().map(|row| &row.key[0]).collect();
    let column_keys: BTreeSet<&Cell> = table.rows.iter().map(|row| &row.key[1]).collect();
    let row_keys: Vec<&Cell> = row_keys.into_iter().collect();
    let column_keys: Vec<&Cell> = column_keys.into_iter().collect();
    let mut counts = vec![vec![0usize; column_keys.len()]; row_keys.len()];
    for row in &table.rows {
        let (Ok(r), Ok(c)) = (
            row_keys.binary_search(&&row.key[0]),
            column_keys.binary_search(&&row.key[1]),
        ) else {
            continue;
        };
        counts[r][c] = row.count;
    }
    Some(ChartSpec::CrossTabHeatmap {
        row_column: row_column.clone(),
        column_column: column_column.clone(),
        row_labels: row_keys.iter().map(|cell| cell.label()).collect(),
        column_labels: column_keys.iter().map(|cell| cell.label()).collect(),
        counts,
    })
}
