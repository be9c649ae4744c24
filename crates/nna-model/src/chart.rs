//! Chart descriptions handed to a rendering collaborator.

use serde::{Deserialize, Serialize};

/// A labelled bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Half-open bin `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Tukey boxplot statistics (whiskers at 1.5 IQR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    /// Missing percentage per column, ascending.
    MissingnessBar { bars: Vec<Bar> },
    Histogram {
        column: String,
        bins: Vec<HistogramBin>,
        /// Rows left out because the value was missing.
        missing: usize,
    },
    Boxplot {
        column: String,
        stats: BoxplotStats,
    },
    /// Most frequent values of a categorical column, missing included.
    TopCategories {
        column: String,
        top_n: usize,
        bars: Vec<Bar>,
        /// Rows whose value is outside the top N.
        other_count: usize,
    },
    CrossTabHeatmap {
        row_column: String,
        column_column: String,
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        /// `counts[row][column]`.
        counts: Vec<Vec<usize>>,
    },
    CorrelationHeatmap {
        columns: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> String {
        match self {
            ChartSpec::MissingnessBar { .. } => "Missing values by column (%)".to_string(),
            ChartSpec::Histogram { column, .. } => format!("Histogram: {column}"),
            ChartSpec::Boxplot { column, .. } => format!("Boxplot: {column}"),
            ChartSpec::TopCategories { column, top_n, .. } => {
                format!("Top {top_n} values: {column}")
            }
            ChartSpec::CrossTabHeatmap {
                row_column,
                column_column,
                ..
            } => format!("Cross tabulation: {row_column} x {column_column}"),
            ChartSpec::CorrelationHeatmap { .. } => {
                "Correlation matrix (numeric columns)".to_string()
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::MissingnessBar { .. } => "missingness_bar",
            ChartSpec::Histogram { .. } => "histogram",
            ChartSpec::Boxplot { .. } => "boxplot",
            ChartSpec::TopCategories { .. } => "top_categories",
            ChartSpec::CrossTabHeatmap { .. } => "cross_tab_heatmap",
            ChartSpec::CorrelationHeatmap { .. } => "correlation_heatmap",
        }
    }
}
