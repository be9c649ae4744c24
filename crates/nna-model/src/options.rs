//! Configuration options for a profiling run.

use serde::{Deserialize, Serialize};

/// Cutoffs used by the quality flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Dominant-value share (of present values) at or above which a column is
    /// near-constant.
    pub near_constant: f64,
    /// Distinct/row ratio at or above which a non-numeric column is
    /// high-cardinality.
    pub high_cardinality: f64,
    /// Missing percentage above which a column is flagged.
    pub high_missing_pct: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            near_constant: 0.95,
            high_cardinality: 0.5,
            high_missing_pct: 30.0,
        }
    }
}

impl QualityThresholds {
    pub fn with_near_constant(mut self, threshold: f64) -> Self {
        self.near_constant = threshold;
        self
    }

    pub fn with_high_cardinality(mut self, threshold: f64) -> Self {
        self.high_cardinality = threshold;
        self
    }

    pub fn with_high_missing_pct(mut self, threshold: f64) -> Self {
        self.high_missing_pct = threshold;
        self
    }
}

/// Limits for the generated chart specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Numeric columns that get a histogram, in dataset order.
    pub max_histograms: usize,
    /// Numeric columns that get a boxplot, in dataset order.
    pub max_boxplots: usize,
    pub histogram_bins: usize,
    /// Bars per categorical top-N chart and values per dictionary entry.
    pub top_n: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            max_histograms: 12,
            max_boxplots: 8,
            histogram_bins: 30,
            top_n: 20,
        }
    }
}

/// Options for frequency tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyOptions {
    /// Exclude rows whose grouping key has a missing value.
    ///
    /// By default missing values form their own category.
    pub drop_missing: bool,
}

/// Options controlling a full profiling pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    pub thresholds: QualityThresholds,
    pub charts: ChartOptions,
    pub frequency: FrequencyOptions,
    /// Decimal places for every reported percentage.
    pub decimals: u32,
    /// Sample values kept per dictionary entry.
    pub sample_values: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            thresholds: QualityThresholds::default(),
            charts: ChartOptions::default(),
            frequency: FrequencyOptions::default(),
            decimals: 2,
            sample_values: 3,
        }
    }
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_charts(mut self, charts: ChartOptions) -> Self {
        self.charts = charts;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

/// `part / whole * 100`, rounded; zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, decimals)
}
