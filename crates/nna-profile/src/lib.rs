//! Descriptive profiling of NNA survey datasets.
//!
//! Every function here is a pure computation over a [`Dataset`](nna_model::Dataset);
//! writing results to disk belongs to `nna-report`.

pub mod charts;
pub mod correlation;
pub mod dictionary;
pub mod frequency;
pub mod numeric;
pub mod overview;
pub mod profiler;
pub mod quality;

pub use charts::{chart_specs, cross_tab_heatmap, missingness_bar};
pub use correlation::correlation_matrix;
pub use dictionary::{build_data_dictionary, profile_column, top_values};
pub use frequency::{frequency_table, missingness_report};
pub use numeric::{boxplot, histogram, numeric_summary, pearson, quantile};
pub use overview::overview;
pub use profiler::Profiler;
pub use quality::{compute_quality_flags, duplicate_rows};
