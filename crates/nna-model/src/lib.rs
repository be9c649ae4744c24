//! Data model for profiling NNA survey tables.
//!
//! A [`Dataset`] is a columnar table whose columns carry a [`ColumnKind`]
//! assigned once when the dataset is built. Profiling outputs
//! ([`ColumnProfile`], [`QualityFlags`], [`FrequencyTable`], [`ChartSpec`])
//! are plain serializable values.

pub mod cell;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod options;
pub mod profile;
pub mod quality;
pub mod report;

pub use cell::{Cell, MISSING_LABEL, format_number, parse_number};
pub use chart::{Bar, BoxplotStats, ChartSpec, HistogramBin};
pub use dataset::{BuiltDataset, Column, ColumnKind, Dataset, DatasetBuilder, KindPolicy};
pub use error::{ProfileError, Result};
pub use frequency::{FrequencyRow, FrequencyTable};
pub use options::{
    ChartOptions, FrequencyOptions, ProfileOptions, QualityThresholds, percentage, round_to,
};
pub use profile::{ColumnProfile, NumericSummary, ValueCount};
pub use quality::{ColumnFlags, QualityFlags};
pub use report::{CorrelationMatrix, DataOverview, ProfileReport};
