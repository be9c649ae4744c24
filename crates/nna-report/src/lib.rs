//! Report writing for NNA profiling runs.
//!
//! Artifacts written by [`write_report`]:
//!
//! - **data_dictionary.csv**, **missingness.csv**, **numeric_summary.csv**
//! - **quality_flags.json** and **charts.json**
//! - **value_counts/** and **frequency/** tables
//! - **correlation.csv** and **sample_head.csv**
//! - **manifest.json** with a SHA-256 per artifact

mod common;
mod manifest;
mod tables;
mod writer;

pub use common::{FileStems, sanitize_file_stem, sha256_hex};
pub use manifest::{ArtifactEntry, MANIFEST_SCHEMA, Manifest};
pub use tables::SAMPLE_SEPARATOR;
pub use writer::{
    CHARTS_FILE, CORRELATION_FILE, DATA_DICTIONARY_FILE, FREQUENCY_DIR, MANIFEST_FILE,
    MISSINGNESS_FILE, NUMERIC_SUMMARY_FILE, QUALITY_FLAGS_FILE, ReportOptions, SAMPLE_HEAD_FILE,
    VALUE_COUNTS_DIR, WrittenReport, write_report,
};
