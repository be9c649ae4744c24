//! Writes every artifact of a profiling run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use nna_model::{ColumnFlags, Dataset, ProfileReport, QualityFlags};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::common::{FileStems, ensure_output_dir, write_json};
use crate::manifest::Manifest;
use crate::tables::{
    write_correlation, write_data_dictionary, write_frequency_table, write_missingness,
    write_numeric_summary, write_sample, write_value_counts,
};

pub const DATA_DICTIONARY_FILE: &str = "data_dictionary.csv";
pub const QUALITY_FLAGS_FILE: &str = "quality_flags.json";
pub const MISSINGNESS_FILE: &str = "missingness.csv";
pub const NUMERIC_SUMMARY_FILE: &str = "numeric_summary.csv";
pub const CHARTS_FILE: &str = "charts.json";
pub const CORRELATION_FILE: &str = "correlation.csv";
pub const SAMPLE_HEAD_FILE: &str = "sample_head.csv";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const VALUE_COUNTS_DIR: &str = "value_counts";
pub const FREQUENCY_DIR: &str = "frequency";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Recorded in the manifest.
    pub input: Option<PathBuf>,
    /// Rows written to `sample_head.csv`.
    pub sample_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            input: None,
            sample_rows: 100,
        }
    }
}

impl ReportOptions {
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub output_dir: PathBuf,
    /// Every artifact in write order; the manifest is not included.
    pub artifacts: Vec<PathBuf>,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

#[derive(Serialize)]
struct QualityFlagsDocument<'a> {
    rows: usize,
    columns: usize,
    duplicate_rows: usize,
    constant_columns: Vec<&'a str>,
    high_missing_columns: Vec<&'a str>,
    near_constant_columns: Vec<&'a str>,
    high_cardinality_columns: Vec<&'a str>,
    unique_id_candidates: Vec<&'a str>,
    details: &'a [ColumnFlags],
}

impl<'a> QualityFlagsDocument<'a> {
    fn new(flags: &'a QualityFlags) -> Self {
        Self {
            rows: flags.row_count,
            columns: flags.columns.len(),
            duplicate_rows: flags.duplicate_rows,
            constant_columns: flags.constant_columns(),
            high_missing_columns: flags.high_missing_columns(),
            near_constant_columns: flags.near_constant_columns(),
            high_cardinality_columns: flags.high_cardinality_columns(),
            unique_id_candidates: flags.unique_id_candidates(),
            details: &flags.columns,
        }
    }
}

/// Writes the report artifacts under `output_dir`, then the manifest.
///
/// Directories are created as needed; existing files are overwritten.
/// Column names that sanitize to the same file name get a numeric suffix,
/// so every artifact path in the manifest is distinct.
pub fn write_report(
    report: &ProfileReport,
    dataset: &Dataset,
    output_dir: &Path,
    options: &ReportOptions,
) -> Result<WrittenReport> {
    let span = info_span!("export", output_dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut artifacts = Vec::new();

    let path = output_dir.join(DATA_DICTIONARY_FILE);
    write_data_dictionary(&path, &report.dictionary)?;
    artifacts.push(path);

    let path = output_dir.join(QUALITY_FLAGS_FILE);
    write_json(&path, &QualityFlagsDocument::new(&report.quality))?;
    artifacts.push(path);

    let path = output_dir.join(MISSINGNESS_FILE);
    write_missingness(&path, &report.dictionary)?;
    artifacts.push(path);

    let path = output_dir.join(NUMERIC_SUMMARY_FILE);
    if write_numeric_summary(&path, &report.dictionary)? {
        artifacts.push(path);
    } else {
        debug!("no numeric columns; numeric summary skipped");
    }

    let with_counts: Vec<_> = report
        .dictionary
        .iter()
        .filter(|entry| !entry.kind.is_numeric())
        .collect();
    if !with_counts.is_empty() {
        let dir = ensure_output_dir(output_dir, VALUE_COUNTS_DIR)?;
        let mut stems = FileStems::new();
        for entry in with_counts {
            let name = format!("{}_top{}.csv", stems.claim(&entry.name), report.top_n);
            let path = dir.join(name);
            write_value_counts(&path, entry)?;
            artifacts.push(path);
        }
    }

    if !report.frequencies.is_empty() {
        let dir = ensure_output_dir(output_dir, FREQUENCY_DIR)?;
        let mut stems = FileStems::new();
        for table in &report.frequencies {
            let path = dir.join(format!("{}.csv", stems.claim(&table.name())));
            write_frequency_table(&path, table)?;
            artifacts.push(path);
        }
    }

    let path = output_dir.join(CHARTS_FILE);
    write_json(&path, &report.charts)?;
    artifacts.push(path);

    if let Some(matrix) = &report.correlation {
        let path = output_dir.join(CORRELATION_FILE);
        write_correlation(&path, matrix)?;
        artifacts.push(path);
    }

    let path = output_dir.join(SAMPLE_HEAD_FILE);
    write_sample(&path, &dataset.head(options.sample_rows))?;
    artifacts.push(path);

    let mut manifest = Manifest::new(
        options.input.as_deref(),
        report.overview.rows,
        report.overview.columns,
    );
    for path in &artifacts {
        manifest.record(output_dir, path)?;
    }
    let manifest_path = output_dir.join(MANIFEST_FILE);
    write_json(&manifest_path, &manifest)?;

    info!(
        artifacts = artifacts.len(),
        duration_ms = start.elapsed().as_millis(),
        "report written"
    );
    Ok(WrittenReport {
        output_dir: output_dir.to_path_buf(),
        artifacts,
        manifest_path,
        manifest,
    })
}
