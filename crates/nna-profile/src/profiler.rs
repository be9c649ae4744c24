//! Single-pass profiling of a dataset snapshot.
//!
//! The profiler is a pure function of its input: it holds only options,
//! never mutates the dataset, and produces identical reports for identical
//! inputs.
//!
//! # Stages
//!
//! 1. **Overview** - shape, kinds, missing cells
//! 2. **Dictionary** - one [`ColumnProfile`](nna_model::ColumnProfile) per column
//! 3. **Quality** - per-column flags and duplicate rows
//! 4. **Missingness** - missing percentage per column
//! 5. **Frequencies** - one table per requested grouping
//! 6. **Correlation** - Pearson matrix over numeric columns
//! 7. **Charts** - chart specifications for the renderer

use std::time::Instant;

use nna_model::{Dataset, FrequencyTable, ProfileOptions, ProfileReport, Result};
use tracing::{debug, info, info_span};

use crate::charts::chart_specs;
use crate::correlation::correlation_matrix;
use crate::dictionary::build_data_dictionary;
use crate::frequency::{frequency_table, missingness_report};
use crate::overview::overview;
use crate::quality::compute_quality_flags;

/// Runs every profiling stage with one set of options.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    options: ProfileOptions,
}

impl Profiler {
    pub fn new(options: ProfileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Profiles `dataset`, building one frequency table per entry of `groups`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyDataset`](nna_model::ProfileError::EmptyDataset)
    /// for a dataset without columns or rows, and the frequency-table errors
    /// for invalid groupings.
    pub fn run(&self, dataset: &Dataset, groups: &[Vec<String>]) -> Result<ProfileReport> {
        let span = info_span!(
            "profile",
            rows = dataset.row_count(),
            columns = dataset.column_count()
        );
        let _guard = span.enter();
        let start = Instant::now();
        let options = &self.options;

        let overview = overview(dataset);
        let dictionary = build_data_dictionary(dataset, options)?;
        debug!(entries = dictionary.len(), "data dictionary built");

        let quality = compute_quality_flags(dataset, &options.thresholds, options.decimals)?;
        info!(
            duplicate_rows = quality.duplicate_rows,
            near_constant = quality.near_constant_columns().len(),
            high_cardinality = quality.high_cardinality_columns().len(),
            unique_id_candidates = quality.unique_id_candidates().len(),
            "quality flags computed"
        );

        let missingness = missingness_report(dataset, options.decimals)?;

        let frequencies = groups
            .iter()
            .map(|columns| -> Result<FrequencyTable> {
                let table =
                    frequency_table(dataset, columns, &options.frequency, options.decimals)?;
                debug!(
                    grouping = %table.name(),
                    groups = table.rows.len(),
                    excluded_rows = table.excluded_rows,
                    "frequency table built"
                );
                Ok(table)
            })
            .collect::<Result<Vec<FrequencyTable>>>()?;

        let correlation = correlation_matrix(dataset);
        let charts = chart_specs(
            dataset,
            &frequencies,
            correlation.as_ref(),
            &options.charts,
            options.decimals,
        );

        info!(
            charts = charts.len(),
            frequency_tables = frequencies.len(),
            duration_ms = start.elapsed().as_millis(),
            "profile complete"
        );
        Ok(ProfileReport {
            overview,
            dictionary,
            quality,
            missingness,
            frequencies,
            correlation,
            charts,
            top_n: options.charts.top_n,
        })
    }
}
