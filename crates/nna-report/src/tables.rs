//! CSV artifacts.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use nna_model::{
    ColumnProfile, CorrelationMatrix, Dataset, FrequencyTable, NumericSummary, format_number,
};

use crate::common::format_optional;

/// Separator between sample values in the dictionary.
pub const SAMPLE_SEPARATOR: &str = " | ";

fn create_writer(path: &Path) -> Result<Writer<std::fs::File>> {
    Writer::from_path(path).with_context(|| format!("create {}", path.display()))
}

fn finish(mut writer: Writer<std::fs::File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))
}

/// One row per column: counts, missing share, samples and numeric range.
pub fn write_data_dictionary(path: &Path, dictionary: &[ColumnProfile]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record([
        "column",
        "kind",
        "non_null",
        "distinct",
        "missing",
        "missing_pct",
        "sample",
        "min",
        "max",
        "mean",
    ])?;
    for entry in dictionary {
        let numeric = entry.numeric.as_ref();
        writer.write_record([
            entry.name.clone(),
            entry.kind.to_string(),
            entry.non_null.to_string(),
            entry.distinct_count.to_string(),
            entry.null_count.to_string(),
            format_number(entry.missing_pct),
            entry.samples.join(SAMPLE_SEPARATOR),
            format_optional(numeric.map(|summary| summary.min)),
            format_optional(numeric.map(|summary| summary.max)),
            format_optional(numeric.map(|summary| summary.mean)),
        ])?;
    }
    finish(writer, path)
}

pub fn write_missingness(path: &Path, dictionary: &[ColumnProfile]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record(["column", "missing", "missing_pct"])?;
    for entry in dictionary {
        writer.write_record([
            entry.name.clone(),
            entry.null_count.to_string(),
            format_number(entry.missing_pct),
        ])?;
    }
    finish(writer, path)
}

/// Statistics as rows and numeric columns as columns.
///
/// Returns `false` without writing when there are no numeric columns.
pub fn write_numeric_summary(path: &Path, dictionary: &[ColumnProfile]) -> Result<bool> {
    let summaries: Vec<(&str, &NumericSummary)> = dictionary
        .iter()
        .filter_map(|entry| Some((entry.name.as_str(), entry.numeric.as_ref()?)))
        .collect();
    if summaries.is_empty() {
        return Ok(false);
    }
    type Stat = fn(&NumericSummary) -> Option<f64>;
    let stats: [(&str, Stat); 8] = [
        ("count", |s| Some(s.count as f64)),
        ("mean", |s| Some(s.mean)),
        ("std", |s| s.std),
        ("min", |s| Some(s.min)),
        ("25%", |s| Some(s.q25)),
        ("50%", |s| Some(s.median)),
        ("75%", |s| Some(s.q75)),
        ("max", |s| Some(s.max)),
    ];
    let mut writer = create_writer(path)?;
    let mut header = vec![String::new()];
    header.extend(summaries.iter().map(|(name, _)| (*name).to_string()));
    writer.write_record(&header)?;
    for (label, stat) in stats {
        let mut record = vec![label.to_string()];
        record.extend(summaries.iter().map(|(_, summary)| format_optional(stat(summary))));
        writer.write_record(&record)?;
    }
    finish(writer, path)?;
    Ok(true)
}

/// Most frequent values of one column, missing included.
pub fn write_value_counts(path: &Path, entry: &ColumnProfile) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record([entry.name.as_str(), "count", "share_pct"])?;
    for value in &entry.top_values {
        writer.write_record([
            value.value.label(),
            value.count.to_string(),
            format_number(value.share_pct),
        ])?;
    }
    finish(writer, path)
}

pub fn write_frequency_table(path: &Path, table: &FrequencyTable) -> Result<()> {
    let mut writer = create_writer(path)?;
    let mut header = table.columns.clone();
    header.extend(["count".to_string(), "share_pct".to_string()]);
    writer.write_record(&header)?;
    for row in &table.rows {
        let mut record: Vec<String> = row.key.iter().map(|cell| cell.label()).collect();
        record.push(row.count.to_string());
        record.push(format_number(row.share_pct));
        writer.write_record(&record)?;
    }
    finish(writer, path)
}

/// Square matrix; undefined coefficients are left blank.
pub fn write_correlation(path: &Path, matrix: &CorrelationMatrix) -> Result<()> {
    let mut writer = create_writer(path)?;
    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().cloned());
    writer.write_record(&header)?;
    for (name, values) in matrix.columns.iter().zip(&matrix.values) {
        let mut record = vec![name.clone()];
        record.extend(values.iter().map(|value| format_optional(*value)));
        writer.write_record(&record)?;
    }
    finish(writer, path)
}

/// Raw rows with blank cells for missing values.
pub fn write_sample(path: &Path, sample: &Dataset) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record(sample.column_names())?;
    for row in sample.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    finish(writer, path)
}
