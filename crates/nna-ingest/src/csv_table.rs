//! Delimited-file loading into a typed [`Dataset`](nna_model::Dataset).

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use nna_model::{BuiltDataset, DatasetBuilder, ProfileError};
use tracing::{debug, info, info_span, warn};

use crate::header::{clean_headers, detect_header_row, is_unnamed};
use crate::options::{HeaderMode, IngestOptions, SEPARATOR_CANDIDATES, Separator};

/// Picks the candidate separator that appears most often in the first line.
///
/// Ties go to the earlier candidate; a line with none of them reads as
/// comma-separated.
pub fn detect_separator(first_line: &str) -> u8 {
    let mut best = SEPARATOR_CANDIDATES[0];
    let mut best_count = 0usize;
    for candidate in SEPARATOR_CANDIDATES {
        let count = first_line.bytes().filter(|byte| *byte == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn resolve_separator(separator: Separator, contents: &[u8]) -> u8 {
    match separator {
        Separator::Byte(byte) => byte,
        Separator::Auto => {
            let end = contents
                .iter()
                .position(|byte| *byte == b'\n')
                .unwrap_or(contents.len());
            detect_separator(&String::from_utf8_lossy(&contents[..end]))
        }
    }
}

fn read_records(contents: &[u8], separator: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(separator)
        .from_reader(contents);
    let mut records = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {}", idx + 1))?;
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        // whitespace-only lines; `,,` is a row of missing values
        if let [only] = values.as_slice()
            && only.trim().is_empty()
        {
            continue;
        }
        records.push(values);
    }
    Ok(records)
}

/// Reads a delimited survey file into a dataset.
///
/// Kind fallbacks for declared kinds that do not fit the data are logged and
/// returned in [`BuiltDataset::fallbacks`]; with
/// [`IngestOptions::strict_kinds`] the first one is an error instead.
pub fn read_csv_dataset(path: &Path, options: &IngestOptions) -> Result<BuiltDataset> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let separator = resolve_separator(options.separator, &contents);
    let records = read_records(&contents, separator)
        .with_context(|| format!("parse {}", path.display()))?;
    let built = build_dataset(records, options)
        .with_context(|| format!("load dataset from {}", path.display()))?;

    info!(
        rows = built.dataset.row_count(),
        columns = built.dataset.column_count(),
        separator = %Separator::Byte(separator),
        kind_fallbacks = built.fallbacks.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(built)
}

/// Builds a dataset from raw records (header included).
pub fn build_dataset(records: Vec<Vec<String>>, options: &IngestOptions) -> Result<BuiltDataset> {
    if records.is_empty() {
        warn!("input has no records");
        return Ok(DatasetBuilder::new(Vec::new())?.build(options.kind_policy())?);
    }
    let header_index = match options.header {
        HeaderMode::First => 0,
        HeaderMode::Detect => detect_header_row(&records),
    };
    if header_index > 0 {
        debug!(skipped = header_index, "skipped records above the header");
    }
    let headers = clean_headers(&records[header_index]);
    let keep: Vec<usize> = if headers.iter().all(|header| is_unnamed(header)) {
        warn!(
            columns = headers.len(),
            "every column is unnamed; keeping them all"
        );
        (0..headers.len()).collect()
    } else {
        (0..headers.len())
            .filter(|idx| !is_unnamed(&headers[*idx]))
            .collect()
    };
    if keep.len() < headers.len() {
        info!(dropped = headers.len() - keep.len(), "dropped unnamed columns");
    }

    let width = headers.len();
    let mut builder = DatasetBuilder::new(keep.iter().map(|idx| headers[*idx].clone()).collect())?;
    let mut padded = 0usize;
    let mut truncated = 0usize;
    for record in records.into_iter().skip(header_index + 1) {
        if record.len() < width {
            padded += 1;
        } else if record.len() > width {
            truncated += 1;
        }
        let row = keep
            .iter()
            .map(|idx| {
                record
                    .get(*idx)
                    .map(|value| value.trim())
                    .filter(|value| !options.is_null_marker(value))
                    .map(str::to_string)
            })
            .collect();
        builder.push_row(row)?;
    }
    if padded > 0 {
        warn!(rows = padded, width, "padded short rows with missing values");
    }
    if truncated > 0 {
        warn!(rows = truncated, width, "truncated rows wider than the header");
    }

    for (column, kind) in &options.declared_kinds {
        builder.declare_kind(column.clone(), *kind)?;
    }
    let built = builder.build(options.kind_policy())?;
    for fallback in &built.fallbacks {
        match fallback {
            // the offending value is survey data; keep it out of the log
            ProfileError::MixedTypeColumn { column, .. } => {
                warn!(column = %column, "declared numeric column has text values; kept inferred kind");
            }
            other => warn!(error = %other, "declared kind does not fit; kept inferred kind"),
        }
    }
    Ok(built)
}

#[cfg(test)]
mod tests {
    use nna_model::ColumnKind;

    use super::*;

    fn records(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|value| (*value).to_string()).collect())
            .collect()
    }

    #[test]
    fn separator_detection_prefers_most_frequent() {
        assert_eq!(detect_separator("a;b;c"), b';');
        assert_eq!(detect_separator("a|b|c,d"), b'|');
        assert_eq!(detect_separator("a,b;c"), b',');
        assert_eq!(detect_separator("a\tb\tc"), b'\t');
        assert_eq!(detect_separator("single"), b',');
    }

    #[test]
    fn null_markers_become_missing() {
        let built = build_dataset(
            records(&[&["zona", "edad"], &["urbana", "NA"], &["", "12"], &["rural", " 9 "]]),
            &IngestOptions::default(),
        )
        .unwrap();
        let data = built.dataset;
        assert_eq!(data.column("zona").unwrap().null_count(), 1);
        let edad = data.column("edad").unwrap();
        assert_eq!(edad.kind(), ColumnKind::Numeric);
        assert_eq!(edad.numbers(), vec![12.0, 9.0]);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let built = build_dataset(
            records(&[&["a", "b"], &["1"], &["2", "3", "4"]]),
            &IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(built.dataset.row_count(), 2);
        assert_eq!(built.dataset.column("b").unwrap().null_count(), 1);
        assert_eq!(built.dataset.column_count(), 2);
    }

    #[test]
    fn declared_numeric_falls_back_unless_strict() {
        let rows = records(&[&["folio"], &["A1"], &["7"]]);
        let options = IngestOptions::default().with_kind("folio", ColumnKind::Numeric);
        let built = build_dataset(rows.clone(), &options).unwrap();
        assert_eq!(built.fallbacks.len(), 1);
        assert_eq!(
            built.dataset.column("folio").unwrap().kind(),
            ColumnKind::Categorical
        );

        let error = build_dataset(rows, &options.with_strict_kinds(true)).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ProfileError>(),
            Some(ProfileError::MixedTypeColumn { .. })
        ));
    }

    #[test]
    fn unknown_declared_column_is_an_error() {
        let options = IngestOptions::default().with_kind("region", ColumnKind::Categorical);
        let error = build_dataset(records(&[&["zona"], &["rural"]]), &options).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ProfileError>(),
            Some(&ProfileError::UnknownColumn {
                column: "region".to_string()
            })
        );
    }

    #[test]
    fn empty_input_gives_empty_dataset() {
        let built = build_dataset(Vec::new(), &IngestOptions::default()).unwrap();
        assert!(built.dataset.is_empty());
    }
}
