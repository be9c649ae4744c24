//! Column quality flags and duplicate-row detection.

use std::collections::HashSet;

use nna_model::{
    Cell, Column, ColumnFlags, Dataset, ProfileError, QualityFlags, QualityThresholds, Result,
    percentage,
};

/// Computes the quality flags of every column plus the duplicate-row count.
///
/// Fails with [`ProfileError::EmptyDataset`] when the dataset has no columns
/// or no rows.
pub fn compute_quality_flags(
    dataset: &Dataset,
    thresholds: &QualityThresholds,
    decimals: u32,
) -> Result<QualityFlags> {
    if dataset.is_empty() {
        return Err(ProfileError::no_columns());
    }
    if dataset.row_count() == 0 {
        return Err(ProfileError::no_rows());
    }
    let columns = dataset
        .columns()
        .iter()
        .map(|column| column_flags(column, thresholds, decimals))
        .collect();
    Ok(QualityFlags {
        row_count: dataset.row_count(),
        duplicate_rows: duplicate_rows(dataset),
        columns,
    })
}

fn column_flags(column: &Column, thresholds: &QualityThresholds, decimals: u32) -> ColumnFlags {
    let rows = column.len();
    let null_count = column.null_count();
    let present = rows - null_count;
    let distinct_count = column.distinct_values().len();
    let dominant = column
        .value_counts()
        .into_iter()
        .filter(|(cell, _)| !cell.is_missing())
        .map(|(_, count)| count)
        .max()
        .unwrap_or(0);
    let dominant_share = ratio(dominant, present);
    let distinct_ratio = ratio(distinct_count, rows);
    let missing_pct = percentage(null_count, rows, decimals);
    ColumnFlags {
        name: column.name().to_string(),
        kind: column.kind(),
        null_count,
        distinct_count,
        dominant_share,
        distinct_ratio,
        missing_pct,
        near_constant: present > 0 && dominant_share >= thresholds.near_constant,
        high_cardinality: !column.kind().is_numeric()
            && distinct_ratio >= thresholds.high_cardinality,
        unique_id_candidate: rows > 0 && null_count == 0 && distinct_count == rows,
        constant: distinct_count <= 1,
        high_missing: missing_pct > thresholds.high_missing_pct,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Rows whose full value tuple already appeared in an earlier row.
pub fn duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen: HashSet<Vec<&Cell>> = HashSet::with_capacity(dataset.row_count());
    dataset.rows().filter(|row| !seen.insert(row.clone())).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: Vec<(&str, Vec<Option<&str>>)>) -> Dataset {
        Dataset::new(
            columns
                .into_iter()
                .map(|(name, values)| {
                    Column::from_raw(name, values.into_iter().map(|v| v.map(String::from)).collect())
                        .unwrap()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn near_constant_depends_on_threshold() {
        let data = dataset(vec![(
            "horas",
            vec![Some("1"), Some("1"), Some("1"), Some("1"), Some("5")],
        )]);
        let strict = compute_quality_flags(&data, &QualityThresholds::default(), 2).unwrap();
        let flags = strict.column("horas").unwrap();
        assert!((flags.dominant_share - 0.8).abs() < 1e-12);
        assert!(!flags.near_constant);

        let loose = QualityThresholds::default().with_near_constant(0.75);
        let relaxed = compute_quality_flags(&data, &loose, 2).unwrap();
        assert!(relaxed.column("horas").unwrap().near_constant);
    }

    #[test]
    fn unique_id_candidate_requires_no_nulls() {
        let data = dataset(vec![
            ("folio", vec![Some("a1"), Some("a2"), Some("a3")]),
            ("codigo", vec![Some("b1"), Some("b2"), None]),
        ]);
        let flags = compute_quality_flags(&data, &QualityThresholds::default(), 2).unwrap();
        assert_eq!(flags.unique_id_candidates(), vec!["folio"]);
        assert!(flags.column("folio").unwrap().high_cardinality);
        assert!(flags.column("codigo").unwrap().high_cardinality);
        assert!(flags.column("codigo").unwrap().high_missing);
    }

    #[test]
    fn numeric_columns_are_not_high_cardinality() {
        let data = dataset(vec![("ingreso", vec![Some("100"), Some("250"), Some("310")])]);
        let flags = compute_quality_flags(&data, &QualityThresholds::default(), 2).unwrap();
        let ingreso = flags.column("ingreso").unwrap();
        assert!(!ingreso.high_cardinality);
        assert!(ingreso.unique_id_candidate);
    }

    #[test]
    fn counts_repeated_rows_after_first() {
        let data = dataset(vec![
            ("zona", vec![Some("u"), Some("u"), Some("r"), Some("u"), None]),
            ("sexo", vec![Some("f"), Some("f"), Some("m"), Some("f"), None]),
        ]);
        let flags = compute_quality_flags(&data, &QualityThresholds::default(), 2).unwrap();
        assert_eq!(flags.duplicate_rows, 2);
    }

    #[test]
    fn all_missing_column_is_constant_not_near_constant() {
        let data = dataset(vec![("obs", vec![None, None])]);
        let flags = compute_quality_flags(&data, &QualityThresholds::default(), 2).unwrap();
        let obs = flags.column("obs").unwrap();
        assert!(obs.constant);
        assert!(!obs.near_constant);
        assert_eq!(obs.missing_pct, 100.0);
    }

    #[test]
    fn rejects_empty_inputs() {
        let no_columns = compute_quality_flags(&Dataset::empty(), &QualityThresholds::default(), 2);
        assert_eq!(no_columns.unwrap_err(), ProfileError::no_columns());
        let no_rows = dataset(vec![("zona", vec![])]);
        let error = compute_quality_flags(&no_rows, &QualityThresholds::default(), 2).unwrap_err();
        assert_eq!(error, ProfileError::no_rows());
    }
}
