//! Grouped frequency tables and missingness.

use std::collections::{BTreeMap, HashMap};

use nna_model::{
    Cell, Column, Dataset, FrequencyOptions, FrequencyRow, FrequencyTable, ProfileError, Result,
    percentage,
};

/// Counts rows per combination of values in one or two columns.
///
/// Missing values form their own category unless
/// [`FrequencyOptions::drop_missing`] is set, in which case those rows are
/// reported in `excluded_rows`. Rows are sorted by count descending, then key
/// ascending.
pub fn frequency_table<S: AsRef<str>>(
    dataset: &Dataset,
    columns: &[S],
    options: &FrequencyOptions,
    decimals: u32,
) -> Result<FrequencyTable> {
    if columns.is_empty() || columns.len() > 2 {
        return Err(ProfileError::InvalidGrouping {
            count: columns.len(),
        });
    }
    let grouping: Vec<&Column> = columns
        .iter()
        .map(|name| {
            dataset
                .column(name.as_ref())
                .ok_or_else(|| ProfileError::UnknownGroupingColumn {
                    column: name.as_ref().to_string(),
                })
        })
        .collect::<Result<_>>()?;

    let mut counts: HashMap<Vec<&Cell>, usize> = HashMap::new();
    let mut excluded_rows = 0usize;
    for row in 0..dataset.row_count() {
        let key: Vec<&Cell> = grouping.iter().map(|column| &column.cells()[row]).collect();
        if options.drop_missing && key.iter().any(|cell| cell.is_missing()) {
            excluded_rows += 1;
            continue;
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    let counted = dataset.row_count() - excluded_rows;
    let mut rows: Vec<FrequencyRow> = counts
        .into_iter()
        .map(|(key, count)| FrequencyRow {
            key: key.into_iter().cloned().collect(),
            count,
            share_pct: percentage(count, counted, decimals),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    Ok(FrequencyTable {
        columns: grouping
            .iter()
            .map(|column| column.name().to_string())
            .collect(),
        rows,
        total_rows: dataset.row_count(),
        excluded_rows,
    })
}

/// Missing percentage per column: `nulls / rows * 100`, rounded.
///
/// Fails with [`ProfileError::EmptyDataset`] when the dataset has no columns
/// or no rows.
pub fn missingness_report(dataset: &Dataset, decimals: u32) -> Result<BTreeMap<String, f64>> {
    if dataset.is_empty() {
        return Err(ProfileError::no_columns());
    }
    if dataset.row_count() == 0 {
        return Err(ProfileError::no_rows());
    }
    Ok(dataset
        .columns()
        .iter()
        .map(|column| {
            (
                column.name().to_string(),
                percentage(column.null_count(), dataset.row_count(), decimals),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_dataset() -> Dataset {
        let zone = Column::from_raw(
            "zone",
            vec![
                Some("urban".to_string()),
                Some("rural".to_string()),
                Some("urban".to_string()),
                None,
            ],
        )
        .unwrap();
        let sex = Column::from_raw(
            "sex",
            vec![
                Some("f".to_string()),
                Some("m".to_string()),
                Some("f".to_string()),
                Some("m".to_string()),
            ],
        )
        .unwrap();
        Dataset::new(vec![zone, sex]).unwrap()
    }

    #[test]
    fn single_column_counts_missing_as_category() {
        let table =
            frequency_table(&zone_dataset(), &["zone"], &FrequencyOptions::default(), 2).unwrap();
        let pairs: Vec<(Cell, usize)> = table
            .rows
            .iter()
            .map(|row| (row.key[0].clone(), row.count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Cell::Text("urban".into()), 2),
                (Cell::Text("rural".into()), 1),
                (Cell::Missing, 1),
            ]
        );
        assert_eq!(table.counted_rows(), 4);
        assert_eq!(table.rows[0].share_pct, 50.0);
    }

    #[test]
    fn drop_missing_excludes_rows() {
        let options = FrequencyOptions { drop_missing: true };
        let table = frequency_table(&zone_dataset(), &["zone", "sex"], &options, 2).unwrap();
        assert_eq!(table.excluded_rows, 1);
        assert_eq!(table.counted_rows(), 3);
        assert_eq!(
            table.count_of(&[Cell::Text("urban".into()), Cell::Text("f".into())]),
            Some(2)
        );
        assert_eq!(table.columns, vec!["zone", "sex"]);
    }

    #[test]
    fn rejects_bad_groupings() {
        let data = zone_dataset();
        let options = FrequencyOptions::default();
        assert_eq!(
            frequency_table(&data, &["edad"], &options, 2).unwrap_err(),
            ProfileError::UnknownGroupingColumn {
                column: "edad".into()
            }
        );
        let none: [&str; 0] = [];
        assert_eq!(
            frequency_table(&data, &none, &options, 2).unwrap_err(),
            ProfileError::InvalidGrouping { count: 0 }
        );
        assert_eq!(
            frequency_table(&data, &["zone", "sex", "zone"], &options, 2).unwrap_err(),
            ProfileError::InvalidGrouping { count: 3 }
        );
    }

    #[test]
    fn missingness_is_a_percentage_of_rows() {
        let report = missingness_report(&zone_dataset(), 2).unwrap();
        assert_eq!(report.get("zone"), Some(&25.0));
        assert_eq!(report.get("sex"), Some(&0.0));
        assert!(missingness_report(&Dataset::empty(), 2).is_err());
    }
}
