//! End-to-end tests for a full profiling pass.

use nna_model::{
    Cell, ChartSpec, Column, ColumnKind, Dataset, ProfileError, ProfileOptions, QualityThresholds,
};
use nna_profile::{Profiler, build_data_dictionary, frequency_table, missingness_report};

fn test_dataset(columns: Vec<(&str, Vec<Option<&str>>)>) -> Dataset {
    let columns = columns
        .into_iter()
        .map(|(name, values)| {
            Column::from_raw(
                name,
                values.into_iter().map(|value| value.map(String::from)).collect(),
            )
            .expect("column")
        })
        .collect();
    Dataset::new(columns).expect("dataset")
}

fn survey() -> Dataset {
    test_dataset(vec![
        (
            "folio",
            vec![Some("A1"), Some("A2"), Some("A3"), Some("A4"), Some("A5"), Some("A6")],
        ),
        (
            "zona",
            vec![
                Some("urbana"),
                Some("rural"),
                Some("urbana"),
                None,
                Some("rural"),
                Some("urbana"),
            ],
        ),
        (
            "sexo",
            vec![Some("F"), Some("M"), Some("F"), Some("M"), Some("F"), Some("F")],
        ),
        (
            "edad",
            vec![Some("8"), Some("12"), Some("15"), Some("17"), None, Some("10")],
        ),
        (
            "horas_trabajo",
            vec![Some("0"), Some("10"), Some("20"), Some("30"), Some("5"), Some("0")],
        ),
        (
            "pais",
            vec![Some("CO"), Some("CO"), Some("CO"), Some("CO"), Some("CO"), Some("CO")],
        ),
    ])
}

#[test]
fn zone_example_matches_reference_values() {
    let data = test_dataset(vec![(
        "zone",
        vec![Some("urban"), Some("rural"), Some("urban"), None],
    )]);
    let missing = missingness_report(&data, 2).expect("missingness");
    assert_eq!(missing.get("zone"), Some(&25.0));

    let table = frequency_table(&data, &["zone"], &Default::default(), 2).expect("frequency");
    let pairs: Vec<(String, usize)> = table
        .rows
        .iter()
        .map(|row| (row.key[0].label(), row.count))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("urban".to_string(), 2),
            ("rural".to_string(), 1),
            ("(missing)".to_string(), 1),
        ]
    );
}

#[test]
fn empty_dataset_fails_dictionary() {
    let error = build_data_dictionary(&Dataset::empty(), &ProfileOptions::default()).unwrap_err();
    assert!(matches!(error, ProfileError::EmptyDataset { .. }));
    let error = Profiler::default().run(&Dataset::empty(), &[]).unwrap_err();
    assert!(matches!(error, ProfileError::EmptyDataset { .. }));
}

#[test]
fn full_run_produces_every_section() {
    let groups = vec![
        vec!["zona".to_string()],
        vec!["zona".to_string(), "sexo".to_string()],
    ];
    let report = Profiler::default().run(&survey(), &groups).expect("profile");

    assert_eq!(report.overview.rows, 6);
    assert_eq!(report.overview.columns, 6);
    assert_eq!(report.overview.missing_cells, 2);
    assert_eq!(report.overview.kind_counts.get(&ColumnKind::Numeric), Some(&2));

    assert_eq!(report.dictionary.len(), 6);
    assert_eq!(report.quality.unique_id_candidates(), vec!["folio"]);
    assert_eq!(report.quality.constant_columns(), vec!["pais"]);
    assert!(report.quality.near_constant_columns().contains(&"pais"));
    assert_eq!(report.quality.duplicate_rows, 0);

    assert_eq!(report.frequencies.len(), 2);
    assert_eq!(
        report.frequencies[1].count_of(&[Cell::Text("urbana".into()), Cell::Text("F".into())]),
        Some(3)
    );

    let correlation = report.correlation.as_ref().expect("correlation");
    assert_eq!(correlation.columns, vec!["edad", "horas_trabajo"]);

    let kinds: Vec<&str> = report.charts.iter().map(ChartSpec::kind).collect();
    assert_eq!(kinds.first(), Some(&"missingness_bar"));
    assert_eq!(kinds.iter().filter(|kind| **kind == "histogram").count(), 2);
    assert_eq!(kinds.iter().filter(|kind| **kind == "boxplot").count(), 2);
    // folio, zona, sexo, pais are categorical
    assert_eq!(kinds.iter().filter(|kind| **kind == "top_categories").count(), 4);
    assert_eq!(kinds.iter().filter(|kind| **kind == "cross_tab_heatmap").count(), 1);
    assert_eq!(kinds.last(), Some(&"correlation_heatmap"));
}

#[test]
fn thresholds_come_from_options() {
    let options = ProfileOptions::default().with_thresholds(
        QualityThresholds::default()
            .with_near_constant(0.6)
            .with_high_cardinality(0.9),
    );
    let report = Profiler::new(options).run(&survey(), &[]).expect("profile");
    let sexo = report.quality.column("sexo").expect("sexo flags");
    // 4 of 6 are F
    assert!(sexo.near_constant);
    assert!(!report.quality.column("zona").expect("zona").high_cardinality);
    assert!(report.quality.column("folio").expect("folio").high_cardinality);
}

#[test]
fn invalid_grouping_aborts_run() {
    let groups = vec![vec!["region".to_string()]];
    let error = Profiler::default().run(&survey(), &groups).unwrap_err();
    assert_eq!(
        error,
        ProfileError::UnknownGroupingColumn {
            column: "region".to_string()
        }
    );
}

#[test]
fn repeated_runs_are_identical() {
    let data = survey();
    let groups = vec![vec!["sexo".to_string(), "zona".to_string()]];
    let profiler = Profiler::default();
    let first = profiler.run(&data, &groups).expect("first run");
    let second = profiler.run(&data, &groups).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn frequency_rows_render_in_count_order() {
    let data = test_dataset(vec![(
        "zone",
        vec![Some("urban"), Some("rural"), Some("urban"), None],
    )]);
    let table = frequency_table(&data, &["zone"], &Default::default(), 2).expect("frequency");
    let rendered = table
        .rows
        .iter()
        .map(|row| format!("{} {} {}", row.key[0].label(), row.count, row.share_pct))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    urban 2 50
    rural 1 25
    (missing) 1 25
    ");
}
