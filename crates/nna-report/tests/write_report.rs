//! Integration tests for artifact writing.

use std::fs;

use nna_model::{ChartOptions, Column, Dataset, ProfileOptions};
use nna_profile::Profiler;
use nna_report::{Manifest, ReportOptions, sha256_hex, write_report};
use tempfile::TempDir;

fn test_dataset(columns: Vec<(&str, Vec<Option<&str>>)>) -> Dataset {
    let columns = columns
        .into_iter()
        .map(|(name, values)| {
            Column::from_raw(name, values.into_iter().map(|v| v.map(String::from)).collect())
                .unwrap()
        })
        .collect();
    Dataset::new(columns).unwrap()
}

fn survey() -> Dataset {
    test_dataset(vec![
        ("zona", vec![Some("urbana"), Some("rural"), Some("urbana"), None]),
        ("edad", vec![Some("9"), Some("14"), None, Some("17")]),
        ("horas", vec![Some("0"), Some("10"), Some("20"), Some("30")]),
    ])
}

#[test]
fn writes_every_artifact_with_matching_hashes() {
    let dir = TempDir::new().unwrap();
    let data = survey();
    let groups = vec![vec!["zona".to_string()]];
    let report = Profiler::default().run(&data, &groups).unwrap();
    let options = ReportOptions::default().with_input("data/raw/nna.csv");
    let written = write_report(&report, &data, dir.path(), &options).unwrap();

    let relative: Vec<&str> = written
        .manifest
        .artifacts
        .iter()
        .map(|entry| entry.path.as_str())
        .collect();
    assert_eq!(
        relative,
        vec![
            "data_dictionary.csv",
            "quality_flags.json",
            "missingness.csv",
            "numeric_summary.csv",
            "value_counts/zona_top20.csv",
            "frequency/zona.csv",
            "charts.json",
            "correlation.csv",
            "sample_head.csv",
        ]
    );
    for entry in &written.manifest.artifacts {
        let bytes = fs::read(dir.path().join(&entry.path)).unwrap();
        assert_eq!(entry.sha256, sha256_hex(&bytes), "{}", entry.path);
        assert_eq!(entry.bytes, bytes.len() as u64);
    }

    let manifest = Manifest::load(&written.manifest_path).unwrap();
    assert_eq!(manifest, written.manifest);
    assert_eq!(manifest.input.as_deref(), Some("data/raw/nna.csv"));
    assert_eq!(manifest.rows, 4);
}

#[test]
fn dictionary_csv_layout() {
    let dir = TempDir::new().unwrap();
    let data = survey();
    let report = Profiler::default().run(&data, &[]).unwrap();
    write_report(&report, &data, dir.path(), &ReportOptions::default()).unwrap();

    let dictionary = fs::read_to_string(dir.path().join("data_dictionary.csv")).unwrap();
    insta::assert_snapshot!(dictionary.trim_end(), @r"
    column,kind,non_null,distinct,missing,missing_pct,sample,min,max,mean
    zona,categorical,3,2,1,25,urbana | rural | urbana,,,
    edad,numeric,3,3,1,25,9 | 14 | 17,9,17,13.333333333333334
    horas,numeric,4,4,0,0,0 | 10 | 20,0,30,15
    ");

    let counts = fs::read_to_string(dir.path().join("value_counts/zona_top20.csv")).unwrap();
    insta::assert_snapshot!(counts.trim_end(), @r"
    zona,count,share_pct
    urbana,2,50
    rural,1,25
    (missing),1,25
    ");
}

#[test]
fn quality_flags_json_lists_flagged_columns() {
    let dir = TempDir::new().unwrap();
    let data = test_dataset(vec![
        ("folio", vec![Some("A1"), Some("A2"), Some("A3")]),
        ("pais", vec![Some("CO"), Some("CO"), Some("CO")]),
        ("nota", vec![None, None, Some("x")]),
    ]);
    let report = Profiler::default().run(&data, &[]).unwrap();
    write_report(&report, &data, dir.path(), &ReportOptions::default()).unwrap();

    let text = fs::read_to_string(dir.path().join("quality_flags.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["duplicate_rows"], 0);
    assert_eq!(json["constant_columns"], serde_json::json!(["pais", "nota"]));
    assert_eq!(json["high_missing_columns"], serde_json::json!(["nota"]));
    assert_eq!(json["unique_id_candidates"], serde_json::json!(["folio"]));
    assert_eq!(json["details"].as_array().unwrap().len(), 3);
    assert!(!dir.path().join("numeric_summary.csv").exists());
    assert!(!dir.path().join("correlation.csv").exists());
}

#[test]
fn rewriting_into_same_directory_succeeds() {
    let dir = TempDir::new().unwrap();
    let data = survey();
    let report = Profiler::default().run(&data, &[]).unwrap();
    let options = ReportOptions {
        sample_rows: 2,
        ..ReportOptions::default()
    };
    write_report(&report, &data, dir.path(), &options).unwrap();
    write_report(&report, &data, dir.path(), &options).unwrap();

    let sample = fs::read_to_string(dir.path().join("sample_head.csv")).unwrap();
    assert_eq!(sample, "zona,edad,horas\nurbana,9,0\nrural,14,10\n");
}

#[test]
fn colliding_file_names_get_distinct_artifacts() {
    let dir = TempDir::new().unwrap();
    let data = test_dataset(vec![
        ("p1?", vec![Some("si"), Some("no")]),
        ("p1!", vec![Some("urbana"), Some("rural")]),
    ]);
    let groups = vec![
        vec!["p1?".to_string()],
        vec!["p1!".to_string()],
        vec!["p1?".to_string()],
    ];
    let report = Profiler::default().run(&data, &groups).unwrap();
    let written = write_report(&report, &data, dir.path(), &ReportOptions::default()).unwrap();

    let paths: Vec<&str> = written
        .manifest
        .artifacts
        .iter()
        .map(|entry| entry.path.as_str())
        .collect();
    let unique: std::collections::BTreeSet<&str> = paths.iter().copied().collect();
    assert_eq!(unique.len(), paths.len(), "{paths:?}");
    assert!(paths.contains(&"value_counts/p1__top20.csv"));
    assert!(paths.contains(&"value_counts/p1__1_top20.csv"));
    assert!(paths.contains(&"frequency/p1__2.csv"));

    let first = fs::read_to_string(dir.path().join("value_counts/p1__top20.csv")).unwrap();
    let second = fs::read_to_string(dir.path().join("value_counts/p1__1_top20.csv")).unwrap();
    assert!(first.starts_with("p1?,"), "{first}");
    assert!(second.starts_with("p1!,"), "{second}");
    assert!(second.contains("urbana"));
}

#[test]
fn value_count_file_names_follow_profile_top_n() {
    let dir = TempDir::new().unwrap();
    let data = survey();
    let options = ProfileOptions::default().with_charts(ChartOptions {
        top_n: 1,
        ..ChartOptions::default()
    });
    let report = Profiler::new(options).run(&data, &[]).unwrap();
    write_report(&report, &data, dir.path(), &ReportOptions::default()).unwrap();

    let text = fs::read_to_string(dir.path().join("value_counts/zona_top1.csv")).unwrap();
    assert_eq!(text.lines().count(), 2, "{text}");
    assert!(!dir.path().join("value_counts/zona_top20.csv").exists());
}
