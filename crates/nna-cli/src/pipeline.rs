//! Ingest, profile and export stages shared by the CLI commands.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use nna_ingest::{HeaderMode, IngestOptions, Separator, read_csv_dataset};
use nna_model::{
    ChartOptions, ColumnKind, Dataset, ProfileOptions, ProfileReport, QualityThresholds,
};
use nna_profile::Profiler;
use nna_report::{ReportOptions, WrittenReport, write_report};
use tracing::{debug, info, info_span, trace};

use crate::config::{ConfigError, ProfilerConfig};
use crate::logging::redact_value;

/// Flag values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub separator: Option<Separator>,
    pub header: Option<HeaderMode>,
    pub groups: Vec<Vec<String>>,
    pub kinds: Vec<KindDeclaration>,
    pub near_constant: Option<f64>,
    pub high_cardinality: Option<f64>,
    pub max_histograms: Option<usize>,
    pub max_boxplots: Option<usize>,
    pub top_n: Option<usize>,
    pub strict_kinds: bool,
    pub drop_missing: bool,
}

/// Fully resolved options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub ingest: IngestOptions,
    pub profile: ProfileOptions,
    pub groups: Vec<Vec<String>>,
}

impl RunSettings {
    /// Applies built-in defaults, then `config`, then `overrides`.
    pub fn resolve(config: &ProfilerConfig, overrides: &Overrides) -> Result<Self, ConfigError> {
        let defaults = QualityThresholds::default();
        let thresholds = QualityThresholds {
            near_constant: overrides
                .near_constant
                .or(config.thresholds.near_constant)
                .unwrap_or(defaults.near_constant),
            high_cardinality: overrides
                .high_cardinality
                .or(config.thresholds.high_cardinality)
                .unwrap_or(defaults.high_cardinality),
            high_missing_pct: config
                .thresholds
                .high_missing_pct
                .unwrap_or(defaults.high_missing_pct),
        };
        check_ratio("near_constant", thresholds.near_constant)?;
        check_ratio("high_cardinality", thresholds.high_cardinality)?;
        if !(0.0..=100.0).contains(&thresholds.high_missing_pct) {
            return Err(ConfigError::Invalid {
                field: "high_missing_pct",
                message: format!("{} is not a percentage", thresholds.high_missing_pct),
            });
        }

        let chart_defaults = ChartOptions::default();
        let charts = ChartOptions {
            max_histograms: overrides
                .max_histograms
                .or(config.charts.max_histograms)
                .unwrap_or(chart_defaults.max_histograms),
            max_boxplots: overrides
                .max_boxplots
                .or(config.charts.max_boxplots)
                .unwrap_or(chart_defaults.max_boxplots),
            histogram_bins: config
                .charts
                .histogram_bins
                .unwrap_or(chart_defaults.histogram_bins),
            top_n: overrides
                .top_n
                .or(config.charts.top_n)
                .unwrap_or(chart_defaults.top_n),
        };
        if charts.histogram_bins == 0 {
            return Err(ConfigError::Invalid {
                field: "histogram_bins",
                message: "must be at least 1".to_string(),
            });
        }

        let mut profile = ProfileOptions::default()
            .with_thresholds(thresholds)
            .with_charts(charts);
        if let Some(decimals) = config.thresholds.decimals {
            profile = profile.with_decimals(decimals);
        }
        profile.frequency.drop_missing = overrides.drop_missing;

        let separator = match (overrides.separator, &config.ingest.separator) {
            (Some(separator), _) => separator,
            (None, Some(value)) => {
                value
                    .parse::<Separator>()
                    .map_err(|message| ConfigError::Invalid {
                        field: "separator",
                        message,
                    })?
            }
            (None, None) => Separator::Auto,
        };
        let mut declared_kinds = config.kinds.clone();
        declared_kinds.extend(
            overrides
                .kinds
                .iter()
                .map(|declaration| (declaration.column.clone(), declaration.kind)),
        );
        let ingest = IngestOptions {
            separator,
            header: overrides
                .header
                .or(config.ingest.header)
                .unwrap_or_default(),
            null_markers: config
                .ingest
                .null_markers
                .clone()
                .unwrap_or_else(|| IngestOptions::default().null_markers),
            declared_kinds,
            strict_kinds: overrides.strict_kinds || config.ingest.strict_kinds.unwrap_or(false),
        };

        let groups = if overrides.groups.is_empty() {
            config
                .groups
                .iter()
                .map(|group| group.columns.clone())
                .collect()
        } else {
            overrides.groups.clone()
        };

        Ok(Self {
            ingest,
            profile,
            groups,
        })
    }
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("{value} is outside [0, 1]"),
        })
    }
}

/// One `--group` value: `zona` or `zona,sexo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping(pub Vec<String>);

impl FromStr for Grouping {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let columns: Vec<String> = value
            .split(',')
            .map(|column| column.trim().to_string())
            .filter(|column| !column.is_empty())
            .collect();
        match columns.len() {
            1 | 2 => Ok(Self(columns)),
            count => Err(format!(
                "a grouping needs one or two columns, got {count} in '{value}'"
            )),
        }
    }
}

/// One `--kind` value: `column=kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDeclaration {
    pub column: String,
    pub kind: ColumnKind,
}

impl FromStr for KindDeclaration {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (column, kind) = value
            .split_once('=')
            .ok_or_else(|| format!("expected COLUMN=KIND, got '{value}'"))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column name in '{value}'"));
        }
        Ok(Self {
            column: column.to_string(),
            kind: kind.parse()?,
        })
    }
}

#[derive(Debug)]
pub struct ProfileOutcome {
    pub input: PathBuf,
    pub dataset: Dataset,
    pub report: ProfileReport,
    /// Declared kinds that were replaced by the inferred kind.
    pub kind_fallbacks: Vec<String>,
    /// `None` for dry runs.
    pub written: Option<WrittenReport>,
}

/// Loads and profiles `input` without writing anything.
pub fn profile_file(input: &Path, settings: &RunSettings) -> Result<ProfileOutcome> {
    let built = read_csv_dataset(input, &settings.ingest)?;
    let report = Profiler::new(settings.profile)
        .run(&built.dataset, &settings.groups)
        .with_context(|| format!("profile {}", input.display()))?;
    for entry in &report.dictionary {
        trace!(
            column = %entry.name,
            samples = redact_value(&entry.samples.join(" | ")),
            "column samples"
        );
    }
    Ok(ProfileOutcome {
        input: input.to_path_buf(),
        kind_fallbacks: built.fallbacks.iter().map(ToString::to_string).collect(),
        dataset: built.dataset,
        report,
        written: None,
    })
}

/// Full run: ingest, profile and (unless `dry_run`) write every artifact.
pub fn run_profile(
    input: &Path,
    output_dir: &Path,
    settings: &RunSettings,
    dry_run: bool,
) -> Result<ProfileOutcome> {
    let span = info_span!("run", input = %input.display(), dry_run);
    let _guard = span.enter();
    let start = Instant::now();

    let mut outcome = profile_file(input, settings)?;
    if dry_run {
        debug!("dry run; no artifacts written");
    } else {
        let options = ReportOptions {
            input: Some(input.to_path_buf()),
            ..ReportOptions::default()
        };
        let written = write_report(&outcome.report, &outcome.dataset, output_dir, &options)
            .with_context(|| format!("write report to {}", output_dir.display()))?;
        outcome.written = Some(written);
    }
    info!(duration_ms = start.elapsed().as_millis(), "run complete");
    Ok(outcome)
}
