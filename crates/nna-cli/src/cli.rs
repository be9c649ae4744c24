//! CLI argument definitions for the NNA profiler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nna_cli::pipeline::{Grouping, KindDeclaration};
use nna_ingest::{HeaderMode, Separator};

#[derive(Parser)]
#[command(
    name = "nna-profiler",
    version,
    about = "Descriptive profiling for NNA survey files",
    long_about = "Profile a delimited NNA survey export.\n\n\
                  Writes a data dictionary, quality flags, missingness and frequency\n\
                  tables, chart specifications and a checksummed manifest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow survey values (column samples) in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile a survey file and write every report artifact.
    Profile(ProfileArgs),

    /// Print the overview, data dictionary and quality flags without writing files.
    Describe(InputArgs),
}

/// Input and loading options shared by every command.
#[derive(Args)]
pub struct InputArgs {
    /// Delimited survey file (CSV, semicolon, tab or pipe separated).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML config file with thresholds, chart limits, kinds and groupings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field separator: auto, tab, or a single character.
    #[arg(long = "sep", value_name = "SEP")]
    pub separator: Option<Separator>,

    /// How to find the header row.
    #[arg(long = "header", value_name = "MODE")]
    pub header: Option<HeaderMode>,

    /// Declare a column kind, e.g. `folio=identifier` (repeatable).
    #[arg(long = "kind", value_name = "COLUMN=KIND")]
    pub kinds: Vec<KindDeclaration>,

    /// Fail when a declared kind does not fit the data instead of keeping
    /// the inferred kind.
    #[arg(long = "strict-kinds")]
    pub strict_kinds: bool,

    /// Dominant-value share at or above which a column is near-constant.
    #[arg(long = "near-constant", value_name = "RATIO")]
    pub near_constant: Option<f64>,

    /// Distinct/row ratio at or above which a non-numeric column is
    /// high-cardinality.
    #[arg(long = "high-cardinality", value_name = "RATIO")]
    pub high_cardinality: Option<f64>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for report artifacts.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "reports")]
    pub output_dir: PathBuf,

    /// Frequency table over one or two columns, e.g. `zona` or `zona,sexo`
    /// (repeatable).
    #[arg(long = "group", value_name = "COLUMNS")]
    pub groups: Vec<Grouping>,

    /// Leave rows with a missing grouping value out of frequency tables.
    #[arg(long = "drop-missing")]
    pub drop_missing: bool,

    /// Maximum number of histograms.
    #[arg(long = "max-hist", value_name = "N")]
    pub max_histograms: Option<usize>,

    /// Maximum number of boxplots.
    #[arg(long = "max-box", value_name = "N")]
    pub max_boxplots: Option<usize>,

    /// Values kept per top-N table and chart.
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Profile and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
