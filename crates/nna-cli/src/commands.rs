use std::time::Instant;

use anyhow::Result;
use nna_cli::config::ProfilerConfig;
use nna_cli::pipeline::{Overrides, ProfileOutcome, RunSettings, profile_file, run_profile};
use tracing::{debug, info, info_span};

use crate::cli::{InputArgs, ProfileArgs};

fn load_config(args: &InputArgs) -> Result<ProfilerConfig> {
    match &args.config {
        Some(path) => {
            let config = ProfilerConfig::load(path)?;
            debug!(path = %path.display(), "config loaded");
            Ok(config)
        }
        None => Ok(ProfilerConfig::default()),
    }
}

fn input_overrides(args: &InputArgs) -> Overrides {
    Overrides {
        separator: args.separator,
        header: args.header,
        kinds: args.kinds.clone(),
        near_constant: args.near_constant,
        high_cardinality: args.high_cardinality,
        strict_kinds: args.strict_kinds,
        ..Overrides::default()
    }
}

pub fn run_profile_command(args: &ProfileArgs) -> Result<ProfileOutcome> {
    let config = load_config(&args.input)?;
    let overrides = Overrides {
        groups: args.groups.iter().map(|group| group.0.clone()).collect(),
        max_histograms: args.max_histograms,
        max_boxplots: args.max_boxplots,
        top_n: args.top_n,
        drop_missing: args.drop_missing,
        ..input_overrides(&args.input)
    };
    let settings = RunSettings::resolve(&config, &overrides)?;
    run_profile(&args.input.input, &args.output_dir, &settings, args.dry_run)
}

pub fn run_describe_command(args: &InputArgs) -> Result<ProfileOutcome> {
    let span = info_span!("describe", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let config = load_config(args)?;
    let mut settings = RunSettings::resolve(&config, &input_overrides(args))?;
    settings.groups.clear();
    let outcome = profile_file(&args.input, &settings)?;
    info!(duration_ms = start.elapsed().as_millis(), "describe complete");
    Ok(outcome)
}
