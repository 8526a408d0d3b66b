//! Profiling and comparison of CSV datasets before and after preprocessing.
//!
//! Two snapshots are fetched (concurrently), parsed into [`dataset::Dataset`]s,
//! profiled column by column, and summarised into a
//! [`report::ComparisonReport`] for display.

pub mod cli;
pub mod compare;
pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod inference;
pub mod io_utils;
pub mod render;
pub mod report;
pub mod source;
pub mod stats;
pub mod table;

use std::{env, fs, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};
use serde::Serialize;

use crate::{
    cli::{Cli, Commands, CommonArgs, OutputFormat},
    config::ProfileOptions,
    dataset::Dataset,
    error::ProfileError,
    report::{ComparisonReport, DatasetProfile},
    source::Source,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_profiler", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compare(args) => handle_compare(&args),
        Commands::Profile(args) => handle_profile(&args),
    }
}

/// Fetches, parses and compares two snapshots in one pass.
///
/// Either fetch failing aborts the whole pass.
pub fn compare_sources(
    before: &Source,
    after: &Source,
    options: &ProfileOptions,
) -> Result<ComparisonReport, ProfileError> {
    let (before_bytes, after_bytes) = source::fetch_pair(before, after)?;
    let before_data = load_dataset(before, &before_bytes, options)?;
    let after_data = load_dataset(after, &after_bytes, options)?;
    Ok(report::compare_datasets(&before_data, &after_data, options))
}

pub fn profile_source(
    input: &Source,
    options: &ProfileOptions,
) -> Result<DatasetProfile, ProfileError> {
    let bytes = input.fetch()?;
    let dataset = load_dataset(input, &bytes, options)?;
    Ok(report::profile_dataset(&dataset, options))
}

fn load_dataset(
    source: &Source,
    bytes: &[u8],
    options: &ProfileOptions,
) -> Result<Dataset, ProfileError> {
    let name = source.name();
    if options.is_large(bytes.len()) {
        warn!(
            "'{name}' is {} byte(s), above the {} byte large-input threshold; profiling in full",
            bytes.len(),
            options.large_input_bytes
        );
    }
    let delimiter = options.delimiter_for(&name);
    let encoding = options.resolve_encoding()?;
    debug!(
        "Parsing '{name}' with delimiter '{}' and encoding {}",
        io_utils::printable_delimiter(delimiter),
        encoding.name()
    );
    Dataset::from_bytes(&name, bytes, delimiter, encoding)
}

fn handle_compare(args: &cli::CompareArgs) -> Result<()> {
    let options = resolve_options(&args.common)?;
    let before = Source::parse(&args.before);
    let after = Source::parse(&args.after);
    info!("Comparing '{before}' with '{after}'");
    let report = compare_sources(&before, &after, &options)
        .with_context(|| format!("Comparing '{before}' with '{after}'"))?;
    info!(
        "Compared {} column(s): {} null(s) filled, {} duplicate row(s) in the original",
        report.columns.len(),
        report.summary.nulls_filled,
        report.summary.duplicates_removed
    );
    emit(&args.common, &report, || render::render_comparison(&report))
}

fn handle_profile(args: &cli::ProfileArgs) -> Result<()> {
    let options = resolve_options(&args.common)?;
    let input = Source::parse(&args.input);
    info!("Profiling '{input}'");
    let profile =
        profile_source(&input, &options).with_context(|| format!("Profiling '{input}'"))?;
    info!(
        "Profiled {} column(s) across {} row(s)",
        profile.columns.len(),
        profile.row_count
    );
    emit(&args.common, &profile, || render::render_profile(&profile))
}

fn resolve_options(common: &CommonArgs) -> Result<ProfileOptions> {
    let mut options = match &common.config {
        Some(path) => ProfileOptions::load(path)
            .with_context(|| format!("Loading profiling options from {path:?}"))?,
        None => ProfileOptions::default(),
    };
    if let Some(bins) = common.bins {
        options.bin_count = bins;
    }
    if let Some(top) = common.top {
        options.top_values = top;
    }
    if let Some(delimiter) = common.delimiter {
        options.delimiter = Some(delimiter as char);
    }
    if let Some(encoding) = &common.input_encoding {
        options.encoding = Some(encoding.clone());
    }
    options.validate()?;
    Ok(options)
}

fn emit<T, F>(common: &CommonArgs, report: &T, render_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    let rendered = match common.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(report).context("Serializing report to JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Table => render_text(),
    };
    match &common.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Writing report to {path:?}"))?;
            info!("Report written to {path:?}");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
