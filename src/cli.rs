use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile and compare preprocessed CSV snapshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a dataset before and after preprocessing
    Compare(CompareArgs),
    /// Profile column types, nulls, distributions and statistics of one dataset
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Original dataset (file path or http(s) URL)
    #[arg(short = 'b', long = "before")]
    pub before: String,
    /// Processed dataset (file path or http(s) URL)
    #[arg(short = 'a', long = "after")]
    pub after: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Dataset to profile (file path or http(s) URL)
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Number of equal-width bins for numeric columns
    #[arg(long = "bins")]
    pub bins: Option<usize>,
    /// Number of most frequent values kept for string columns
    #[arg(long = "top")]
    pub top: Option<usize>,
    /// YAML file with profiling options; flags override its values
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
