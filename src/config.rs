//! Profiling options.
//!
//! Options come from three layers, later ones winning: built-in defaults, an
//! optional YAML file, and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::{
    error::ProfileError,
    histogram::{DEFAULT_BIN_COUNT, DEFAULT_TOP_VALUES},
    io_utils,
};

/// Inputs above this size are still profiled in full; a warning is logged.
pub const DEFAULT_LARGE_INPUT_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ProfileOptions {
    pub bin_count: usize,
    pub top_values: usize,
    pub large_input_bytes: u64,
    /// Explicit delimiter; resolved from the source extension when absent.
    pub delimiter: Option<char>,
    /// Encoding label understood by `encoding_rs`; UTF-8 when absent.
    pub encoding: Option<String>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            top_values: DEFAULT_TOP_VALUES,
            large_input_bytes: DEFAULT_LARGE_INPUT_BYTES,
            delimiter: None,
            encoding: None,
        }
    }
}

impl ProfileOptions {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading options file {path:?}"))?;
        let options: ProfileOptions = serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing options file {path:?}"))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.bin_count == 0 {
            return Err(ProfileError::InvalidOption(
                "bin_count must be at least 1".to_string(),
            ));
        }
        if self.top_values == 0 {
            return Err(ProfileError::InvalidOption(
                "top_values must be at least 1".to_string(),
            ));
        }
        if let Some(delimiter) = self.delimiter
            && !delimiter.is_ascii()
        {
            return Err(ProfileError::InvalidOption(format!(
                "delimiter '{delimiter}' must be ASCII"
            )));
        }
        self.resolve_encoding()?;
        Ok(())
    }

    pub fn delimiter_for(&self, source_name: &str) -> u8 {
        io_utils::resolve_input_delimiter(source_name, self.delimiter.map(|c| c as u8))
    }

    pub fn resolve_encoding(&self) -> Result<&'static Encoding, ProfileError> {
        io_utils::resolve_encoding(self.encoding.as_deref())
    }

    pub fn is_large(&self, byte_len: usize) -> bool {
        byte_len as u64 > self.large_input_bytes
    }
}
