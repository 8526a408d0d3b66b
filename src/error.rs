//! Typed failures surfaced by the profiling pipeline.
//!
//! Only transport-level problems are hard failures. Ragged rows, degenerate
//! numeric columns, and empty datasets are recovered where they occur and
//! never reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to fetch '{source_name}': {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("Failed to decode '{source_name}' as {encoding}")]
    Decode {
        source_name: String,
        encoding: &'static str,
    },

    #[error("Failed to parse CSV from '{source_name}'")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid profiling option: {0}")]
    InvalidOption(String),
}

impl ProfileError {
    pub fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ProfileError::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ProfileError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_the_source() {
        let err = ProfileError::fetch("before.csv", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Failed to fetch 'before.csv': No such file or directory"
        );
    }
}
