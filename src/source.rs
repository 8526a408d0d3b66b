//! Locating and fetching CSV resources.
//!
//! A source is either a local path or an `http(s)://` URL. The two snapshots
//! of a comparison are fetched concurrently and the pass fails as a whole if
//! either read fails. There are no retries.

use std::{fmt, fs, path::PathBuf, time::Duration};

use log::debug;
use reqwest::blocking::Client;

use crate::error::{ProfileError, Result};

const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::Path(PathBuf::from(trimmed))
        }
    }

    pub fn name(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }

    pub fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Source::Path(path) => {
                fs::read(path).map_err(|err| ProfileError::fetch(self.name(), err))?
            }
            Source::Url(url) => fetch_url(url)?,
        };
        debug!("Fetched {} byte(s) from '{}'", bytes.len(), self.name());
        Ok(bytes)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|err| ProfileError::fetch(url, err))?;
    let response = client
        .get(url)
        .send()
        .map_err(|err| ProfileError::fetch(url, err))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProfileError::fetch(url, format!("HTTP status {status}")));
    }
    let body = response
        .bytes()
        .map_err(|err| ProfileError::fetch(url, err))?;
    Ok(body.to_vec())
}

/// Fetches both snapshots concurrently.
pub fn fetch_pair(before: &Source, after: &Source) -> Result<(Vec<u8>, Vec<u8>)> {
    let (before_bytes, after_bytes) = rayon::join(|| before.fetch(), || after.fetch());
    Ok((before_bytes?, after_bytes?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            Source::parse("https://example.org/processed_file.csv"),
            Source::Url("https://example.org/processed_file.csv".to_string())
        );
        assert_eq!(
            Source::parse("HTTP://example.org/a.csv"),
            Source::Url("HTTP://example.org/a.csv".to_string())
        );
        assert_eq!(
            Source::parse("data/file.csv"),
            Source::Path(PathBuf::from("data/file.csv"))
        );
    }

    #[test]
    fn fetch_reads_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "a\n1\n").unwrap();
        let bytes = Source::Path(path).fetch().unwrap();
        assert_eq!(bytes, b"a\n1\n");
    }

    #[test]
    fn missing_file_is_a_fetch_failure() {
        let dir = tempdir().unwrap();
        let missing = Source::Path(dir.path().join("missing.csv"));
        let err = missing.fetch().unwrap_err();
        assert!(matches!(err, ProfileError::Fetch { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn fetch_pair_fails_when_either_side_fails() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.csv");
        fs::write(&present, "a\n1\n").unwrap();
        let result = fetch_pair(
            &Source::Path(present),
            &Source::Path(dir.path().join("absent.csv")),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }
}
