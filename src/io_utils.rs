//! Encoding, delimiter, and CSV reader helpers.
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **Reader construction**: readers are flexible so that ragged rows from
//!   network-fetched files can be aligned instead of rejected.

use std::io::Read;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{ProfileError, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| ProfileError::InvalidOption(format!("Unknown encoding '{value}'"))),
        None => Ok(UTF_8),
    }
}

/// Picks the delimiter for a source name, honouring an explicit override.
///
/// URLs are resolved the same way as paths, so `https://host/data.tsv` reads
/// as tab-separated. Query strings are ignored.
pub fn resolve_input_delimiter(source_name: &str, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| {
        let trimmed = source_name
            .split(['?', '#'])
            .next()
            .unwrap_or(source_name);
        match trimmed.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
            _ => DEFAULT_CSV_DELIMITER,
        }
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .trim(csv::Trim::All)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn decode_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    source_name: &str,
) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(ProfileError::Decode {
            source_name: source_name.to_string(),
            encoding: encoding.name(),
        })
    } else {
        Ok(text.into_owned())
    }
}

pub fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        assert_eq!(resolve_input_delimiter("data.csv", None), b',');
        assert_eq!(resolve_input_delimiter("DATA.TSV", None), b'\t');
        assert_eq!(
            resolve_input_delimiter("https://host/files/out.tsv?token=1", None),
            b'\t'
        );
        assert_eq!(resolve_input_delimiter("data.tsv", Some(b';')), b';');
        assert_eq!(resolve_input_delimiter("no_extension", None), b',');
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(resolve_encoding(Some("latin1")).is_ok());
        assert!(matches!(
            resolve_encoding(Some("not-an-encoding")),
            Err(ProfileError::InvalidOption(_))
        ));
    }

    #[test]
    fn decode_reports_invalid_utf8() {
        let err = decode_bytes(&[0x41, 0xff, 0x42], UTF_8, "bad.csv").unwrap_err();
        assert!(err.to_string().contains("bad.csv"));
    }
}
