//! In-memory tabular snapshot parsed from CSV text.
//!
//! The header row fixes the column set. Every data row is aligned to it:
//! missing trailing fields become null and surplus fields are dropped, so a
//! ragged file never aborts ingestion.

use encoding_rs::Encoding;
use log::{debug, warn};

use crate::{
    data::{Value, parse_cell},
    error::{ProfileError, Result},
    io_utils,
};

pub type Row = Vec<Option<Value>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Decodes raw bytes and parses them as CSV with a header row.
    pub fn from_bytes(
        name: &str,
        bytes: &[u8],
        delimiter: u8,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let text = io_utils::decode_bytes(bytes, encoding, name)?;
        Self::from_text(name, &text, delimiter)
    }

    pub fn from_text(name: &str, text: &str, delimiter: u8) -> Result<Self> {
        let csv_error = |source| ProfileError::Csv {
            source_name: name.to_string(),
            source,
        };
        let mut reader = io_utils::open_csv_reader(text.as_bytes(), delimiter);
        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        warn_on_duplicate_headers(name, &headers);

        let width = headers.len();
        let mut rows = Vec::new();
        let mut ragged = 0usize;
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            if record.len() != width {
                ragged += 1;
                debug!(
                    "Row {} of '{name}' has {} field(s), expected {width}",
                    row_idx + 2,
                    record.len()
                );
            }
            let mut row = record.iter().take(width).map(parse_cell).collect::<Row>();
            row.resize(width, None);
            rows.push(row);
        }
        if ragged > 0 {
            warn!("Aligned {ragged} ragged row(s) in '{name}' to {width} column(s)");
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Positions of the columns that are profiled: the first occurrence of
    /// each header name, in header order.
    pub fn distinct_columns(&self) -> Vec<usize> {
        (0..self.headers.len())
            .filter(|&index| self.column_index(&self.headers[index]) == Some(index))
            .collect()
    }

    /// Cells of one column in row order; `None` marks a null cell.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(Option::as_ref))
    }
}

fn warn_on_duplicate_headers(name: &str, headers: &[String]) {
    for (idx, header) in headers.iter().enumerate() {
        if headers[..idx].contains(header) {
            warn!("Column '{header}' appears more than once in '{name}'; the first occurrence wins");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    #[test]
    fn parses_header_and_typed_cells() {
        let dataset = Dataset::from_text("t.csv", "id,name\n1,Alice\n2, Bob \n", b',').unwrap();
        assert_eq!(dataset.headers(), ["id", "name"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0][0], Some(Value::Number(1.0)));
        assert_eq!(dataset.rows()[1][1], Some(Value::Text("Bob".to_string())));
    }

    #[test]
    fn ragged_rows_are_aligned_to_header() {
        let dataset = Dataset::from_text("t.csv", "a,b,c\n1,2\n4,5,6,7\n", b',').unwrap();
        assert_eq!(
            dataset.rows()[0],
            vec![Some(Value::Number(1.0)), Some(Value::Number(2.0)), None]
        );
        assert_eq!(dataset.rows()[1].len(), 3);
    }

    #[test]
    fn header_only_input_has_no_rows() {
        let dataset = Dataset::from_text("t.csv", "a,b\n", b',').unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.headers().len(), 2);

        let empty = Dataset::from_text("empty.csv", "", b',').unwrap();
        assert!(empty.headers().is_empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn quoted_fields_and_custom_delimiters() {
        let dataset =
            Dataset::from_text("t.csv", "note;n\n\"a;b\";3\n", b';').unwrap();
        assert_eq!(dataset.rows()[0][0], Some(Value::Text("a;b".to_string())));
        assert_eq!(dataset.rows()[0][1], Some(Value::Number(3.0)));
    }

    #[test]
    fn decodes_legacy_encodings() {
        let bytes = b"city\nM\xfcnchen\n";
        let dataset = Dataset::from_bytes("t.csv", bytes, b',', WINDOWS_1252).unwrap();
        assert_eq!(
            dataset.rows()[0][0],
            Some(Value::Text("München".to_string()))
        );
        assert!(Dataset::from_bytes("t.csv", bytes, b',', UTF_8).is_err());
    }

    #[test]
    fn repeated_headers_resolve_to_first_occurrence() {
        let dataset = Dataset::from_text("t.csv", "a,a,b,a\n1,x,2,y\n", b',').unwrap();
        assert_eq!(dataset.headers().len(), 4);
        assert_eq!(dataset.distinct_columns(), vec![0, 2]);
        assert_eq!(dataset.column_index("a"), Some(0));
    }

    #[test]
    fn column_iterates_cells_in_row_order() {
        let dataset = Dataset::from_text("t.csv", "a,b\n1,x\n,y\n", b',').unwrap();
        let cells = dataset.column(0).collect::<Vec<_>>();
        assert_eq!(cells, vec![Some(&Value::Number(1.0)), None]);
    }
}
