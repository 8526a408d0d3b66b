//! Per-column type and null inference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => f.write_str("numeric"),
            ColumnType::String => f.write_str("string"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub null_count: usize,
}

impl ColumnProfile {
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

/// Infers the type and null count of one column.
///
/// A single non-numeric value makes the column `String`. A column with no
/// values at all stays `Numeric`.
pub fn infer_column(dataset: &Dataset, index: usize) -> ColumnProfile {
    let mut null_count = 0usize;
    let mut numeric = true;
    for cell in dataset.column(index) {
        match cell {
            None => null_count += 1,
            Some(value) if numeric && !value.is_number() => numeric = false,
            Some(_) => {}
        }
    }
    ColumnProfile {
        name: dataset.headers()[index].clone(),
        column_type: if numeric {
            ColumnType::Numeric
        } else {
            ColumnType::String
        },
        null_count,
    }
}

/// Profiles every distinct column in header order.
pub fn infer_profiles(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .distinct_columns()
        .into_iter()
        .map(|index| infer_column(dataset, index))
        .collect()
}
