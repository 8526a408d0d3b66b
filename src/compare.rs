//! Before/after delta metrics.

use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, inference::infer_column};

/// Joins composite row keys. A control character keeps `"a,b" | "c"` and
/// `"a" | "b,c"` apart.
const KEY_SEPARATOR: &str = "\u{1f}";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub original_row_count: usize,
    pub processed_row_count: usize,
    pub nulls_filled: usize,
    pub duplicates_removed: usize,
    pub dropped_columns: Vec<String>,
    pub added_columns: Vec<String>,
}

impl ComparisonSummary {
    /// Signed change in row count from before to after.
    pub fn row_delta(&self) -> i64 {
        self.processed_row_count as i64 - self.original_row_count as i64
    }
}

pub fn summarize(before: &Dataset, after: &Dataset) -> ComparisonSummary {
    let shared = shared_columns(before, after);
    ComparisonSummary {
        original_row_count: before.row_count(),
        processed_row_count: after.row_count(),
        nulls_filled: nulls_filled(before, after, &shared),
        duplicates_removed: duplicate_rows(before, &shared),
        dropped_columns: missing_columns(before, after),
        added_columns: missing_columns(after, before),
    }
}

/// Columns present in both datasets, in the order of `before`.
pub fn shared_columns(before: &Dataset, after: &Dataset) -> Vec<String> {
    before
        .headers()
        .iter()
        .filter(|name| after.has_column(name))
        .unique()
        .cloned()
        .collect()
}

/// Columns of `left` that `right` lacks, in the order of `left`.
pub fn missing_columns(left: &Dataset, right: &Dataset) -> Vec<String> {
    left.headers()
        .iter()
        .filter(|name| !right.has_column(name))
        .unique()
        .cloned()
        .collect()
}

/// Sum over shared columns of the drop in null count; increases count as 0.
pub fn nulls_filled(before: &Dataset, after: &Dataset, shared: &[String]) -> usize {
    shared
        .iter()
        .filter_map(|name| {
            let before_idx = before.column_index(name)?;
            let after_idx = after.column_index(name)?;
            let before_nulls = infer_column(before, before_idx).null_count;
            let after_nulls = infer_column(after, after_idx).null_count;
            Some(before_nulls.saturating_sub(after_nulls))
        })
        .sum()
}

/// Rows of `dataset` that repeat an earlier row on the `key_columns`.
///
/// With no key columns every column of the dataset forms the key.
pub fn duplicate_rows(dataset: &Dataset, key_columns: &[String]) -> usize {
    let indices = if key_columns.is_empty() {
        dataset.distinct_columns()
    } else {
        key_columns
            .iter()
            .filter_map(|name| dataset.column_index(name))
            .collect()
    };
    let unique = dataset
        .rows()
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&idx| {
                    row.get(idx)
                        .and_then(Option::as_ref)
                        .map(|value| value.as_display())
                        .unwrap_or_default()
                })
                .join(KEY_SEPARATOR)
        })
        .collect::<HashSet<_>>();
    dataset.row_count() - unique.len()
}
