//! Value frequency counting for categorical columns.

use std::collections::HashMap;

use crate::dataset::Dataset;

/// Occurrence counts for the distinct non-null values of a column.
///
/// Values keep the order in which they were first seen so that ranking by
/// count breaks ties deterministically.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_column(dataset: &Dataset, index: usize) -> Self {
        let mut table = Self::new();
        for value in dataset.column(index).flatten() {
            table.ingest(value.as_display());
        }
        table
    }

    pub fn ingest(&mut self, value: String) {
        self.total += 1;
        match self.positions.get(&value) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.positions.insert(value.clone(), self.entries.len());
                self.entries.push((value, 1));
            }
        }
    }

    /// Number of values counted, i.e. non-null cells.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    pub fn count_of(&self, value: &str) -> usize {
        self.positions
            .get(value)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// Values by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut items = self
            .entries
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    pub fn top(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut items = self.ranked();
        items.truncate(limit);
        items
    }

    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.ranked().into_iter().next()
    }
}
