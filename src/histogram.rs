//! Distribution bins for histogram-style display.
//!
//! Numeric columns are split into a fixed number of equal-width ranges over
//! `[min, max]`. String columns keep only their most frequent values, so bin
//! counts for high-cardinality columns sum to less than the row count.

use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, frequency::FrequencyTable, inference::ColumnType};

pub const DEFAULT_BIN_COUNT: usize = 10;
pub const DEFAULT_TOP_VALUES: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionBins {
    pub bins: Vec<String>,
    pub counts: Vec<usize>,
}

impl DistributionBins {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.bins
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

pub fn build_distribution(
    dataset: &Dataset,
    index: usize,
    column_type: ColumnType,
    bin_count: usize,
    top_values: usize,
) -> DistributionBins {
    match column_type {
        ColumnType::Numeric => numeric_bins(dataset, index, bin_count),
        ColumnType::String => string_bins(dataset, index, top_values),
    }
}

/// Equal-width bins over the numeric values of a column.
///
/// When `min == max` (including a column with no numbers, where both are 0)
/// a single bin labelled with that value holds the full row count.
pub fn numeric_bins(dataset: &Dataset, index: usize, bin_count: usize) -> DistributionBins {
    let values = dataset
        .column(index)
        .flatten()
        .filter_map(|value| value.as_number())
        .collect::<Vec<_>>();
    let (min, max) = bounds(&values);

    if min == max || bin_count == 0 {
        return DistributionBins {
            bins: vec![format_bound(min)],
            counts: vec![dataset.row_count()],
        };
    }

    // halved operands keep the span finite when max - min exceeds f64::MAX
    let half_span = max / 2.0 - min / 2.0;
    let mut counts = vec![0usize; bin_count];
    for value in &values {
        let ratio = (value / 2.0 - min / 2.0) / half_span;
        let slot = (ratio * bin_count as f64).floor() as usize;
        counts[slot.min(bin_count - 1)] += 1;
    }
    let width = max / bin_count as f64 - min / bin_count as f64;
    let bound_at = |i: usize| {
        if i == 0 {
            min
        } else if i == bin_count {
            max
        } else {
            min + width * i as f64
        }
    };
    let bins = (0..bin_count)
        .map(|i| {
            format!(
                "{} – {}",
                format_bound(bound_at(i)),
                format_bound(bound_at(i + 1))
            )
        })
        .collect();

    DistributionBins { bins, counts }
}

/// The `top_values` most frequent non-null values of a column.
pub fn string_bins(dataset: &Dataset, index: usize, top_values: usize) -> DistributionBins {
    let table = FrequencyTable::from_column(dataset, index);
    let (bins, counts) = table
        .top(top_values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .unzip();
    DistributionBins { bins, counts }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

/// Formats a bin boundary for display.
///
/// Magnitudes below 0.01 or above 9999 use exponential notation with two
/// fraction digits (`1.23e+4`); everything else is rounded to two decimals
/// with trailing zeros removed. Zero is always `0`.
pub fn format_bound(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(0.01..=9999.0).contains(&magnitude) {
        return format_exponential(value);
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn format_exponential(value: f64) -> String {
    let raw = format!("{value:.2e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}
