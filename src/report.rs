//! Structured summaries handed to the display layer.
//!
//! A [`DatasetProfile`] covers one snapshot; a [`ComparisonReport`] pairs the
//! two snapshots, lists columns in the order of the processed dataset, and
//! carries the aggregate [`ComparisonSummary`].

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    compare::{self, ComparisonSummary},
    config::ProfileOptions,
    dataset::Dataset,
    histogram::{self, DistributionBins},
    inference::{self, ColumnProfile},
    stats::{self, ColumnStatistics},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    #[serde(flatten)]
    pub profile: ColumnProfile,
    pub distribution: DistributionBins,
    /// Absent when the column has no non-null values.
    pub statistics: Option<ColumnStatistics>,
}

impl ColumnReport {
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    pub name: String,
    pub row_count: usize,
    pub no_data: bool,
    pub columns: Vec<ColumnReport>,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|column| column.name() == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnComparison {
    pub name: String,
    pub before: Option<ColumnReport>,
    pub after: ColumnReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub before: DatasetProfile,
    pub after: DatasetProfile,
    pub columns: Vec<ColumnComparison>,
    pub summary: ComparisonSummary,
}

pub fn profile_dataset(dataset: &Dataset, options: &ProfileOptions) -> DatasetProfile {
    let no_data = dataset.is_empty();
    if no_data {
        warn!("'{}' has no data rows; statistics are skipped", dataset.name());
    }
    let columns = dataset
        .distinct_columns()
        .into_iter()
        .zip(inference::infer_profiles(dataset))
        .map(|(index, profile)| {
            let distribution = histogram::build_distribution(
                dataset,
                index,
                profile.column_type,
                options.bin_count,
                options.top_values,
            );
            let statistics = if no_data {
                None
            } else {
                stats::compute_statistics(dataset, index, profile.column_type)
            };
            if statistics.is_none() && !no_data {
                debug!(
                    "Column '{}' in '{}' has no values to summarise",
                    profile.name,
                    dataset.name()
                );
            }
            ColumnReport {
                profile,
                distribution,
                statistics,
            }
        })
        .collect();

    DatasetProfile {
        name: dataset.name().to_string(),
        row_count: dataset.row_count(),
        no_data,
        columns,
    }
}

pub fn compare_datasets(
    before: &Dataset,
    after: &Dataset,
    options: &ProfileOptions,
) -> ComparisonReport {
    let before_profile = profile_dataset(before, options);
    let after_profile = profile_dataset(after, options);

    let mut columns = Vec::with_capacity(after_profile.columns.len());
    for after_column in &after_profile.columns {
        let before_column = before_profile.column(after_column.name()).cloned();
        if let Some(before_column) = &before_column
            && before_column.profile.column_type != after_column.profile.column_type
        {
            debug!(
                "Column '{}' changed type from {} to {}",
                after_column.name(),
                before_column.profile.column_type,
                after_column.profile.column_type
            );
        }
        columns.push(ColumnComparison {
            name: after_column.name().to_string(),
            before: before_column,
            after: after_column.clone(),
        });
    }

    ComparisonReport {
        summary: compare::summarize(before, after),
        before: before_profile,
        after: after_profile,
        columns,
    }
}
