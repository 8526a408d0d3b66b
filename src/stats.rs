//! Descriptive statistics per column.
//!
//! Numeric columns get location, spread, nearest-rank quartiles and a
//! `1.5 × IQR` outlier count. String columns get their cardinality and most
//! common value. A column without any non-null value has no statistics.

use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, frequency::FrequencyTable, inference::ColumnType};

const OUTLIER_FENCE: f64 = 1.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ColumnStatistics {
    Numeric(NumericStatistics),
    Categorical(CategoricalStatistics),
}

impl ColumnStatistics {
    pub fn as_numeric(&self) -> Option<&NumericStatistics> {
        match self {
            ColumnStatistics::Numeric(stats) => Some(stats),
            ColumnStatistics::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStatistics> {
        match self {
            ColumnStatistics::Categorical(stats) => Some(stats),
            ColumnStatistics::Numeric(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumericStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outlier_count: usize,
    pub outlier_percentage: f64,
}

impl NumericStatistics {
    /// Computes statistics over the given values, or `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let n = count as f64;

        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let mid = count / 2;
        let median = if count.is_multiple_of(2) {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        let q1 = sorted[nearest_rank(count, 0.25)];
        let q3 = sorted[nearest_rank(count, 0.75)];
        let iqr = q3 - q1;
        let lower_fence = q1 - OUTLIER_FENCE * iqr;
        let upper_fence = q3 + OUTLIER_FENCE * iqr;
        let outlier_count = sorted
            .iter()
            .filter(|&&v| v < lower_fence || v > upper_fence)
            .count();

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
            std_dev: variance.sqrt(),
            q1,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            outlier_count,
            outlier_percentage: outlier_count as f64 / n * 100.0,
        })
    }
}

fn nearest_rank(count: usize, quantile: f64) -> usize {
    ((count as f64 * quantile).floor() as usize).min(count - 1)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalStatistics {
    pub count: usize,
    pub unique_count: usize,
    pub most_common_value: String,
    pub most_common_count: usize,
    pub most_common_percentage: f64,
}

impl CategoricalStatistics {
    pub fn from_table(table: &FrequencyTable) -> Option<Self> {
        let (value, count) = table.most_common()?;
        Some(Self {
            count: table.total(),
            unique_count: table.unique_count(),
            most_common_value: value.to_string(),
            most_common_count: count,
            most_common_percentage: count as f64 / table.total() as f64 * 100.0,
        })
    }
}

pub fn compute_statistics(
    dataset: &Dataset,
    index: usize,
    column_type: ColumnType,
) -> Option<ColumnStatistics> {
    match column_type {
        ColumnType::Numeric => {
            let values = dataset
                .column(index)
                .flatten()
                .filter_map(|value| value.as_number())
                .collect::<Vec<_>>();
            NumericStatistics::from_values(&values).map(ColumnStatistics::Numeric)
        }
        ColumnType::String => {
            let table = FrequencyTable::from_column(dataset, index);
            CategoricalStatistics::from_table(&table).map(ColumnStatistics::Categorical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn mean_median_and_population_std_dev() {
        let stats = NumericStatistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();
        approx(stats.mean, 5.0);
        approx(stats.median, 4.5);
        approx(stats.std_dev, 2.0);
        approx(stats.min, 2.0);
        approx(stats.max, 9.0);
    }

    #[test]
    fn odd_count_median_is_middle_element() {
        let stats = NumericStatistics::from_values(&[9.0, 1.0, 5.0]).unwrap();
        approx(stats.median, 5.0);
    }

    #[test]
    fn nearest_rank_quartiles_flag_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let stats = NumericStatistics::from_values(&values).unwrap();
        approx(stats.q1, 3.0);
        approx(stats.q3, 8.0);
        approx(stats.iqr, 5.0);
        approx(stats.upper_fence, 15.5);
        approx(stats.lower_fence, -4.5);
        assert_eq!(stats.outlier_count, 1);
        approx(stats.outlier_percentage, 10.0);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let stats = NumericStatistics::from_values(&[42.0]).unwrap();
        approx(stats.q1, 42.0);
        approx(stats.q3, 42.0);
        approx(stats.std_dev, 0.0);
        assert_eq!(stats.outlier_count, 0);
    }

    #[test]
    fn empty_values_have_no_statistics() {
        assert!(NumericStatistics::from_values(&[]).is_none());
        assert!(CategoricalStatistics::from_table(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn categorical_reports_most_common_share() {
        let dataset = Dataset::from_text("t.csv", "c\nx\nx\ny\nz\n", b',').unwrap();
        let stats = compute_statistics(&dataset, 0, ColumnType::String).unwrap();
        let categorical = stats.as_categorical().unwrap();
        assert_eq!(categorical.unique_count, 3);
        assert_eq!(categorical.most_common_value, "x");
        assert_eq!(categorical.most_common_count, 2);
        approx(categorical.most_common_percentage, 50.0);
        assert!(stats.as_numeric().is_none());
    }

    #[test]
    fn statistics_serialize_with_kind_tag() {
        let stats = compute_statistics(
            &Dataset::from_text("t.csv", "n\n1\n3\n", b',').unwrap(),
            0,
            ColumnType::Numeric,
        )
        .unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["stdDev"], 1.0);
        assert_eq!(json["outlierCount"], 0);
    }
}
