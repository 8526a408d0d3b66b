use csv_profiler::{
    config::ProfileOptions,
    data::Value,
    dataset::{Dataset, Row},
    histogram::numeric_bins,
    inference::{ColumnType, infer_column},
    report::profile_dataset,
    stats::NumericStatistics,
};
use proptest::prelude::*;

fn numeric_dataset(cells: &[Option<f64>]) -> Dataset {
    let rows = cells
        .iter()
        .map(|cell| vec![cell.map(Value::Number)])
        .collect::<Vec<Row>>();
    Dataset::new("generated.csv", vec!["v".to_string()], rows)
}

fn cell_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => (-1.0e6f64..1.0e6).prop_map(Some),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-d]{1,2}",
        "-?[0-9]{1,3}",
    ]
}

proptest! {
    #[test]
    fn null_and_non_null_counts_cover_every_row(
        cells in proptest::collection::vec(cell_strategy(), 0..60)
    ) {
        let dataset = numeric_dataset(&cells);
        let profile = infer_column(&dataset, 0);
        let non_null = dataset.column(0).flatten().count();
        prop_assert_eq!(profile.null_count + non_null, dataset.row_count());
    }

    #[test]
    fn numeric_bins_account_for_every_value(
        cells in proptest::collection::vec(cell_strategy(), 1..60),
        bin_count in 1usize..16,
    ) {
        let dataset = numeric_dataset(&cells);
        let values = cells.iter().flatten().copied().collect::<Vec<_>>();
        let bins = numeric_bins(&dataset, 0, bin_count);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if values.is_empty() || min == max {
            prop_assert_eq!(bins.len(), 1);
            prop_assert_eq!(bins.total(), dataset.row_count());
        } else {
            prop_assert_eq!(bins.len(), bin_count);
            prop_assert_eq!(bins.total(), values.len());
        }
    }

    #[test]
    fn quartiles_bracket_the_median(
        values in proptest::collection::vec(-1.0e6f64..1.0e6, 4..80)
    ) {
        let stats = NumericStatistics::from_values(&values).expect("statistics");
        prop_assert!(stats.q1 <= stats.median);
        prop_assert!(stats.median <= stats.q3);
        prop_assert!(stats.outlier_count <= stats.count);
        prop_assert!((0.0..=100.0).contains(&stats.outlier_percentage));
        prop_assert!(stats.std_dev >= 0.0);
    }

    #[test]
    fn profiling_parsed_text_is_deterministic(
        cells in proptest::collection::vec((text_strategy(), text_strategy()), 0..30)
    ) {
        let mut text = String::from("a,b\n");
        for (a, b) in &cells {
            text.push_str(&format!("{a},{b}\n"));
        }
        let options = ProfileOptions::default();
        let first = profile_dataset(&Dataset::from_text("g.csv", &text, b',').unwrap(), &options);
        let second = profile_dataset(&Dataset::from_text("g.csv", &text, b',').unwrap(), &options);
        prop_assert_eq!(&first, &second);

        for column in &first.columns {
            if column.profile.column_type == ColumnType::String {
                prop_assert!(column.distribution.total() <= first.row_count);
                prop_assert!(column.distribution.len() <= options.top_values);
            }
        }
    }
}
