//! Text rendering of profiling reports.

use std::fmt::Write as _;

use crate::{
    compare::ComparisonSummary,
    report::{ColumnReport, ComparisonReport, DatasetProfile},
    stats::ColumnStatistics,
    table::Table,
};

pub fn render_profile(profile: &DatasetProfile) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}: {} row(s), {} column(s)",
        profile.name,
        profile.row_count,
        profile.columns.len()
    );
    if profile.no_data {
        let _ = writeln!(output, "No data rows; statistics skipped.");
    }
    output.push('\n');
    output.push_str(&columns_table(&profile.columns).render());
    push_statistics(&mut output, &profile.columns);
    push_distributions(&mut output, &profile.name, &profile.columns);
    output
}

pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut output = String::new();
    output.push_str(&summary_table(&report.summary).render());
    output.push('\n');

    let mut columns =
        Table::new(["column", "type", "nulls_before", "nulls_after"]).align_right(&[2, 3]);
    for column in &report.columns {
        columns.push_row(vec![
            column.name.clone(),
            column.after.profile.column_type.to_string(),
            column
                .before
                .as_ref()
                .map(|c| c.profile.null_count.to_string())
                .unwrap_or_else(|| "-".to_string()),
            column.after.profile.null_count.to_string(),
        ]);
    }
    output.push_str(&columns.render());

    for profile in [&report.before, &report.after] {
        output.push('\n');
        let _ = writeln!(output, "== {} ({} row(s))", profile.name, profile.row_count);
        if profile.no_data {
            let _ = writeln!(output, "No data rows; statistics skipped.");
            continue;
        }
        push_statistics(&mut output, &profile.columns);
        push_distributions(&mut output, &profile.name, &profile.columns);
    }
    output
}

fn summary_table(summary: &ComparisonSummary) -> Table {
    let mut table = Table::new(["metric", "value"]);
    for (metric, value) in [
        ("original_rows", summary.original_row_count.to_string()),
        ("processed_rows", summary.processed_row_count.to_string()),
        ("row_change", format!("{:+}", summary.row_delta())),
        ("nulls_filled", summary.nulls_filled.to_string()),
        ("duplicates_removed", summary.duplicates_removed.to_string()),
        ("dropped_columns", join_or_dash(&summary.dropped_columns)),
        ("added_columns", join_or_dash(&summary.added_columns)),
    ] {
        table.push_row(vec![metric.to_string(), value]);
    }
    table
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn columns_table(columns: &[ColumnReport]) -> Table {
    let mut table = Table::new(["column", "type", "nulls"]).align_right(&[2]);
    for column in columns {
        table.push_row(vec![
            column.name().to_string(),
            column.profile.column_type.to_string(),
            column.profile.null_count.to_string(),
        ]);
    }
    table
}

fn push_statistics(output: &mut String, columns: &[ColumnReport]) {
    let mut numeric = Table::new([
        "column", "count", "min", "max", "mean", "median", "std_dev", "q1", "q3", "iqr",
        "outliers", "outlier_%",
    ])
    .align_right(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    let mut categorical = Table::new([
        "column",
        "count",
        "unique",
        "most_common",
        "most_common_count",
        "most_common_%",
    ])
    .align_right(&[1, 2, 4, 5]);

    for column in columns {
        match &column.statistics {
            Some(ColumnStatistics::Numeric(stats)) => numeric.push_row(vec![
                column.name().to_string(),
                stats.count.to_string(),
                format_number(stats.min),
                format_number(stats.max),
                format_number(stats.mean),
                format_number(stats.median),
                format_number(stats.std_dev),
                format_number(stats.q1),
                format_number(stats.q3),
                format_number(stats.iqr),
                stats.outlier_count.to_string(),
                format!("{:.2}", stats.outlier_percentage),
            ]),
            Some(ColumnStatistics::Categorical(stats)) => categorical.push_row(vec![
                column.name().to_string(),
                stats.count.to_string(),
                stats.unique_count.to_string(),
                stats.most_common_value.clone(),
                stats.most_common_count.to_string(),
                format!("{:.2}", stats.most_common_percentage),
            ]),
            None => {}
        }
    }

    if !numeric.is_empty() {
        output.push('\n');
        output.push_str(&numeric.render());
    }
    if !categorical.is_empty() {
        output.push('\n');
        output.push_str(&categorical.render());
    }
}

fn push_distributions(output: &mut String, dataset: &str, columns: &[ColumnReport]) {
    let mut table = Table::new(["column", "bin", "count"]).align_right(&[2]);
    for column in columns {
        for (bin, count) in column.distribution.iter() {
            table.push_row(vec![column.name().to_string(), bin.to_string(), count.to_string()]);
        }
    }
    if !table.is_empty() {
        output.push('\n');
        let _ = writeln!(output, "Distribution ({dataset})");
        output.push_str(&table.render());
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
