//! Executes a [`ParsedIntent`] against a dataset.
//!
//! This is the error-recovery boundary: whatever goes wrong inside one
//! branch is reported as a text-only [`AnalysisResult`] and never reaches
//! the caller as an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::models::{humanize, AnalysisResult, ChartData, ChartKind, ChartSpec, Table};
use crate::coerce;
use crate::dataset::{Dataset, Value};
use crate::error::{AnalysisError, Result};
use crate::nlq::{ColumnChart, Comparator, ParsedIntent, StatOp};
use crate::stats;

/// Tunables for result construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Number of equal-width histogram bins
    pub histogram_bins: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { histogram_bins: 25 }
    }
}

/// Turns intents into results
#[derive(Debug, Clone, Default)]
pub struct IntentExecutor {
    config: ExecutorConfig,
}

impl IntentExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run one intent. Never fails; errors become explanatory messages.
    pub fn execute(&self, intent: &ParsedIntent, dataset: &Dataset) -> AnalysisResult {
        debug!(action = intent.action(), "executing intent");
        match self.try_execute(intent, dataset) {
            Ok(result) => result,
            Err(error) => {
                warn!(action = intent.action(), %error, "analysis failed");
                AnalysisResult::text(format!(
                    "I encountered an error while processing your request: {}",
                    error
                ))
            }
        }
    }

    fn try_execute(&self, intent: &ParsedIntent, dataset: &Dataset) -> Result<AnalysisResult> {
        match intent {
            ParsedIntent::Statistic { column: None, .. } => Ok(AnalysisResult::text(
                "I couldn't identify which column to analyze.",
            )),
            ParsedIntent::Statistic {
                column: Some(column),
                op,
            } => statistic(dataset, column, *op),

            ParsedIntent::FilterCount { column: None, .. } => Ok(AnalysisResult::text(
                "I couldn't identify which column to filter on.",
            )),
            ParsedIntent::FilterCount {
                column: Some(column),
                comparator,
                threshold,
            } => filter_count(dataset, column, *comparator, *threshold),

            ParsedIntent::FilterCountCategory { column, value } => {
                filter_count_category(dataset, column, value)
            }

            ParsedIntent::CountAll => Ok(AnalysisResult::text(format!(
                "Your dataset contains {} total records",
                dataset.row_count()
            ))),

            ParsedIntent::GroupAnalyze {
                group_column: None, ..
            } => Ok(AnalysisResult::text(
                "I couldn't determine which column to group by.",
            )),
            ParsedIntent::GroupAnalyze {
                group_column: Some(group),
                value_column: None,
            } => group_counts(dataset, group),
            ParsedIntent::GroupAnalyze {
                group_column: Some(group),
                value_column: Some(value),
            } => group_means(dataset, group, value),

            ParsedIntent::Chart { kind, column: None } => {
                let message = match kind {
                    ColumnChart::Histogram => "I couldn't determine which column to analyze.",
                    ColumnChart::Bar | ColumnChart::Pie => {
                        "I couldn't determine which column to chart."
                    }
                };
                Ok(AnalysisResult::text(message))
            }
            ParsedIntent::Chart {
                kind: ColumnChart::Histogram,
                column: Some(column),
            } => self.histogram(dataset, column),
            ParsedIntent::Chart {
                kind,
                column: Some(column),
            } => category_chart(dataset, column, *kind),

            ParsedIntent::LineChart {
                time_column: Some(time),
                value_column: Some(value),
            } => Ok(line_chart(dataset, time, value).unwrap_or_else(|error| {
                warn!(%error, "line chart failed");
                AnalysisResult::text("I had trouble creating the line chart with those columns.")
            })),
            ParsedIntent::LineChart { .. } => Ok(AnalysisResult::text(
                "I need both a time column and a value column for a line chart.",
            )),

            ParsedIntent::ScatterPlot {
                column_a: Some(a),
                column_b: Some(b),
            } => scatter_plot(dataset, a, b),
            ParsedIntent::ScatterPlot { .. } => Ok(AnalysisResult::text(
                "I need two numeric columns for a scatter plot.",
            )),

            ParsedIntent::Summary => Ok(AnalysisResult::with_table(
                "Here's a comprehensive summary of your dataset:",
                stats::describe(dataset),
            )),

            ParsedIntent::Unrecognized => Ok(AnalysisResult::text(
                "I'm not sure how to handle that request yet.",
            )),
        }
    }

    fn histogram(&self, dataset: &Dataset, column: &str) -> Result<AnalysisResult> {
        let values = coerce::present_numbers(&dataset.require_column(column)?.values);
        let bins = stats::histogram(&values, self.config.histogram_bins);
        let title = humanize(column);
        Ok(AnalysisResult::with_chart(
            format!("Histogram showing the distribution of '{}'", column),
            ChartSpec {
                kind: ChartKind::Histogram,
                title: format!("Distribution of {}", title),
                x_title: Some(title),
                y_title: Some("Frequency".to_string()),
                data: ChartData::Bins { bins },
            },
        ))
    }
}

fn statistic(dataset: &Dataset, column: &str, op: StatOp) -> Result<AnalysisResult> {
    let values = coerce::present_numbers(&dataset.require_column(column)?.values);
    let no_values = || AnalysisError::NoNumericValues {
        column: column.to_string(),
    };

    let message = match op {
        StatOp::Mean => format!(
            "The average value in '{}' is {:.2}",
            column,
            stats::mean(&values).ok_or_else(no_values)?
        ),
        StatOp::Sum => format!("The total sum of '{}' is {:.0}", column, stats::sum(&values)),
        StatOp::Max => format!(
            "The maximum value in '{}' is {:.2}",
            column,
            stats::max(&values).ok_or_else(no_values)?
        ),
        StatOp::Min => format!(
            "The minimum value in '{}' is {:.2}",
            column,
            stats::min(&values).ok_or_else(no_values)?
        ),
        StatOp::Median => format!(
            "The median value in '{}' is {:.2}",
            column,
            stats::median(&values).ok_or_else(no_values)?
        ),
    };
    Ok(AnalysisResult::text(message))
}

fn filter_count(
    dataset: &Dataset,
    column: &str,
    comparator: Comparator,
    threshold: f64,
) -> Result<AnalysisResult> {
    let matching = dataset
        .require_column(column)?
        .values
        .iter()
        .filter_map(coerce::to_number)
        .filter(|value| comparator.holds(*value, threshold))
        .count();
    Ok(AnalysisResult::text(format!(
        "There are {} records where '{}' is {} {}",
        matching,
        column,
        comparator.phrase(),
        format_threshold(threshold)
    )))
}

/// Thresholds keep a fractional part, as in `under 30.0` or `above 12.5`
fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 && threshold.abs() < 1e16 {
        format!("{:.1}", threshold)
    } else {
        threshold.to_string()
    }
}

fn filter_count_category(dataset: &Dataset, column: &str, target: &str) -> Result<AnalysisResult> {
    let target_lower = target.to_lowercase();
    let matching = dataset
        .require_column(column)?
        .values
        .iter()
        .filter(|value| !value.is_missing() && value.to_string().to_lowercase() == target_lower)
        .count();
    Ok(AnalysisResult::text(format!(
        "There are {} records where '{}' equals '{}'",
        matching, column, target
    )))
}

fn group_counts(dataset: &Dataset, group: &str) -> Result<AnalysisResult> {
    let counts = stats::value_counts(&dataset.require_column(group)?.values);
    let mut table = Table::new(vec![group.to_string(), "count".to_string()]);
    for (value, count) in counts {
        table.push_row(vec![value, Value::from(count as f64)]);
    }
    Ok(AnalysisResult::with_table(
        format!("Count breakdown by '{}':", group),
        table,
    ))
}

/// Mean of `value` per distinct `group`, groups in ascending key order
fn group_means(dataset: &Dataset, group: &str, value: &str) -> Result<AnalysisResult> {
    let keys = &dataset.require_column(group)?.values;
    let values = &dataset.require_column(value)?.values;

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<f64>)> = Vec::new();
    for (key, cell) in keys.iter().zip(values) {
        if key.is_missing() {
            continue;
        }
        let slot = *slots.entry(key.to_string()).or_insert_with(|| {
            groups.push((key.clone(), Vec::new()));
            groups.len() - 1
        });
        if let Some(number) = coerce::to_number(cell) {
            groups[slot].1.push(number);
        }
    }
    groups.sort_by(|a, b| compare_keys(&a.0, &b.0));

    let mut table = Table::new(vec![group.to_string(), format!("average_{}", value)]);
    for (key, numbers) in groups {
        table.push_row(vec![key, Value::from_option(stats::mean(&numbers))]);
    }
    Ok(AnalysisResult::with_table(
        format!("Average '{}' grouped by '{}':", value, group),
        table,
    ))
}

fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn category_chart(dataset: &Dataset, column: &str, kind: ColumnChart) -> Result<AnalysisResult> {
    let counts = stats::value_counts(&dataset.require_column(column)?.values);
    let (labels, values): (Vec<String>, Vec<u64>) = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .unzip();
    let title = humanize(column);
    let data = ChartData::Categories { labels, values };

    let result = match kind {
        ColumnChart::Pie => AnalysisResult::with_chart(
            format!("Pie chart showing the composition of '{}'", column),
            ChartSpec {
                kind: ChartKind::Pie,
                title: format!("Composition of {}", title),
                x_title: None,
                y_title: None,
                data,
            },
        ),
        ColumnChart::Bar | ColumnChart::Histogram => AnalysisResult::with_chart(
            format!("Bar chart showing the distribution of '{}'", column),
            ChartSpec {
                kind: ChartKind::Bar,
                title: format!("Distribution of {}", title),
                x_title: Some(title),
                y_title: Some("Count".to_string()),
                data,
            },
        ),
    };
    Ok(result)
}

/// Rows stay aligned with the dataset; unparseable cells become `None`
fn line_chart(dataset: &Dataset, time: &str, value: &str) -> Result<AnalysisResult> {
    let x = coerce::datetimes(&dataset.require_column(time)?.values);
    let y = coerce::numbers(&dataset.require_column(value)?.values);
    let value_title = humanize(value);
    Ok(AnalysisResult::with_chart(
        format!("Line chart showing '{}' over '{}'", value, time),
        ChartSpec {
            kind: ChartKind::Line,
            title: format!("{} Over Time", value_title),
            x_title: Some(humanize(time)),
            y_title: Some(value_title),
            data: ChartData::TimeSeries { x, y },
        },
    ))
}

fn scatter_plot(dataset: &Dataset, a: &str, b: &str) -> Result<AnalysisResult> {
    let x = coerce::numbers(&dataset.require_column(a)?.values);
    let y = coerce::numbers(&dataset.require_column(b)?.values);
    let (a_title, b_title) = (humanize(a), humanize(b));
    Ok(AnalysisResult::with_chart(
        format!(
            "Scatter plot showing the relationship between '{}' and '{}'",
            a, b
        ),
        ChartSpec {
            kind: ChartKind::Scatter,
            title: format!("Relationship between {} and {}", a_title, b_title),
            x_title: Some(a_title),
            y_title: Some(b_title),
            data: ChartData::Points { x, y },
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_columns(vec![
            ("region", vec!["East".into(), "West".into(), "East".into(), Value::Missing]),
            ("sales_amount", vec![10.into(), 20.into(), 30.into(), "n/a".into()]),
            (
                "order_date",
                vec![
                    "2024-01-01".into(),
                    "later".into(),
                    "2024-03-01".into(),
                    "2024-04-01".into(),
                ],
            ),
            ("comment", vec!["a".into(), "b".into(), "c".into(), "d".into()]),
        ])
        .unwrap()
    }

    fn run(intent: ParsedIntent) -> AnalysisResult {
        IntentExecutor::new().execute(&intent, &dataset())
    }

    fn stat(op: StatOp) -> String {
        run(ParsedIntent::Statistic {
            column: Some("sales_amount".into()),
            op,
        })
        .message
    }

    #[test]
    fn statistics_skip_missing_values() {
        assert_eq!(stat(StatOp::Mean), "The average value in 'sales_amount' is 20.00");
        assert_eq!(stat(StatOp::Sum), "The total sum of 'sales_amount' is 60");
        assert_eq!(stat(StatOp::Max), "The maximum value in 'sales_amount' is 30.00");
        assert_eq!(stat(StatOp::Min), "The minimum value in 'sales_amount' is 10.00");
        assert_eq!(stat(StatOp::Median), "The median value in 'sales_amount' is 20.00");
    }

    #[test]
    fn unresolved_column_is_explained() {
        let result = run(ParsedIntent::Statistic {
            column: None,
            op: StatOp::Mean,
        });
        assert_eq!(result.message, "I couldn't identify which column to analyze.");
        assert!(result.is_text_only());
    }

    #[test]
    fn non_numeric_statistic_reports_error() {
        let result = run(ParsedIntent::Statistic {
            column: Some("comment".into()),
            op: StatOp::Mean,
        });
        assert_eq!(
            result.message,
            "I encountered an error while processing your request: \
             column 'comment' has no numeric values"
        );
        let sum = run(ParsedIntent::Statistic {
            column: Some("comment".into()),
            op: StatOp::Sum,
        });
        assert_eq!(sum.message, "The total sum of 'comment' is 0");
    }

    #[test]
    fn unknown_column_reports_error() {
        let result = run(ParsedIntent::CountAll);
        assert_eq!(result.message, "Your dataset contains 4 total records");

        let result = run(ParsedIntent::FilterCountCategory {
            column: "nope".into(),
            value: "x".into(),
        });
        assert!(result
            .message
            .starts_with("I encountered an error while processing your request:"));
        assert!(result.message.contains("'nope'"));
    }

    #[test]
    fn threshold_filter_excludes_missing() {
        let below = run(ParsedIntent::FilterCount {
            column: Some("sales_amount".into()),
            comparator: Comparator::Below,
            threshold: 25.0,
        });
        assert_eq!(below.message, "There are 2 records where 'sales_amount' is under 25.0");

        let above = run(ParsedIntent::FilterCount {
            column: Some("sales_amount".into()),
            comparator: Comparator::Above,
            threshold: 0.0,
        });
        assert_eq!(above.message, "There are 3 records where 'sales_amount' is above 0.0");

        let fractional = run(ParsedIntent::FilterCount {
            column: Some("sales_amount".into()),
            comparator: Comparator::Above,
            threshold: 12.5,
        });
        assert_eq!(
            fractional.message,
            "There are 2 records where 'sales_amount' is above 12.5"
        );
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let result = run(ParsedIntent::FilterCountCategory {
            column: "region".into(),
            value: "east".into(),
        });
        assert_eq!(result.message, "There are 2 records where 'region' equals 'east'");
    }

    #[test]
    fn group_counts_descending() {
        let result = run(ParsedIntent::GroupAnalyze {
            group_column: Some("region".into()),
            value_column: None,
        });
        assert_eq!(result.message, "Count breakdown by 'region':");
        let table = result.table.unwrap();
        assert_eq!(table.columns, vec!["region", "count"]);
        assert_eq!(
            table.rows,
            vec![
                vec![Value::from("East"), Value::from(2)],
                vec![Value::from("West"), Value::from(1)]
            ]
        );
    }

    #[test]
    fn group_means_per_key() {
        let result = run(ParsedIntent::GroupAnalyze {
            group_column: Some("region".into()),
            value_column: Some("sales_amount".into()),
        });
        let table = result.table.unwrap();
        assert_eq!(table.columns, vec!["region", "average_sales_amount"]);
        assert_eq!(
            table.rows,
            vec![
                vec![Value::from("East"), Value::from(20)],
                vec![Value::from("West"), Value::from(20)]
            ]
        );
    }

    #[test]
    fn group_without_column_is_explained() {
        let result = run(ParsedIntent::GroupAnalyze {
            group_column: None,
            value_column: Some("sales_amount".into()),
        });
        assert_eq!(result.message, "I couldn't determine which column to group by.");
    }

    #[test]
    fn bar_and_pie_charts_count_values() {
        let bar = run(ParsedIntent::Chart {
            kind: ColumnChart::Bar,
            column: Some("region".into()),
        });
        let chart = bar.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, "Distribution of Region");
        assert_eq!(chart.y_title.as_deref(), Some("Count"));
        assert_eq!(
            chart.data,
            ChartData::Categories {
                labels: vec!["East".into(), "West".into()],
                values: vec![2, 1]
            }
        );

        let pie = run(ParsedIntent::Chart {
            kind: ColumnChart::Pie,
            column: Some("region".into()),
        });
        assert_eq!(pie.message, "Pie chart showing the composition of 'region'");
        assert_eq!(pie.chart.unwrap().title, "Composition of Region");
    }

    #[test]
    fn histogram_uses_configured_bins() {
        let executor = IntentExecutor::with_config(ExecutorConfig { histogram_bins: 4 });
        let result = executor.execute(
            &ParsedIntent::Chart {
                kind: ColumnChart::Histogram,
                column: Some("sales_amount".into()),
            },
            &dataset(),
        );
        let chart = result.chart.unwrap();
        assert_eq!(chart.title, "Distribution of Sales Amount");
        match chart.data {
            ChartData::Bins { bins } => {
                assert_eq!(bins.len(), 4);
                assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 3);
            }
            other => panic!("unexpected chart data {:?}", other),
        }
    }

    #[test]
    fn line_chart_keeps_rows_aligned() {
        let result = run(ParsedIntent::LineChart {
            time_column: Some("order_date".into()),
            value_column: Some("sales_amount".into()),
        });
        let chart = result.chart.unwrap();
        assert_eq!(chart.title, "Sales Amount Over Time");
        match chart.data {
            ChartData::TimeSeries { x, y } => {
                assert_eq!(x.len(), 4);
                assert!(x[1].is_none());
                assert_eq!(y, vec![Some(10.0), Some(20.0), Some(30.0), None]);
            }
            other => panic!("unexpected chart data {:?}", other),
        }
    }

    #[test]
    fn line_chart_problems_are_reported_gently() {
        let missing = run(ParsedIntent::LineChart {
            time_column: Some("order_date".into()),
            value_column: None,
        });
        assert_eq!(
            missing.message,
            "I need both a time column and a value column for a line chart."
        );

        let broken = run(ParsedIntent::LineChart {
            time_column: Some("nope".into()),
            value_column: Some("sales_amount".into()),
        });
        assert_eq!(
            broken.message,
            "I had trouble creating the line chart with those columns."
        );
    }

    #[test]
    fn scatter_needs_both_columns() {
        let result = run(ParsedIntent::ScatterPlot {
            column_a: Some("sales_amount".into()),
            column_b: None,
        });
        assert_eq!(result.message, "I need two numeric columns for a scatter plot.");

        let result = run(ParsedIntent::ScatterPlot {
            column_a: Some("sales_amount".into()),
            column_b: Some("sales_amount".into()),
        });
        assert_eq!(
            result.chart.unwrap().title,
            "Relationship between Sales Amount and Sales Amount"
        );
    }

    #[test]
    fn summary_is_idempotent() {
        let first = run(ParsedIntent::Summary);
        let second = run(ParsedIntent::Summary);
        assert_eq!(first, second);
        assert_eq!(first.table.unwrap().columns.len(), 5);
    }

    #[test]
    fn unrecognized_intent_is_handled() {
        let result = run(ParsedIntent::Unrecognized);
        assert_eq!(result.message, "I'm not sure how to handle that request yet.");
        assert!(result.is_text_only());
    }
}
