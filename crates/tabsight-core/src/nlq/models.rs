use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ChartKind;

/// Aggregation requested by a statistic question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatOp {
    Mean,
    Sum,
    Max,
    Min,
    Median,
}

impl fmt::Display for StatOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatOp::Mean => "mean",
            StatOp::Sum => "sum",
            StatOp::Max => "max",
            StatOp::Min => "min",
            StatOp::Median => "median",
        })
    }
}

/// Strict comparison used by threshold filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    Below,
    #[serde(rename = ">")]
    Above,
}

impl Comparator {
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::Below => value < threshold,
            Comparator::Above => value > threshold,
        }
    }

    /// Word used in result messages
    pub fn phrase(&self) -> &'static str {
        match self {
            Comparator::Below => "under",
            Comparator::Above => "above",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparator::Below => "<",
            Comparator::Above => ">",
        })
    }
}

/// Chart families that plot a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnChart {
    Bar,
    Histogram,
    Pie,
}

impl ColumnChart {
    pub fn kind(&self) -> ChartKind {
        match self {
            ColumnChart::Bar => ChartKind::Bar,
            ColumnChart::Histogram => ChartKind::Histogram,
            ColumnChart::Pie => ChartKind::Pie,
        }
    }
}

/// The classified purpose of a question with its resolved arguments.
///
/// Column fields are `None` when no column could be resolved; the executor
/// turns that into an explanatory message instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ParsedIntent {
    Statistic {
        column: Option<String>,
        op: StatOp,
    },
    FilterCount {
        column: Option<String>,
        comparator: Comparator,
        threshold: f64,
    },
    FilterCountCategory {
        column: String,
        value: String,
    },
    CountAll,
    GroupAnalyze {
        group_column: Option<String>,
        value_column: Option<String>,
    },
    Chart {
        kind: ColumnChart,
        column: Option<String>,
    },
    LineChart {
        time_column: Option<String>,
        value_column: Option<String>,
    },
    ScatterPlot {
        column_a: Option<String>,
        column_b: Option<String>,
    },
    Summary,
    /// An action tag this version does not know, e.g. from a serialized
    /// intent produced elsewhere. The parser never emits it.
    #[serde(other)]
    Unrecognized,
}

impl ParsedIntent {
    /// Short stable name of the variant, used in logs
    pub fn action(&self) -> &'static str {
        match self {
            ParsedIntent::Statistic { .. } => "statistic",
            ParsedIntent::FilterCount { .. } => "filter_count",
            ParsedIntent::FilterCountCategory { .. } => "filter_count_category",
            ParsedIntent::CountAll => "count_all",
            ParsedIntent::GroupAnalyze { .. } => "group_analyze",
            ParsedIntent::Chart { .. } => "chart",
            ParsedIntent::LineChart { .. } => "line_chart",
            ParsedIntent::ScatterPlot { .. } => "scatter_plot",
            ParsedIntent::Summary => "summary",
            ParsedIntent::Unrecognized => "unrecognized",
        }
    }
}
