//! Result records handed to the presentation layer

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dataset::Value;
use crate::stats::HistogramBin;

/// A small rectangular result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of one column by name
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

/// Chart family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Histogram,
    Pie,
    Line,
    Scatter,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Histogram => "histogram",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The plotted data, shaped per chart family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ChartData {
    /// Bar and pie charts
    Categories { labels: Vec<String>, values: Vec<u64> },
    /// Histograms
    Bins { bins: Vec<HistogramBin> },
    /// Line charts; unparseable cells stay in place as `None`
    TimeSeries {
        x: Vec<Option<NaiveDateTime>>,
        y: Vec<Option<f64>>,
    },
    /// Scatter plots; unparseable cells stay in place as `None`
    Points { x: Vec<Option<f64>>, y: Vec<Option<f64>> },
}

impl ChartData {
    /// Number of plotted marks (categories, bins or rows)
    pub fn len(&self) -> usize {
        match self {
            ChartData::Categories { labels, .. } => labels.len(),
            ChartData::Bins { bins } => bins.len(),
            ChartData::TimeSeries { x, .. } => x.len(),
            ChartData::Points { x, .. } => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declarative chart description; rendering is left to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub data: ChartData,
}

/// What a question produced: always a message, plus at most one of a table
/// or a chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub message: String,
    pub table: Option<Table>,
    pub chart: Option<ChartSpec>,
}

impl AnalysisResult {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            table: None,
            chart: None,
        }
    }

    pub fn with_table(message: impl Into<String>, table: Table) -> Self {
        Self {
            message: message.into(),
            table: Some(table),
            chart: None,
        }
    }

    pub fn with_chart(message: impl Into<String>, chart: ChartSpec) -> Self {
        Self {
            message: message.into(),
            table: None,
            chart: Some(chart),
        }
    }

    pub fn is_text_only(&self) -> bool {
        self.table.is_none() && self.chart.is_none()
    }
}

/// `order_total` -> `Order Total`
pub fn humanize(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut previous_is_letter = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
