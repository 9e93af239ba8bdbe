//! In-memory rectangular dataset and load-time header/column preparation

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Table;
use crate::coerce;
use crate::error::{AnalysisError, IngestError};

lazy_static! {
    static ref NON_WORD_RUN: Regex = Regex::new(r"[^\w\s]+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A single cell.
///
/// `Missing` is the explicit marker for absent or uncoercible data; every
/// aggregation in this crate skips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Normalize a raw cell as read from a file.
    ///
    /// Empty cells and the literal `nan` become `Missing`, anything that parses
    /// as a float becomes `Number`, everything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(n) => n.is_nan(),
            Value::Text(_) => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(n) if !n.is_nan())
    }

    /// Build a cell from an optional float, mapping `None` and NaN to `Missing`
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(n) if !n.is_nan() => Value::Number(n),
            _ => Value::Missing,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(text) => f.write_str(text),
            Value::Missing => f.write_str("NaN"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Number(number as f64)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Number(f64::from(number))
    }
}

/// Render a float the way a spreadsheet user expects: integral values
/// without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct non-missing values in first-seen order, compared by display form
    pub fn distinct_values(&self) -> Vec<&Value> {
        let mut seen = HashSet::new();
        self.values
            .iter()
            .filter(|value| !value.is_missing())
            .filter(|value| seen.insert(value.to_string()))
            .collect()
    }

    /// Number of distinct non-missing values
    pub fn unique_count(&self) -> usize {
        self.distinct_values().len()
    }
}

/// An ordered set of equally long, uniquely named columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, rejecting ragged or duplicate columns
    pub fn new(columns: Vec<Column>) -> Result<Self, IngestError> {
        let mut dataset = Self::default();
        for column in columns {
            dataset.add_column(column)?;
        }
        Ok(dataset)
    }

    /// Convenience constructor from `(name, values)` pairs
    pub fn from_columns<I, S>(columns: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        Self::new(
            columns
                .into_iter()
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`column`](Self::column) but reports the missing name as an error
    pub fn require_column(&self, name: &str) -> Result<&Column, AnalysisError> {
        self.column(name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append a column; its length must match the existing row count
    pub fn add_column(&mut self, column: Column) -> Result<(), IngestError> {
        if self.has_column(&column.name) {
            return Err(IngestError::Shape(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(IngestError::Shape(format!(
                "column '{}' has {} rows, expected {}",
                column.name,
                column.len(),
                self.row_count()
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// The first `rows` rows as a table
    pub fn head(&self, rows: usize) -> Table {
        let take = rows.min(self.row_count());
        Table {
            columns: self.columns.iter().map(|c| c.name.clone()).collect(),
            rows: (0..take)
                .map(|row| self.columns.iter().map(|c| c.values[row].clone()).collect())
                .collect(),
        }
    }
}

/// Normalize raw header names into unique snake_case identifiers.
///
/// Runs of punctuation become `_`, whitespace runs become `_`, and a repeated
/// name gets `_1`, `_2`, ... appended until it is unique.
pub fn sanitize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(raw.len());
    for header in raw {
        let base = NON_WORD_RUN.replace_all(header.as_ref().trim(), "_");
        let base = WHITESPACE_RUN
            .replace_all(&base.to_lowercase(), "_")
            .into_owned();

        let mut candidate = base.clone();
        let mut counter = 1;
        while cleaned.contains(&candidate) {
            candidate = format!("{}_{}", base, counter);
            counter += 1;
        }
        cleaned.push(candidate);
    }
    cleaned
}

/// Add an `age` column computed from a birth-year column.
///
/// Runs only when some column name contains both `birth` and `year` and no
/// `age` column exists yet. Returns whether the column was added.
pub fn derive_age_column(dataset: &mut Dataset, current_year: i32) -> bool {
    if dataset.has_column("age") {
        return false;
    }
    let Some(birth) = dataset.columns().iter().find(|c| {
        let name = c.name.to_lowercase();
        name.contains("birth") && name.contains("year")
    }) else {
        return false;
    };

    let source = birth.name.clone();
    let ages = birth
        .values
        .iter()
        .map(|value| {
            Value::from_option(coerce::to_number(value).map(|y| f64::from(current_year) - y))
        })
        .collect();

    // Same length as the source column, so this cannot fail.
    if dataset.add_column(Column::new("age", ages)).is_err() {
        return false;
    }
    debug!(source = %source, "derived age column");
    true
}
