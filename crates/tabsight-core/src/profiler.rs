//! Semantic column typing

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coerce;
use crate::dataset::{Column, Dataset};

/// The inferred kind of content held by a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Numerical,
    Datetime,
    Binary,
    Categorical,
    Text,
}

impl SemanticType {
    /// All tags in reporting order
    pub const ALL: [SemanticType; 5] = [
        SemanticType::Numerical,
        SemanticType::Datetime,
        SemanticType::Binary,
        SemanticType::Categorical,
        SemanticType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Numerical => "numerical",
            SemanticType::Datetime => "datetime",
            SemanticType::Binary => "binary",
            SemanticType::Categorical => "categorical",
            SemanticType::Text => "text",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds used when typing columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Share of rows that must coerce to numbers for `numerical`
    pub numeric_ratio: f64,
    /// Share of rows that must parse as dates for `datetime`
    pub datetime_ratio: f64,
    /// Up to this many distinct values is always `categorical`
    pub categorical_max_unique: usize,
    /// Distinct/rows ratio below which a column is `categorical`
    pub categorical_unique_ratio: f64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            numeric_ratio: 0.5,
            datetime_ratio: 0.3,
            categorical_max_unique: 20,
            categorical_unique_ratio: 0.1,
        }
    }
}

/// Column name to semantic type, in dataset column order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnProfile {
    entries: Vec<(String, SemanticType)>,
}

impl ColumnProfile {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SemanticType)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn type_of(&self, column: &str) -> Option<SemanticType> {
        self.iter().find(|(name, _)| *name == column).map(|(_, kind)| kind)
    }

    /// Columns carrying any of the given tags, in profile order
    pub fn columns_of(&self, kinds: &[SemanticType]) -> Vec<&str> {
        self.iter()
            .filter(|(_, kind)| kinds.contains(kind))
            .map(|(name, _)| name)
            .collect()
    }

    /// The first column with the given tag
    pub fn first_of(&self, kind: SemanticType) -> Option<&str> {
        self.iter().find(|(_, k)| *k == kind).map(|(name, _)| name)
    }

    /// How many columns carry each tag; tags with no columns are omitted
    pub fn type_counts(&self) -> Vec<(SemanticType, usize)> {
        SemanticType::ALL
            .iter()
            .map(|kind| (*kind, self.iter().filter(|(_, k)| k == kind).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Record or replace the tag of one column
    pub fn insert(&mut self, column: impl Into<String>, kind: SemanticType) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = kind,
            None => self.entries.push((column, kind)),
        }
    }
}

/// Assigns a [`SemanticType`] to every column of a dataset
#[derive(Debug, Clone, Default)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
}

impl ColumnProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile every column of the dataset
    pub fn profile(&self, dataset: &Dataset) -> ColumnProfile {
        let mut profile = ColumnProfile::default();
        for column in dataset.columns() {
            profile.insert(column.name.clone(), self.classify(column));
        }
        profile
    }

    /// Profile one additional column, e.g. a derived one
    pub fn extend(&self, profile: &mut ColumnProfile, column: &Column) {
        profile.insert(column.name.clone(), self.classify(column));
    }

    /// Type a single column.
    ///
    /// An all-missing column has zero distinct values and therefore lands in
    /// `categorical` through the `categorical_max_unique` rule.
    pub fn classify(&self, column: &Column) -> SemanticType {
        let rows = column.len() as f64;

        let numeric = column.values.iter().filter_map(coerce::to_number).count();
        if numeric > 0 && numeric as f64 / rows > self.config.numeric_ratio {
            return SemanticType::Numerical;
        }

        let dates = column.values.iter().filter_map(coerce::to_datetime).count();
        if dates as f64 > rows * self.config.datetime_ratio {
            return SemanticType::Datetime;
        }

        let unique = column.unique_count();
        let kind = if unique == 2 {
            SemanticType::Binary
        } else if unique <= self.config.categorical_max_unique
            || (unique as f64 / rows) < self.config.categorical_unique_ratio
        {
            SemanticType::Categorical
        } else {
            SemanticType::Text
        };
        debug!(column = %column.name, unique, kind = %kind, "profiled column");
        kind
    }
}
