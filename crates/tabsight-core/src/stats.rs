//! Descriptive statistics over non-missing values.
//!
//! Every function here takes already-coerced data or skips `Missing` cells
//! itself; missing values never contribute to a count, sum or extreme.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::Table;
use crate::coerce;
use crate::dataset::{Column, Dataset, Value};

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(sum(values) / values.len() as f64)
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Sample standard deviation (n - 1 denominator)
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Quantile with linear interpolation between closest ranks
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Distinct non-missing values with occurrence counts.
///
/// Sorted by descending count; equal counts keep first-seen order.
pub fn value_counts(values: &[Value]) -> Vec<(Value, u64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(Value, u64)> = Vec::new();
    for value in values.iter().filter(|v| !v.is_missing()) {
        match index.get(&value.to_string()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.to_string(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// One equal-width histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Split values into `bins` equal-width buckets over their range.
///
/// A degenerate range (all values equal) is widened by 0.5 on each side.
/// Buckets are half-open except the last, which includes the maximum.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let (Some(low), Some(high)) = (min(values), max(values)) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let (low, high) = if low == high {
        (low - 0.5, high + 0.5)
    } else {
        (low, high)
    };
    let width = (high - low) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let slot = (((value - low) / width) as usize).min(bins - 1);
        result[slot].count += 1;
    }
    result
}

const SUMMARY_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Descriptive statistics for every column, one output column per input column.
///
/// Numeric columns (every present cell is a number) fill the moment and
/// quantile rows; other columns fill `top` and `freq`.
pub fn describe(dataset: &Dataset) -> Table {
    let mut columns = vec!["statistic".to_string()];
    columns.extend(dataset.column_names().into_iter().map(String::from));

    let per_column: Vec<[Value; 11]> = dataset.columns().iter().map(describe_column).collect();

    let rows = SUMMARY_ROWS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![Value::from(*label)];
            row.extend(per_column.iter().map(|stats| stats[i].clone()));
            row
        })
        .collect();

    Table { columns, rows }
}

fn is_numeric_column(column: &Column) -> bool {
    column
        .values
        .iter()
        .filter(|v| !v.is_missing())
        .all(Value::is_number)
}

fn describe_column(column: &Column) -> [Value; 11] {
    let present = column.values.iter().filter(|v| !v.is_missing()).count();
    let count = Value::from(present as f64);
    let unique = Value::from(column.unique_count() as f64);

    if is_numeric_column(column) && present > 0 {
        let numbers = coerce::present_numbers(&column.values);
        [
            count,
            unique,
            Value::Missing,
            Value::Missing,
            Value::from_option(mean(&numbers)),
            Value::from_option(std_dev(&numbers)),
            Value::from_option(min(&numbers)),
            Value::from_option(quantile(&numbers, 0.25)),
            Value::from_option(quantile(&numbers, 0.5)),
            Value::from_option(quantile(&numbers, 0.75)),
            Value::from_option(max(&numbers)),
        ]
    } else {
        let (top, freq) = value_counts(&column.values)
            .into_iter()
            .next()
            .map(|(value, freq)| (value, Value::from(freq as f64)))
            .unwrap_or((Value::Missing, Value::Missing));
        [
            count,
            unique,
            top,
            freq,
            Value::Missing,
            Value::Missing,
            Value::Missing,
            Value::Missing,
            Value::Missing,
            Value::Missing,
            Value::Missing,
        ]
    }
}
