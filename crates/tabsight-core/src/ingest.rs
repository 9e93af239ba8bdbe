//! Loading delimited files into a [`Dataset`]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::dataset::{sanitize_headers, Column, Dataset, Value};
use crate::error::IngestError;

/// Load a file, choosing the reader from its extension
pub fn load_path(path: &Path) -> Result<Dataset, IngestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let delimiter = match extension.as_str() {
        "csv" | "txt" => b',',
        "tsv" => b'\t',
        other => return Err(IngestError::UnsupportedFormat(other.to_string())),
    };

    let dataset = load_delimited(File::open(path)?, delimiter)?;
    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load a comma-separated file regardless of its extension
pub fn load_csv_path(path: &Path) -> Result<Dataset, IngestError> {
    load_delimited(File::open(path)?, b',')
}

/// Load comma-separated data from any reader
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, IngestError> {
    load_delimited(reader, b',')
}

/// Load delimited data. The first record is the header row; its names are
/// sanitized, and short records are padded with missing cells.
pub fn load_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Empty);
    }
    let headers = sanitize_headers(&raw_headers);

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (index, cells) in columns.iter_mut().enumerate() {
            cells.push(record.get(index).map(Value::parse).unwrap_or(Value::Missing));
        }
    }

    Dataset::new(
        headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}
