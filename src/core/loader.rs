use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, error};

use crate::core::types::{ContentType, Dataset, Row, coerce_release_year};
use crate::error::LoadError;

const REQUIRED_COLUMNS: [&str; 3] = ["release_year", "type", "country"];

/// Raw CSV record. Columns are matched by header name; extra columns are
/// ignored and a missing column makes the source malformed.
#[derive(Debug, Deserialize)]
struct RawRecord {
    release_year: String,
    #[serde(rename = "type")]
    content_type: String,
    country: String,
}

impl From<RawRecord> for Row {
    fn from(raw: RawRecord) -> Self {
        Self {
            release_year: coerce_release_year(&raw.release_year),
            content_type: ContentType::from_label(raw.content_type.trim()),
            country: raw.country,
        }
    }
}

/// Loads the dataset from a CSV file on disk.
///
/// Failures are logged at `error` level before being returned; callers must
/// not attempt to render after an error.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        let err = LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        error!(error = %err, "dataset load failed");
        err
    })?;
    load_dataset_from_reader(file, &path.display().to_string())
}

/// Loads the dataset from any CSV byte stream. `source_name` only labels
/// diagnostics.
pub fn load_dataset_from_reader<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let malformed = |source: csv::Error| {
        let err = LoadError::Malformed {
            source_name: source_name.to_owned(),
            source,
        };
        error!(error = %err, "dataset load failed");
        err
    };

    let headers = csv_reader.headers().map_err(malformed)?;
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        let err = LoadError::MissingColumn {
            source_name: source_name.to_owned(),
            column,
        };
        error!(error = %err, "dataset load failed");
        return Err(err);
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<RawRecord>() {
        let raw = record.map_err(malformed)?;
        rows.push(Row::from(raw));
    }

    let invalid_years = rows.iter().filter(|row| row.release_year.is_none()).count();
    debug!(
        source = source_name,
        row_count = rows.len(),
        invalid_years,
        "dataset loaded"
    );
    Ok(Dataset::new(rows))
}
