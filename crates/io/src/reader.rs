//! Track CSV reader configuration and orchestration.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::IoError;
use crate::track::{Fix, Track};
use crate::validate::{ValidationCollector, validate_column_names};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a movement track from a CSV file.
///
/// Columns are looked up by header name. The [`Default`] implementation reads
/// the metric from a `speed` column and ignores timestamps and coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Header of the analysed metric column.
    value_column: String,
    /// Optional header of the timestamp column.
    timestamp_column: Option<String>,
    /// Optional header of the x (easting/longitude) column.
    x_column: Option<String>,
    /// Optional header of the y (northing/latitude) column.
    y_column: Option<String>,
    /// Field delimiter.
    delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            value_column: "speed".into(),
            timestamp_column: None,
            x_column: None,
            y_column: None,
            delimiter: b',',
        }
    }
}

impl ReaderConfig {
    /// Set the metric column name.
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    /// Set the timestamp column name, or `None` to skip timestamps.
    pub fn with_timestamp_column(mut self, name: Option<impl Into<String>>) -> Self {
        self.timestamp_column = name.map(Into::into);
        self
    }

    /// Set the x coordinate column name, or `None` to skip it.
    pub fn with_x_column(mut self, name: Option<impl Into<String>>) -> Self {
        self.x_column = name.map(Into::into);
        self
    }

    /// Set the y coordinate column name, or `None` to skip it.
    pub fn with_y_column(mut self, name: Option<impl Into<String>>) -> Self {
        self.y_column = name.map(Into::into);
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the metric column name.
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a column name is empty or used for
    /// two fields, or the delimiter is not a printable ASCII character.
    pub fn validate(&self) -> Result<(), IoError> {
        let names = std::iter::once(self.value_column.as_str()).chain(
            [&self.timestamp_column, &self.x_column, &self.y_column]
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        let mut c = validate_column_names(names);
        if !self.delimiter.is_ascii_punctuation() && self.delimiter != b'\t' {
            c.push(format!(
                "delimiter must be ASCII punctuation or tab, got byte {}",
                self.delimiter
            ));
        }
        c.finish()
    }
}

// ---------------------------------------------------------------------------
// read_track / read_labels
// ---------------------------------------------------------------------------

/// Read a movement track from a CSV file with a header row.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::Validation`] | invalid `config` (checked before opening) |
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::MissingColumn`] | a configured column is absent |
/// | [`IoError::InvalidValue`] | a metric cell is not a finite number, or a coordinate cell does not parse |
/// | [`IoError::EmptyTrack`] | no data rows |
/// | [`IoError::Csv`] | malformed CSV |
pub fn read_track(path: &Path, config: &ReaderConfig) -> Result<Track, IoError> {
    config.validate()?;
    let mut reader = open(path, config.delimiter)?;
    let headers = reader.headers()?.clone();

    let value_idx = column_index(&headers, &config.value_column, path)?;
    let optional = |name: &Option<String>| -> Result<Option<usize>, IoError> {
        name.as_deref()
            .map(|n| column_index(&headers, n, path))
            .transpose()
    };
    let timestamp_idx = optional(&config.timestamp_column)?;
    let x_idx = optional(&config.x_column)?;
    let y_idx = optional(&config.y_column)?;

    let mut fixes = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let value = parse_finite(&record, value_idx, &config.value_column, row)?;
        let timestamp = timestamp_idx
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let x = parse_optional(&record, x_idx, config.x_column.as_deref(), row)?;
        let y = parse_optional(&record, y_idx, config.y_column.as_deref(), row)?;
        fixes.push(Fix {
            timestamp,
            x,
            y,
            value,
        });
    }

    if fixes.is_empty() {
        return Err(IoError::EmptyTrack {
            path: path.to_path_buf(),
        });
    }

    info!(
        path = %path.display(),
        fixes = fixes.len(),
        column = %config.value_column,
        "track loaded"
    );
    Ok(Track::new(fixes))
}

/// Read one column of labels (e.g. a behavioural annotation) as text.
///
/// `delimiter` should match the file; when labels come from the track itself
/// pass [`ReaderConfig::delimiter`].
///
/// # Errors
///
/// [`IoError::FileNotFound`], [`IoError::MissingColumn`],
/// [`IoError::EmptyTrack`] or [`IoError::Csv`], as for [`read_track`].
pub fn read_labels(path: &Path, column: &str, delimiter: u8) -> Result<Vec<String>, IoError> {
    let mut reader = open(path, delimiter)?;
    let headers = reader.headers()?.clone();
    let idx = column_index(&headers, column, path)?;

    let labels = reader
        .records()
        .map(|record| -> Result<String, IoError> {
            Ok(record?.get(idx).unwrap_or_default().to_owned())
        })
        .collect::<Result<Vec<_>, _>>()?;

    if labels.is_empty() {
        return Err(IoError::EmptyTrack {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), column, rows = labels.len(), "labels loaded");
    Ok(labels)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(path: &Path, delimiter: u8) -> Result<csv::Reader<std::fs::File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_path(path)?)
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, IoError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| IoError::MissingColumn {
            name: name.to_owned(),
            path: path.to_path_buf(),
        })
}

fn invalid(column: &str, row: usize, value: &str) -> IoError {
    IoError::InvalidValue {
        column: column.to_owned(),
        row,
        value: value.to_owned(),
    }
}

fn parse_finite(
    record: &StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<f64, IoError> {
    let raw = record.get(idx).unwrap_or_default();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(column, row, raw))
}

/// Empty cells are `None`; anything else must parse.
fn parse_optional(
    record: &StringRecord,
    idx: Option<usize>,
    column: Option<&str>,
    row: usize,
) -> Result<Option<f64>, IoError> {
    let (Some(idx), Some(column)) = (idx, column) else {
        return Ok(None);
    };
    match record.get(idx).unwrap_or_default() {
        "" => Ok(None),
        raw => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(column, row, raw)),
    }
}
