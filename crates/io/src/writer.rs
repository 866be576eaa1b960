//! CSV export of per-fix segmentations and sub-bands.

use std::path::Path;

use migra_segment::SegmentLabeling;
use migra_wavelet::SubBands;
use tracing::info;

use crate::error::IoError;
use crate::track::Track;
use crate::validate::{validate_column_lengths, validate_column_names};

/// Per-fix output table: the track, selected bands and labelings.
///
/// Columns are `index`, then `timestamp`, `x` and `y` when the track has
/// them, then `value`, every added band and every added labeling, in the
/// order they were added.
#[derive(Debug, Clone)]
pub struct SegmentTable<'a> {
    track: &'a Track,
    bands: Vec<(String, &'a [f64])>,
    labelings: Vec<(String, &'a SegmentLabeling)>,
}

impl<'a> SegmentTable<'a> {
    /// Starts a table over `track`.
    pub fn new(track: &'a Track) -> Self {
        Self {
            track,
            bands: Vec::new(),
            labelings: Vec::new(),
        }
    }

    /// Adds a band column.
    pub fn with_band(mut self, name: impl Into<String>, values: &'a [f64]) -> Self {
        self.bands.push((name.into(), values));
        self
    }

    /// Adds a labeling column.
    pub fn with_labeling(mut self, name: impl Into<String>, labeling: &'a SegmentLabeling) -> Self {
        self.labelings.push((name.into(), labeling));
        self
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.track.len()
    }

    /// Header row.
    pub fn header(&self) -> Vec<&str> {
        let mut header = vec!["index"];
        if self.track.has_timestamps() {
            header.push("timestamp");
        }
        if self.track.has_coordinates() {
            header.extend(["x", "y"]);
        }
        header.push("value");
        header.extend(self.bands.iter().map(|(name, _)| name.as_str()));
        header.extend(self.labelings.iter().map(|(name, _)| name.as_str()));
        header
    }

    /// Validates column names and lengths.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every column whose length
    /// differs from the track, plus empty or duplicate column names.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_column_names(self.header()).finish()?;
        let columns = self
            .bands
            .iter()
            .map(|(name, values)| ("band", name.as_str(), values.len()))
            .chain(
                self.labelings
                    .iter()
                    .map(|(name, l)| ("labeling", name.as_str(), l.len())),
            );
        validate_column_lengths(self.n_rows(), columns).finish()
    }

    fn row(&self, i: usize) -> Vec<String> {
        let fix = &self.track.fixes()[i];
        let mut row = vec![i.to_string()];
        if self.track.has_timestamps() {
            row.push(fix.timestamp.clone().unwrap_or_default());
        }
        if self.track.has_coordinates() {
            row.push(fix.x.map(|v| v.to_string()).unwrap_or_default());
            row.push(fix.y.map(|v| v.to_string()).unwrap_or_default());
        }
        row.push(fix.value.to_string());
        row.extend(self.bands.iter().map(|(_, values)| values[i].to_string()));
        row.extend(self.labelings.iter().map(|(_, l)| l.ids()[i].to_string()));
        row
    }
}

/// Write a [`SegmentTable`] as CSV, one row per fix.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the table is inconsistent, or
/// [`IoError::Csv`] if writing fails.
pub fn write_segments_csv(path: &Path, table: &SegmentTable<'_>) -> Result<(), IoError> {
    table.validate()?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.header())?;
    for i in 0..table.n_rows() {
        writer.write_record(table.row(i))?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = table.n_rows(), "segments written");
    Ok(())
}

/// Write every approximation and detail band as CSV.
///
/// Columns are `index`, `approx_1..approx_L`, `detail_1..detail_L`.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if writing fails.
pub fn write_bands_csv(path: &Path, bands: &SubBands) -> Result<(), IoError> {
    let levels = 1..=bands.n_levels();
    let columns: Vec<&[f64]> = levels
        .clone()
        .filter_map(|j| bands.approximation(j))
        .chain(levels.clone().filter_map(|j| bands.detail(j)))
        .collect();

    let mut header = vec!["index".to_string()];
    header.extend(levels.clone().map(|j| format!("approx_{j}")));
    header.extend(levels.map(|j| format!("detail_{j}")));

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;
    for i in 0..bands.series_len() {
        let row = std::iter::once(i.to_string()).chain(columns.iter().map(|c| c[i].to_string()));
        writer.write_record(row)?;
    }
    writer.flush()?;
    info!(
        path = %path.display(),
        levels = bands.n_levels(),
        rows = bands.series_len(),
        "bands written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Fix;

    fn track(n: usize, with_time: bool) -> Track {
        Track::new(
            (0..n)
                .map(|i| Fix {
                    timestamp: with_time.then(|| format!("t{i}")),
                    x: None,
                    y: None,
                    value: i as f64,
                })
                .collect(),
        )
    }

    #[test]
    fn header_follows_track_content() {
        let plain = track(3, false);
        let labeling = SegmentLabeling::new(vec![1, 1, 2]).unwrap();
        let table = SegmentTable::new(&plain).with_labeling("peaks", &labeling);
        assert_eq!(table.header(), vec!["index", "value", "peaks"]);

        let timed = track(3, true);
        let band = [0.5, 0.5, 0.5];
        let table = SegmentTable::new(&timed).with_band("approx_4", &band);
        assert_eq!(table.header(), vec!["index", "timestamp", "value", "approx_4"]);
        assert_eq!(table.row(2), vec!["2", "t2", "2", "0.5"]);
    }

    #[test]
    fn validate_reports_length_mismatch() {
        let t = track(4, false);
        let short = [0.0; 3];
        let labeling = SegmentLabeling::new(vec![1; 5]).unwrap();
        let table = SegmentTable::new(&t)
            .with_band("detail_1", &short)
            .with_labeling("stitched", &labeling);
        match table.validate().unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_clashing_names() {
        let t = track(2, false);
        let band = [1.0, 2.0];
        let table = SegmentTable::new(&t).with_band("value", &band);
        assert!(matches!(
            table.validate(),
            Err(IoError::Validation { count: 1, .. })
        ));
    }
}
