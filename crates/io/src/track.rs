//! Parsed movement tracks.

use serde::Serialize;

/// One row of a track file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fix {
    /// Raw timestamp text, when a timestamp column is configured.
    pub timestamp: Option<String>,
    /// Easting or longitude, when configured and present.
    pub x: Option<f64>,
    /// Northing or latitude, when configured and present.
    pub y: Option<f64>,
    /// The analysed movement metric (typically speed).
    pub value: f64,
}

/// An ordered, non-empty sequence of fixes.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    fixes: Vec<Fix>,
}

impl Track {
    pub(crate) fn new(fixes: Vec<Fix>) -> Self {
        debug_assert!(!fixes.is_empty());
        Self { fixes }
    }

    /// The fixes in file order.
    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// Number of fixes.
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Always `false` for a track returned by the reader.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// The analysed metric, one value per fix.
    pub fn values(&self) -> Vec<f64> {
        self.fixes.iter().map(|f| f.value).collect()
    }

    /// Returns `true` if any fix carries a timestamp.
    pub fn has_timestamps(&self) -> bool {
        self.fixes.iter().any(|f| f.timestamp.is_some())
    }

    /// Returns `true` if any fix carries a coordinate.
    pub fn has_coordinates(&self) -> bool {
        self.fixes.iter().any(|f| f.x.is_some() || f.y.is_some())
    }
}
