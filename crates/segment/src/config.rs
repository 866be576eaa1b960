//! Configuration for the two segmentation branches.

use crate::error::SegmentError;

/// Peak detection parameters for the approximation branch.
///
/// # Example
///
/// ```
/// use migra_segment::PeakConfig;
///
/// let config = PeakConfig::new(4.0)
///     .with_min_distance(30)
///     .with_max_count(Some(6));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PeakConfig {
    /// Minimum height a local maximum needs to qualify.
    min_height: f64,
    /// Minimum index separation between retained peaks.
    min_distance: usize,
    /// Cap on the number of retained peaks; `None` is unbounded.
    max_count: Option<usize>,
}

impl PeakConfig {
    /// Creates a configuration with the given minimum peak height.
    ///
    /// Defaults: `min_distance = 1` (distinct indices only),
    /// `max_count = None` (unbounded).
    pub fn new(min_height: f64) -> Self {
        Self {
            min_height,
            min_distance: 1,
            max_count: None,
        }
    }

    /// Sets the minimum index separation between retained peaks.
    pub fn with_min_distance(mut self, min_distance: usize) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the cap on retained peaks (`None` for no cap).
    pub fn with_max_count(mut self, max_count: Option<usize>) -> Self {
        self.max_count = max_count;
        self
    }

    /// Returns the minimum peak height.
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Returns the minimum index separation.
    pub fn min_distance(&self) -> usize {
        self.min_distance
    }

    /// Returns the peak cap.
    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// [`SegmentError::InvalidParameter`] if `min_height` is NaN or infinite,
    /// or `max_count` is `Some(0)`.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !self.min_height.is_finite() {
            return Err(SegmentError::invalid(
                "min_height",
                format!("must be finite, got {}", self.min_height),
            ));
        }
        if self.max_count == Some(0) {
            return Err(SegmentError::invalid("max_count", "must be >= 1, got 0"));
        }
        Ok(())
    }
}

/// Change-point and stitching parameters for the detail branch.
///
/// # Example
///
/// ```
/// use migra_segment::ChangeConfig;
///
/// let config = ChangeConfig::new(0.8).with_min_segment_length(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeConfig {
    /// Jump in absolute detail magnitude that opens a new chunk.
    threshold: f64,
    /// Chunks shorter than this are stitched together.
    min_segment_length: usize,
}

impl ChangeConfig {
    /// Creates a configuration with the given change threshold.
    ///
    /// Defaults: `min_segment_length = 1`, which keeps every chunk.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            min_segment_length: 1,
        }
    }

    /// Sets the minimum chunk length that escapes stitching.
    pub fn with_min_segment_length(mut self, min_segment_length: usize) -> Self {
        self.min_segment_length = min_segment_length;
        self
    }

    /// Returns the change threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the minimum segment length.
    pub fn min_segment_length(&self) -> usize {
        self.min_segment_length
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// [`SegmentError::InvalidParameter`] if `threshold` is not > 0 or
    /// `min_segment_length` is zero.
    pub fn validate(&self) -> Result<(), SegmentError> {
        validate_threshold(self.threshold)?;
        validate_min_length(self.min_segment_length)
    }
}

/// Full analysis configuration: which bands to read and how to segment them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    peak_level: usize,
    peaks: PeakConfig,
    change_level: usize,
    changes: ChangeConfig,
}

impl AnalysisConfig {
    /// Creates a configuration reading approximation band `peak_level` for
    /// peaks and detail band `change_level` for change points.
    pub fn new(
        peak_level: usize,
        peaks: PeakConfig,
        change_level: usize,
        changes: ChangeConfig,
    ) -> Self {
        Self {
            peak_level,
            peaks,
            change_level,
            changes,
        }
    }

    /// Returns the approximation level analysed for peaks.
    pub fn peak_level(&self) -> usize {
        self.peak_level
    }

    /// Returns the peak detection parameters.
    pub fn peaks(&self) -> &PeakConfig {
        &self.peaks
    }

    /// Returns the detail level analysed for change points.
    pub fn change_level(&self) -> usize {
        self.change_level
    }

    /// Returns the change-point parameters.
    pub fn changes(&self) -> &ChangeConfig {
        &self.changes
    }

    /// Validates this configuration against a decomposition with `n_levels`.
    ///
    /// # Errors
    ///
    /// [`SegmentError::InvalidParameter`] if either level is outside
    /// `1..=n_levels` or a branch configuration is invalid.
    pub fn validate(&self, n_levels: usize) -> Result<(), SegmentError> {
        validate_level("peak_level", self.peak_level, n_levels)?;
        validate_level("change_level", self.change_level, n_levels)?;
        self.peaks.validate()?;
        self.changes.validate()
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), SegmentError> {
    // `!(t > 0)` also catches NaN.
    if !(threshold > 0.0) {
        return Err(SegmentError::invalid(
            "threshold",
            format!("must be > 0, got {threshold}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_min_length(min_length: usize) -> Result<(), SegmentError> {
    if min_length < 1 {
        return Err(SegmentError::invalid(
            "min_segment_length",
            "must be >= 1, got 0",
        ));
    }
    Ok(())
}

fn validate_level(name: &'static str, level: usize, n_levels: usize) -> Result<(), SegmentError> {
    if !(1..=n_levels).contains(&level) {
        return Err(SegmentError::invalid(
            name,
            format!("must be in 1..={n_levels}, got {level}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_defaults() {
        let cfg = PeakConfig::new(2.5);
        assert_eq!(cfg.min_height(), 2.5);
        assert_eq!(cfg.min_distance(), 1);
        assert_eq!(cfg.max_count(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn peak_builder_chaining() {
        let cfg = PeakConfig::new(-1.0)
            .with_min_distance(12)
            .with_max_count(Some(3));
        assert_eq!(cfg.min_distance(), 12);
        assert_eq!(cfg.max_count(), Some(3));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn peak_rejects_non_finite_height() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = PeakConfig::new(bad).validate().unwrap_err();
            assert!(matches!(
                err,
                SegmentError::InvalidParameter {
                    name: "min_height",
                    ..
                }
            ));
        }
    }

    #[test]
    fn peak_rejects_zero_max_count() {
        let err = PeakConfig::new(0.0)
            .with_max_count(Some(0))
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            SegmentError::InvalidParameter {
                name: "max_count",
                ..
            }
        ));
    }

    #[test]
    fn change_defaults() {
        let cfg = ChangeConfig::new(0.5);
        assert_eq!(cfg.threshold(), 0.5);
        assert_eq!(cfg.min_segment_length(), 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn change_rejects_non_positive_threshold() {
        for bad in [0.0, -0.1, f64::NAN, f64::NEG_INFINITY] {
            let err = ChangeConfig::new(bad).validate().unwrap_err();
            assert!(matches!(
                err,
                SegmentError::InvalidParameter {
                    name: "threshold",
                    ..
                }
            ));
        }
        assert!(ChangeConfig::new(f64::INFINITY).validate().is_ok());
    }

    #[test]
    fn change_rejects_zero_min_length() {
        let err = ChangeConfig::new(1.0)
            .with_min_segment_length(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            SegmentError::InvalidParameter {
                name: "min_segment_length",
                ..
            }
        ));
    }

    #[test]
    fn analysis_levels_must_exist() {
        let cfg = AnalysisConfig::new(4, PeakConfig::new(1.0), 2, ChangeConfig::new(1.0));
        assert!(cfg.validate(4).is_ok());

        let err = cfg.validate(3).unwrap_err();
        assert!(matches!(
            err,
            SegmentError::InvalidParameter {
                name: "peak_level",
                ..
            }
        ));

        let cfg = AnalysisConfig::new(1, PeakConfig::new(1.0), 0, ChangeConfig::new(1.0));
        let err = cfg.validate(3).unwrap_err();
        assert!(matches!(
            err,
            SegmentError::InvalidParameter {
                name: "change_level",
                ..
            }
        ));
    }

    #[test]
    fn analysis_error_priority() {
        // Level problems are reported before branch parameters.
        let cfg = AnalysisConfig::new(9, PeakConfig::new(f64::NAN), 1, ChangeConfig::new(-1.0));
        assert!(matches!(
            cfg.validate(3).unwrap_err(),
            SegmentError::InvalidParameter {
                name: "peak_level",
                ..
            }
        ));
    }
}
