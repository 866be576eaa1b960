//! Both segmentation branches over one decomposition.

use migra_wavelet::{SubBands, TimeSeries, WaveletFilter, decompose};
use tracing::debug;

use crate::changepoint::detect_change_points;
use crate::config::{AnalysisConfig, ChangeConfig, PeakConfig};
use crate::error::SegmentError;
use crate::extent::segment_by_peak_extents;
use crate::labeling::SegmentLabeling;
use crate::peaks::{Peak, find_peaks};
use crate::stitch::stitch_labeling;

/// Output of [`analyze`].
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    peaks: Vec<Peak>,
    peak_segments: SegmentLabeling,
    change_segments: SegmentLabeling,
    stitched_segments: SegmentLabeling,
}

impl Analysis {
    /// Peaks of the approximation band, by index.
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    /// Labeling from the peak extents.
    pub fn peak_segments(&self) -> &SegmentLabeling {
        &self.peak_segments
    }

    /// Labeling from the detail-band change points, before stitching.
    pub fn change_segments(&self) -> &SegmentLabeling {
        &self.change_segments
    }

    /// Change-point labeling after short chunks are stitched.
    pub fn stitched_segments(&self) -> &SegmentLabeling {
        &self.stitched_segments
    }

    /// Number of labeled positions.
    pub fn len(&self) -> usize {
        self.peak_segments.len()
    }

    /// Returns `true` if nothing was labeled.
    pub fn is_empty(&self) -> bool {
        self.peak_segments.is_empty()
    }
}

/// Runs the peak-extent and change-point branches over `bands`.
///
/// The branches are independent and run on the rayon pool; the result is
/// the same as running them one after the other.
///
/// # Errors
///
/// [`SegmentError::InvalidParameter`] for an invalid `config` or a level the
/// decomposition does not have, plus whatever the branch operations return.
pub fn analyze(bands: &SubBands, config: &AnalysisConfig) -> Result<Analysis, SegmentError> {
    config.validate(bands.n_levels())?;
    let approximation = band(bands.approximation(config.peak_level()), "peak_level")?;
    let detail = band(bands.detail(config.change_level()), "change_level")?;

    let (peak_result, change_result) = rayon::join(
        || peak_branch(approximation, config.peaks()),
        || change_branch(detail, config.changes()),
    );
    let (peaks, peak_segments) = peak_result?;
    let (change_segments, stitched_segments) = change_result?;

    debug!(
        len = bands.series_len(),
        peaks = peaks.len(),
        peak_segments = peak_segments.n_segments(),
        change_segments = change_segments.n_segments(),
        stitched_segments = stitched_segments.n_segments(),
        "analysis finished"
    );
    Ok(Analysis {
        peaks,
        peak_segments,
        change_segments,
        stitched_segments,
    })
}

/// Decomposes `series` and runs [`analyze`] on the bands.
///
/// # Errors
///
/// [`SegmentError::Wavelet`] if the decomposition fails, otherwise as
/// [`analyze`].
pub fn decompose_and_analyze(
    series: &TimeSeries,
    filter: WaveletFilter,
    levels: usize,
    config: &AnalysisConfig,
) -> Result<(SubBands, Analysis), SegmentError> {
    let bands = decompose(series, filter, levels)?;
    let analysis = analyze(&bands, config)?;
    Ok((bands, analysis))
}

fn band<'a>(band: Option<&'a [f64]>, name: &'static str) -> Result<&'a [f64], SegmentError> {
    band.ok_or_else(|| SegmentError::invalid(name, "level not present in the decomposition"))
}

fn peak_branch(
    approximation: &[f64],
    config: &PeakConfig,
) -> Result<(Vec<Peak>, SegmentLabeling), SegmentError> {
    let peaks = find_peaks(approximation, config)?;
    let labeling = segment_by_peak_extents(&peaks, approximation.len())?;
    Ok((peaks, labeling))
}

fn change_branch(
    detail: &[f64],
    config: &ChangeConfig,
) -> Result<(SegmentLabeling, SegmentLabeling), SegmentError> {
    let labeling = detect_change_points(detail, config.threshold())?;
    let stitched = stitch_labeling(&labeling, config.min_segment_length())?;
    Ok((labeling, stitched))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> SubBands {
        // One level: approximation carries two bumps, detail one burst.
        let approx = vec![0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0];
        let detail = vec![0.0, 0.0, 0.0, 0.0, 3.0, -3.0, 3.0, 0.0, 0.0, 0.0, 0.0];
        SubBands::from_bands(vec![approx], vec![detail], WaveletFilter::Haar).unwrap()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::new(
            1,
            PeakConfig::new(4.0).with_min_distance(3),
            1,
            ChangeConfig::new(1.0).with_min_segment_length(2),
        )
    }

    #[test]
    fn runs_both_branches() {
        let analysis = analyze(&bands(), &config()).unwrap();
        assert_eq!(analysis.len(), 11);
        assert_eq!(analysis.peaks().len(), 2);
        assert_eq!(
            analysis.peak_segments().ids(),
            &[1, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]
        );
        // Rise into the burst at index 3 -> 4; the second jump (index 5 -> 6)
        // is a rise from |-3| to |3| and does not count.
        assert_eq!(
            analysis.change_segments().ids(),
            &[1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2]
        );
        assert_eq!(analysis.stitched_segments().run_lengths(), vec![4, 7]);
    }

    #[test]
    fn missing_level_is_invalid() {
        let config = AnalysisConfig::new(2, PeakConfig::new(1.0), 1, ChangeConfig::new(1.0));
        assert!(matches!(
            analyze(&bands(), &config),
            Err(SegmentError::InvalidParameter {
                name: "peak_level",
                ..
            })
        ));
    }
}
