//! JSON run report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use migra_segment::{Analysis, AnalysisConfig, BoundaryAgreement, Peak, Run, SegmentLabeling};
use migra_wavelet::SubBands;
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

/// The three labelings of an [`Analysis`] under their output names.
pub fn named_labelings(analysis: &Analysis) -> [(&'static str, &SegmentLabeling); 3] {
    [
        ("peak_segment", analysis.peak_segments()),
        ("change_segment", analysis.change_segments()),
        ("stitched_segment", analysis.stitched_segments()),
    ]
}

/// Summary of one analysis run, serialized by [`write_report_json`].
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Where the analysed track came from.
    pub input: String,
    /// Number of fixes analysed.
    pub n_fixes: usize,
    /// Decomposition settings and variance shares.
    pub wavelet: WaveletSummary,
    /// Segmentation parameters.
    pub parameters: ParameterSummary,
    /// Retained peaks of the approximation band.
    pub peaks: Vec<Peak>,
    /// One entry per labeling.
    pub segmentations: Vec<SegmentationSummary>,
    /// Scores against a reference annotation, if one was given.
    pub agreement: Vec<AgreementSummary>,
}

/// Decomposition settings.
#[derive(Clone, Debug, Serialize)]
pub struct WaveletSummary {
    /// Filter name.
    pub filter: &'static str,
    /// Number of levels.
    pub levels: usize,
    /// Share of variance per detail level; `null` when unknown.
    pub detail_variance_fractions: Vec<f64>,
}

/// Flattened [`AnalysisConfig`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterSummary {
    pub peak_level: usize,
    pub min_peak_height: f64,
    pub min_peak_distance: usize,
    pub max_peak_count: Option<usize>,
    pub change_level: usize,
    /// `null` when infinite.
    pub change_threshold: f64,
    pub min_segment_length: usize,
}

impl From<&AnalysisConfig> for ParameterSummary {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            peak_level: config.peak_level(),
            min_peak_height: config.peaks().min_height(),
            min_peak_distance: config.peaks().min_distance(),
            max_peak_count: config.peaks().max_count(),
            change_level: config.change_level(),
            change_threshold: config.changes().threshold(),
            min_segment_length: config.changes().min_segment_length(),
        }
    }
}

/// Runs of one labeling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentationSummary {
    pub name: String,
    pub n_segments: usize,
    pub runs: Vec<Run>,
}

impl SegmentationSummary {
    /// Summarises `labeling` under `name`.
    pub fn new(name: impl Into<String>, labeling: &SegmentLabeling) -> Self {
        Self {
            name: name.into(),
            n_segments: labeling.n_segments(),
            runs: labeling.runs(),
        }
    }
}

/// Agreement of one labeling with the reference annotation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgreementSummary {
    /// Labeling that was scored.
    pub segmentation: String,
    /// Reference column it was scored against.
    pub reference: String,
    #[serde(flatten)]
    pub scores: BoundaryAgreement,
}

impl Report {
    /// Builds the report for one analysed track.
    pub fn new(
        input: impl Into<String>,
        bands: &SubBands,
        config: &AnalysisConfig,
        analysis: &Analysis,
    ) -> Self {
        Self {
            input: input.into(),
            n_fixes: analysis.len(),
            wavelet: WaveletSummary {
                filter: bands.filter().name(),
                levels: bands.n_levels(),
                detail_variance_fractions: bands.detail_variance_fractions().to_vec(),
            },
            parameters: ParameterSummary::from(config),
            peaks: analysis.peaks().to_vec(),
            segmentations: named_labelings(analysis)
                .into_iter()
                .map(|(name, labeling)| SegmentationSummary::new(name, labeling))
                .collect(),
            agreement: Vec::new(),
        }
    }

    /// Appends agreement scores for one labeling.
    pub fn with_agreement(
        mut self,
        segmentation: impl Into<String>,
        reference: impl Into<String>,
        scores: BoundaryAgreement,
    ) -> Self {
        self.agreement.push(AgreementSummary {
            segmentation: segmentation.into(),
            reference: reference.into(),
            scores,
        });
        self
    }
}

/// Write a [`Report`] as pretty-printed JSON.
///
/// Non-finite numbers (an infinite threshold, unknown variance shares) are
/// written as `null`.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created or flushed, or
/// [`IoError::Json`] if serialization fails.
pub fn write_report_json(path: &Path, report: &Report) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        path = %path.display(),
        peaks = report.peaks.len(),
        "report written"
    );
    Ok(())
}
