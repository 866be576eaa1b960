//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use migra_io::ReaderConfig;
use migra_segment::{AnalysisConfig, ChangeConfig, PeakConfig};
use migra_wavelet::WaveletFilter;

/// Parses the configured wavelet filter name.
pub fn parse_wavelet_filter(wavelet: &WaveletToml) -> Result<WaveletFilter> {
    WaveletFilter::from_name(&wavelet.filter).context("invalid [wavelet].filter")
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    if !io.delimiter.is_ascii() {
        bail!("[io].delimiter must be an ASCII character, got {:?}", io.delimiter);
    }
    Ok(ReaderConfig::default()
        .with_value_column(&io.value_column)
        .with_timestamp_column(io.timestamp_column.as_ref())
        .with_x_column(io.x_column.as_ref())
        .with_y_column(io.y_column.as_ref())
        .with_delimiter(io.delimiter as u8))
}

/// Builds a [`PeakConfig`] from the TOML peaks configuration.
pub fn build_peak_config(peaks: &PeaksToml) -> PeakConfig {
    PeakConfig::new(peaks.min_height)
        .with_min_distance(peaks.min_distance)
        .with_max_count(peaks.max_count)
}

/// Builds a [`ChangeConfig`] from the TOML change-point configuration.
pub fn build_change_config(changepoints: &ChangePointsToml) -> ChangeConfig {
    ChangeConfig::new(changepoints.threshold)
        .with_min_segment_length(changepoints.min_segment_length)
}

/// Builds and validates the [`AnalysisConfig`] against the configured levels.
pub fn build_analysis_config(config: &MigraConfig) -> Result<AnalysisConfig> {
    let analysis = AnalysisConfig::new(
        config.peaks.level,
        build_peak_config(&config.peaks),
        config.changepoints.level,
        build_change_config(&config.changepoints),
    );
    analysis
        .validate(config.wavelet.levels)
        .context("invalid segmentation parameters")?;
    Ok(analysis)
}
