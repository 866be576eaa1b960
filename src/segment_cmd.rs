//! Segment command: decompose a track and run both segmentation branches.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use migra_io::{
    Report, SegmentTable, named_labelings, read_labels, read_track, write_report_json,
    write_segments_csv,
};
use migra_segment::{Analysis, boundary_agreement, decompose_and_analyze};
use migra_wavelet::TimeSeries;

use crate::cli::SegmentArgs;
use crate::config::{self, CompareToml};
use crate::convert;

/// Run the segmentation pipeline.
pub fn run(args: SegmentArgs) -> Result<()> {
    let _cmd = info_span!("segment").entered();
    // 1. Load project TOML
    let config = config::load(&args.config)?;
    let filter = convert::parse_wavelet_filter(&config.wavelet)?;
    let analysis_cfg = convert::build_analysis_config(&config)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    // 2. Read the track
    let input = config.io.resolve_input(args.input)?;
    let track = read_track(&input, &reader_cfg)
        .with_context(|| format!("failed to read track: {}", input.display()))?;
    let series = TimeSeries::new(track.values())
        .with_context(|| format!("track {} cannot be decomposed", input.display()))?;

    // 3. Decompose and segment
    info!(
        filter = filter.name(),
        levels = config.wavelet.levels,
        fixes = track.len(),
        "running analysis"
    );
    let (bands, analysis) =
        decompose_and_analyze(&series, filter, config.wavelet.levels, &analysis_cfg)
            .context("segmentation failed")?;
    info!(
        peaks = analysis.peaks().len(),
        peak_segments = analysis.peak_segments().n_segments(),
        stitched_segments = analysis.stitched_segments().n_segments(),
        "analysis finished"
    );

    // 4. Optional comparison with an annotation
    let mut report = Report::new(input.display().to_string(), &bands, &analysis_cfg, &analysis);
    if let Some(compare) = &config.compare {
        report = add_agreement(report, compare, &input, reader_cfg.delimiter(), &analysis)?;
    }

    // 5. Write outputs
    let output_dir = args.output_dir.unwrap_or(config.io.output_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let peak_level = analysis_cfg.peak_level();
    let change_level = analysis_cfg.change_level();
    // Both levels were validated against the decomposition.
    let approx = bands.approximation(peak_level).unwrap_or_default();
    let detail = bands.detail(change_level).unwrap_or_default();
    let mut table = SegmentTable::new(&track)
        .with_band(format!("approx_{peak_level}"), approx)
        .with_band(format!("detail_{change_level}"), detail);
    for (name, labeling) in named_labelings(&analysis) {
        table = table.with_labeling(name, labeling);
    }

    let segments_path = output_dir.join("segments.csv");
    write_segments_csv(&segments_path, &table)
        .with_context(|| format!("failed to write segments: {}", segments_path.display()))?;

    let report_path = output_dir.join("report.json");
    write_report_json(&report_path, &report)
        .with_context(|| format!("failed to write report: {}", report_path.display()))?;

    Ok(())
}

fn add_agreement(
    mut report: Report,
    compare: &CompareToml,
    input: &Path,
    delimiter: u8,
    analysis: &Analysis,
) -> Result<Report> {
    let reference = compare.reference.as_deref().unwrap_or(input);
    let labels = read_labels(reference, &compare.column, delimiter).with_context(|| {
        format!(
            "failed to read reference column '{}' from {}",
            compare.column,
            reference.display()
        )
    })?;

    for (name, labeling) in named_labelings(analysis) {
        let scores = boundary_agreement(labeling, &labels, compare.tolerance)
            .with_context(|| format!("cannot compare {name} with '{}'", compare.column))?;
        info!(
            segmentation = name,
            precision = scores.precision,
            recall = scores.recall,
            f1 = scores.f1,
            "agreement with reference"
        );
        report = report.with_agreement(name, &compare.column, scores);
    }
    Ok(report)
}
