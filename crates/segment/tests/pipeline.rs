use migra_segment::{
    AnalysisConfig, ChangeConfig, PeakConfig, SegmentError, analyze, boundary_agreement,
    decompose_and_analyze, detect_change_points, find_peaks, segment_by_peak_extents,
    stitch_labeling,
};
use migra_wavelet::{TimeSeries, WaveletError, WaveletFilter, decompose};

/// Resting fixes with two fast transit bouts.
fn two_bouts() -> Vec<f64> {
    (0..512)
        .map(|i| {
            let base = if (100..180).contains(&i) || (330..420).contains(&i) {
                9.0
            } else {
                0.4
            };
            base + 0.2 * (i as f64 * 0.9).sin()
        })
        .collect()
}

fn config() -> AnalysisConfig {
    AnalysisConfig::new(
        5,
        PeakConfig::new(3.0).with_min_distance(64),
        2,
        ChangeConfig::new(1.0).with_min_segment_length(20),
    )
}

#[test]
fn bouts_are_found_by_both_branches() {
    let series = TimeSeries::new(two_bouts()).unwrap();
    let (bands, analysis) =
        decompose_and_analyze(&series, WaveletFilter::La8, 5, &config()).unwrap();

    assert_eq!(bands.n_levels(), 5);
    assert_eq!(analysis.len(), 512);

    let peak_positions: Vec<usize> = analysis.peaks().iter().map(|p| p.index).collect();
    assert_eq!(peak_positions.len(), 2, "peaks at {peak_positions:?}");
    assert!((100..180).contains(&peak_positions[0]));
    assert!((330..420).contains(&peak_positions[1]));

    // Each bout contributes its two extent boundaries.
    assert_eq!(analysis.peak_segments().n_segments(), 5);
    assert!(analysis.stitched_segments().n_segments() >= 2);
    assert!(
        analysis.stitched_segments().n_segments() <= analysis.change_segments().n_segments()
    );
}

#[test]
fn parallel_branches_match_sequential_calls() {
    let series = TimeSeries::new(two_bouts()).unwrap();
    let bands = decompose(&series, WaveletFilter::D4, 4).unwrap();
    let config = AnalysisConfig::new(
        4,
        PeakConfig::new(1.0).with_min_distance(16),
        1,
        ChangeConfig::new(0.5).with_min_segment_length(8),
    );
    let analysis = analyze(&bands, &config).unwrap();

    let approx = bands.approximation(4).unwrap();
    let peaks = find_peaks(approx, config.peaks()).unwrap();
    let extents = segment_by_peak_extents(&peaks, approx.len()).unwrap();
    let changes = detect_change_points(bands.detail(1).unwrap(), 0.5).unwrap();
    let stitched = stitch_labeling(&changes, 8).unwrap();

    assert_eq!(analysis.peaks(), peaks.as_slice());
    assert_eq!(analysis.peak_segments(), &extents);
    assert_eq!(analysis.change_segments(), &changes);
    assert_eq!(analysis.stitched_segments(), &stitched);
}

#[test]
fn analysis_is_deterministic() {
    let series = TimeSeries::new(two_bouts()).unwrap();
    let first = decompose_and_analyze(&series, WaveletFilter::Haar, 5, &config()).unwrap();
    let second = decompose_and_analyze(&series, WaveletFilter::Haar, 5, &config()).unwrap();
    assert_eq!(first.1, second.1);
}

#[test]
fn peak_segments_agree_with_bout_annotation() {
    let series = TimeSeries::new(two_bouts()).unwrap();
    let (_, analysis) =
        decompose_and_analyze(&series, WaveletFilter::La8, 5, &config()).unwrap();
    let annotation: Vec<&str> = (0..512)
        .map(|i| {
            if (100..180).contains(&i) || (330..420).contains(&i) {
                "transit"
            } else {
                "rest"
            }
        })
        .collect();
    let score = boundary_agreement(analysis.peak_segments(), &annotation, 40).unwrap();
    assert_eq!(score.reference, 4);
    assert_eq!(score.computed, 4);
    assert!(score.recall > 0.7, "recall {}", score.recall);
}

#[test]
fn level_beyond_decomposition_is_rejected() {
    let series = TimeSeries::new(two_bouts()).unwrap();
    let err = decompose_and_analyze(&series, WaveletFilter::Haar, 3, &config()).unwrap_err();
    assert!(matches!(
        err,
        SegmentError::InvalidParameter {
            name: "peak_level",
            ..
        }
    ));
}

#[test]
fn wavelet_errors_pass_through() {
    let series = TimeSeries::new(vec![1.0; 16]).unwrap();
    let err = decompose_and_analyze(&series, WaveletFilter::La16, 3, &config()).unwrap_err();
    assert!(matches!(
        err,
        SegmentError::Wavelet(WaveletError::LevelTooHigh { .. })
    ));
}
