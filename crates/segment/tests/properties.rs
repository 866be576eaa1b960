use approx::assert_relative_eq;
use migra_segment::{
    PeakConfig, change_points, detect_change_points, find_peaks, segment_by_peak_extents,
    stitch_short_chunks,
};

/// Pseudo-random values in [-1, 1] from a simple LCG.
fn lcg_series(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f64) / (1u64 << 31) as f64 * 2.0 - 1.0
        })
        .collect()
}

/// Random walk with occasional quantised plateaus.
fn bumpy(seed: u64, n: usize) -> Vec<f64> {
    let mut level = 0.0;
    lcg_series(seed, n)
        .into_iter()
        .map(|u| {
            level += u;
            (level * 2.0_f64).round() / 2.0
        })
        .collect()
}

#[test]
fn worked_example_peaks_and_extents() {
    let x = [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0];
    let peaks = find_peaks(&x, &PeakConfig::new(4.0).with_min_distance(3)).unwrap();

    let summary: Vec<(usize, usize, usize)> = peaks
        .iter()
        .map(|p| (p.index, p.left_bound, p.right_bound))
        .collect();
    assert_eq!(summary, vec![(3, 2, 4), (7, 6, 8)]);
    for peak in &peaks {
        assert_relative_eq!(peak.prominence, 5.0);
    }

    let labeling = segment_by_peak_extents(&peaks, x.len()).unwrap();
    assert_eq!(labeling.run_lengths(), vec![3, 2, 2, 2, 2]);
}

#[test]
fn worked_example_change_points() {
    let y = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0];
    assert_eq!(change_points(&y, 1.0).unwrap(), vec![2, 5]);
    assert_eq!(
        detect_change_points(&y, 1.0).unwrap().ids(),
        &[1, 1, 1, 2, 2, 2]
    );
}

#[test]
fn worked_example_stitching() {
    let labeling = stitch_short_chunks(&[600, 100, 50, 700], 500).unwrap();
    let runs: Vec<(u32, usize)> = labeling.runs().iter().map(|r| (r.id, r.len)).collect();
    assert_eq!(runs, vec![(1, 600), (2, 150), (3, 700)]);
}

#[test]
fn peaks_are_ordered_spaced_and_bounded() {
    for seed in 1..40 {
        let x = bumpy(seed, 300);
        for min_distance in [1, 5, 25] {
            let config = PeakConfig::new(-1e9).with_min_distance(min_distance);
            let peaks = find_peaks(&x, &config).unwrap();
            assert!(!peaks.is_empty(), "seed {seed}: a maximum always exists");

            for pair in peaks.windows(2) {
                assert!(pair[0].index < pair[1].index);
                assert!(
                    pair[1].index - pair[0].index >= min_distance,
                    "seed {seed}: peaks {} and {} closer than {min_distance}",
                    pair[0].index,
                    pair[1].index
                );
            }
            for peak in &peaks {
                assert!(peak.left_bound <= peak.index && peak.index <= peak.right_bound);
                assert!(peak.right_bound < x.len());
                assert!(peak.prominence >= 0.0);
            }
        }
    }
}

#[test]
fn max_count_keeps_a_subset_of_the_tallest() {
    for seed in 1..20 {
        let x = bumpy(seed, 200);
        let all = find_peaks(&x, &PeakConfig::new(-1e9)).unwrap();
        let capped = find_peaks(&x, &PeakConfig::new(-1e9).with_max_count(Some(3))).unwrap();
        assert_eq!(capped.len(), all.len().min(3));
        for peak in &capped {
            assert!(all.contains(peak));
        }
        let lowest_kept = capped
            .iter()
            .map(|p| p.height)
            .fold(f64::INFINITY, f64::min);
        let dropped_above = all
            .iter()
            .filter(|p| !capped.contains(p) && p.height > lowest_kept)
            .count();
        assert_eq!(dropped_above, 0, "seed {seed}");
    }
}

#[test]
fn extent_labeling_covers_signal() {
    for seed in 1..30 {
        let x = bumpy(seed, 250);
        let peaks = find_peaks(&x, &PeakConfig::new(0.0).with_min_distance(10)).unwrap();
        let labeling = segment_by_peak_extents(&peaks, x.len()).unwrap();
        assert_eq!(labeling.len(), x.len());
        assert!(labeling.ids().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(labeling.ids()[0], 1);
        assert!(labeling.n_segments() <= 2 * peaks.len() + 1);
    }
}

#[test]
fn raising_threshold_only_removes_breakpoints() {
    for seed in 1..30 {
        let y: Vec<f64> = lcg_series(seed, 400).iter().map(|u| u * 3.0).collect();
        let thresholds = [0.1, 0.5, 1.0, 2.0, 4.0, f64::INFINITY];
        let mut previous: Option<Vec<usize>> = None;
        for threshold in thresholds {
            let current = change_points(&y, threshold).unwrap();
            if let Some(prev) = &previous {
                assert!(current.iter().all(|b| prev.contains(b)), "seed {seed}");
            }
            assert_eq!(
                detect_change_points(&y, threshold).unwrap().n_segments(),
                current.len()
            );
            previous = Some(current);
        }
        assert_eq!(previous.map(|p| p.len()), Some(1));
    }
}

#[test]
fn stitching_preserves_length_and_isolates_long_chunks() {
    for seed in 1..30 {
        let lengths: Vec<usize> = lcg_series(seed, 40)
            .iter()
            .map(|u| ((u + 1.0) * 20.0) as usize)
            .collect();
        let min_length = 15;
        let labeling = stitch_short_chunks(&lengths, min_length).unwrap();
        assert_eq!(labeling.len(), lengths.iter().sum::<usize>());
        assert!(labeling.ids().windows(2).all(|w| w[0] <= w[1]));

        // Walk the chunks and check that each long chunk's id differs from its
        // neighbours.
        let ids = labeling.ids();
        let mut start = 0;
        for &len in &lengths {
            if len >= min_length {
                let id = ids[start];
                assert!(ids[start..start + len].iter().all(|&v| v == id));
                if start > 0 {
                    assert_ne!(ids[start - 1], id);
                }
                if start + len < ids.len() {
                    assert_ne!(ids[start + len], id);
                }
            }
            start += len;
        }
    }
}
