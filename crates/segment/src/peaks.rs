//! Peak detection with height, distance and prominence semantics.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::config::PeakConfig;
use crate::error::{SegmentError, check_samples};

/// A retained local maximum of the analysed band.
///
/// Bounds are the positions where the band first falls to
/// `height - prominence / 2` on either side, clipped to the sequence.
/// Always `left_bound <= index <= right_bound`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Peak {
    /// Position of the maximum (leftmost sample of a plateau).
    pub index: usize,
    /// Band value at `index`.
    pub height: f64,
    /// Height above the higher of the two bounding troughs.
    pub prominence: f64,
    /// Left half-prominence crossing.
    pub left_bound: usize,
    /// Right half-prominence crossing.
    pub right_bound: usize,
}

impl Peak {
    /// Reference level of the half-prominence bounds.
    pub fn half_prominence_level(&self) -> f64 {
        self.height - self.prominence / 2.0
    }

    /// Number of positions spanned by the bounds, inclusive.
    pub fn width(&self) -> usize {
        self.right_bound - self.left_bound + 1
    }
}

/// Finds the peaks of `x` that satisfy `config`, ordered by index.
///
/// Selection runs in four steps: plateau-collapsed local maxima, height
/// filter, greedy tallest-first distance filter, and the optional cap on the
/// count. Prominence and bounds are computed for the survivors only.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SegmentError::InvalidParameter`] | non-finite `min_height`, `max_count == Some(0)` |
/// | [`SegmentError::EmptyInput`] | `x` is empty |
/// | [`SegmentError::NonFiniteInput`] | `x` contains NaN or infinity |
pub fn find_peaks(x: &[f64], config: &PeakConfig) -> Result<Vec<Peak>, SegmentError> {
    config.validate()?;
    check_samples(x, "signal")?;

    let candidates: Vec<usize> = local_maxima(x)
        .into_iter()
        .filter(|&i| x[i] >= config.min_height())
        .collect();
    let n_candidates = candidates.len();

    let mut kept = select_by_distance(x, &candidates, config.min_distance());
    if let Some(max_count) = config.max_count() {
        if kept.len() > max_count {
            kept.sort_by(|&a, &b| by_height_desc(x, a, b));
            kept.truncate(max_count);
            kept.sort_unstable();
        }
    }

    let peaks: Vec<Peak> = kept.into_iter().map(|i| describe(x, i)).collect();
    debug!(
        len = x.len(),
        candidates = n_candidates,
        retained = peaks.len(),
        "peak detection finished"
    );
    Ok(peaks)
}

/// Indices of plateau-collapsed local maxima, ascending.
///
/// A run of equal samples qualifies when every existing outside neighbour is
/// strictly lower; it is reported at its leftmost index. Sequence ends are
/// compared against their single neighbour only.
pub(crate) fn local_maxima(x: &[f64]) -> Vec<usize> {
    let n = x.len();
    let mut out = Vec::new();
    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && x[end + 1] == x[start] {
            end += 1;
        }
        let rises_into = start == 0 || x[start - 1] < x[start];
        let falls_after = end + 1 == n || x[end + 1] < x[start];
        if rises_into && falls_after {
            out.push(start);
        }
        start = end + 1;
    }
    out
}

/// Tallest first, lower index first among equal heights.
fn by_height_desc(x: &[f64], a: usize, b: usize) -> Ordering {
    x[b].total_cmp(&x[a]).then(a.cmp(&b))
}

/// Greedy tallest-first selection keeping accepted peaks `min_distance` apart.
fn select_by_distance(x: &[f64], candidates: &[usize], min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 {
        return candidates.to_vec();
    }
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|&a, &b| by_height_desc(x, a, b));

    let reach = min_distance - 1;
    let mut accepted = BTreeSet::new();
    for cand in ranked {
        let window = cand.saturating_sub(reach)..=cand.saturating_add(reach);
        if accepted.range(window).next().is_none() {
            accepted.insert(cand);
        }
    }
    accepted.into_iter().collect()
}

/// Height minus the higher of the two bounding troughs.
///
/// Each side is scanned until a sample at or above the peak height (another
/// peak of equal or greater height) or the end of the sequence; its trough is
/// the minimum seen strictly before that sample. A side without samples has
/// no trough.
pub(crate) fn prominence(x: &[f64], index: usize) -> f64 {
    let height = x[index];
    let within = |v: &&f64| **v < height;
    let left = x[..index]
        .iter()
        .rev()
        .take_while(within)
        .copied()
        .reduce(f64::min);
    let right = x[index + 1..]
        .iter()
        .take_while(within)
        .copied()
        .reduce(f64::min);
    let base = match (left, right) {
        (Some(l), Some(r)) => l.max(r),
        (Some(trough), None) | (None, Some(trough)) => trough,
        (None, None) => height,
    };
    height - base
}

fn describe(x: &[f64], index: usize) -> Peak {
    let height = x[index];
    let prominence = prominence(x, index);
    let level = height - prominence / 2.0;
    let left_bound = (0..index).rev().find(|&k| x[k] <= level).unwrap_or(0);
    let right_bound = (index + 1..x.len())
        .find(|&k| x[k] <= level)
        .unwrap_or(x.len() - 1);
    Peak {
        index,
        height,
        prominence,
        left_bound,
        right_bound,
    }
}
