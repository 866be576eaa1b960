//! Labeling by peak extents.

use tracing::debug;

use crate::error::SegmentError;
use crate::labeling::SegmentLabeling;
use crate::peaks::Peak;

/// Labels `0..signal_len` by the extents of `peaks`.
///
/// The boundary list is each peak's `left_bound` then `right_bound` in index
/// order, closed by `signal_len - 1`. Position `p` gets the smallest 1-based
/// `j` with `p <= boundary_j`. A boundary that does not advance past its
/// predecessor owns no positions, so its id is skipped.
///
/// # Errors
///
/// [`SegmentError::EmptyInput`] if `signal_len == 0`,
/// [`SegmentError::InvalidParameter`] if a bound lies outside the signal.
pub fn segment_by_peak_extents(
    peaks: &[Peak],
    signal_len: usize,
) -> Result<SegmentLabeling, SegmentError> {
    if signal_len == 0 {
        return Err(SegmentError::EmptyInput { input: "signal" });
    }
    if let Some(peak) = peaks
        .iter()
        .find(|p| p.left_bound.max(p.right_bound) >= signal_len)
    {
        return Err(SegmentError::invalid(
            "peaks",
            format!(
                "peak at {} has bounds [{}, {}] outside a signal of length {signal_len}",
                peak.index, peak.left_bound, peak.right_bound
            ),
        ));
    }

    let mut ordered: Vec<&Peak> = peaks.iter().collect();
    ordered.sort_by_key(|p| p.index);
    let boundaries: Vec<usize> = ordered
        .iter()
        .flat_map(|p| [p.left_bound, p.right_bound])
        .chain(std::iter::once(signal_len - 1))
        .collect();

    let mut ids = Vec::with_capacity(signal_len);
    for (j, &boundary) in boundaries.iter().enumerate() {
        if boundary >= ids.len() {
            ids.resize(boundary + 1, j as u32 + 1);
        }
    }

    let labeling = SegmentLabeling::from_sorted_ids(ids);
    debug!(
        peaks = peaks.len(),
        boundaries = boundaries.len(),
        segments = labeling.n_segments(),
        "peak extent labeling built"
    );
    Ok(labeling)
}
