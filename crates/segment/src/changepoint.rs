//! Threshold change points on a detail band.

use tracing::debug;

use crate::config::validate_threshold;
use crate::error::{SegmentError, check_samples};
use crate::labeling::{Chunk, SegmentLabeling};

/// Chunk-closing positions of `y`.
///
/// Position `i` closes a chunk when `|y[i + 1]| - |y[i]| > threshold`, that
/// is when the band turns from quiet to energetic. The last position always
/// closes the final chunk.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SegmentError::InvalidParameter`] | `threshold` is not > 0 (NaN included) |
/// | [`SegmentError::EmptyInput`] | `y` is empty |
/// | [`SegmentError::NonFiniteInput`] | `y` contains NaN or infinity |
pub fn change_points(y: &[f64], threshold: f64) -> Result<Vec<usize>, SegmentError> {
    validate_threshold(threshold)?;
    check_samples(y, "detail band")?;

    let mut breakpoints: Vec<usize> = y
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1].abs() - w[0].abs() > threshold)
        .map(|(i, _)| i)
        .collect();
    breakpoints.push(y.len() - 1);
    Ok(breakpoints)
}

/// Splits `0..=breakpoints.last()` into chunks ending at each breakpoint.
///
/// Breakpoints must be strictly increasing.
pub fn split_chunks(breakpoints: &[usize]) -> Vec<Chunk> {
    let mut start = 0;
    breakpoints
        .iter()
        .map(|&end| {
            let chunk = Chunk {
                start,
                len: end + 1 - start,
            };
            start = end + 1;
            chunk
        })
        .collect()
}

/// Labels the chunks of `y` delimited by [`change_points`] as `1..=K`.
///
/// # Errors
///
/// Same as [`change_points`].
pub fn detect_change_points(y: &[f64], threshold: f64) -> Result<SegmentLabeling, SegmentError> {
    let breakpoints = change_points(y, threshold)?;
    let chunks = split_chunks(&breakpoints);
    debug!(
        len = y.len(),
        threshold,
        chunks = chunks.len(),
        "change points detected"
    );
    Ok(SegmentLabeling::from_chunks(&chunks))
}
