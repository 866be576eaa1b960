//! Merging of short chunks.

use tracing::debug;

use crate::config::validate_min_length;
use crate::error::SegmentError;
use crate::labeling::SegmentLabeling;

/// Labels consecutive chunks, merging runs of short ones.
///
/// Every chunk of at least `min_length` positions gets an id of its own. A
/// run of shorter chunks between two long ones shares a single id distinct
/// from both. Short chunks before the first long chunk share id 0.
///
/// Ids are non-decreasing but not consecutive: each long chunk reserves the
/// id after its own for a following short run, which stays unused when
/// another long chunk comes next.
///
/// # Errors
///
/// [`SegmentError::InvalidParameter`] if `min_length == 0`.
pub fn stitch_short_chunks(
    chunk_lengths: &[usize],
    min_length: usize,
) -> Result<SegmentLabeling, SegmentError> {
    validate_min_length(min_length)?;

    let total = chunk_lengths.iter().sum();
    let mut ids = Vec::with_capacity(total);
    let mut id = 0u32;
    let mut long_chunks = 0usize;
    for &len in chunk_lengths {
        if len >= min_length {
            id += 1;
            ids.extend(std::iter::repeat_n(id, len));
            id += 1;
            long_chunks += 1;
        } else {
            ids.extend(std::iter::repeat_n(id, len));
        }
    }

    debug!(
        chunks = chunk_lengths.len(),
        long_chunks, min_length, "short chunks stitched"
    );
    Ok(SegmentLabeling::from_sorted_ids(ids))
}

/// Stitches the runs of an existing labeling.
///
/// # Errors
///
/// Same as [`stitch_short_chunks`].
pub fn stitch_labeling(
    labeling: &SegmentLabeling,
    min_length: usize,
) -> Result<SegmentLabeling, SegmentError> {
    stitch_short_chunks(&labeling.run_lengths(), min_length)
}
