//! Agreement between a computed labeling and a reference annotation.

use serde::Serialize;

use crate::error::SegmentError;
use crate::labeling::{SegmentLabeling, change_positions};

/// Boundary matching scores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundaryAgreement {
    /// Matched share of computed boundaries (1.0 when there are none).
    pub precision: f64,
    /// Matched share of reference boundaries (1.0 when there are none).
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Boundaries in the computed labeling.
    pub computed: usize,
    /// Boundaries in the reference labeling.
    pub reference: usize,
    /// One-to-one matches within the tolerance.
    pub matched: usize,
    /// Maximum position offset of a match.
    pub tolerance: usize,
}

/// Scores the boundaries of `computed` against those of `reference`.
///
/// A boundary is a position whose label differs from its predecessor's.
/// Pairs at most `tolerance` apart are matched one-to-one, closest first;
/// equal distances resolve by computed position, then reference position.
///
/// # Errors
///
/// [`SegmentError::DimensionMismatch`] if `reference` and `computed` differ
/// in length.
pub fn boundary_agreement<T: PartialEq>(
    computed: &SegmentLabeling,
    reference: &[T],
    tolerance: usize,
) -> Result<BoundaryAgreement, SegmentError> {
    if reference.len() != computed.len() {
        return Err(SegmentError::DimensionMismatch {
            input: "reference labels",
            expected: computed.len(),
            got: reference.len(),
        });
    }
    let ours = computed.boundaries();
    let theirs = change_positions(reference);

    let mut pairs: Vec<(usize, usize, usize)> = Vec::new();
    for (ci, &c) in ours.iter().enumerate() {
        for (ri, &r) in theirs.iter().enumerate() {
            let distance = c.abs_diff(r);
            if distance <= tolerance {
                pairs.push((distance, ci, ri));
            }
        }
    }
    pairs.sort_unstable();

    let mut used_ours = vec![false; ours.len()];
    let mut used_theirs = vec![false; theirs.len()];
    let mut matched = 0;
    for (_, ci, ri) in pairs {
        if !used_ours[ci] && !used_theirs[ri] {
            used_ours[ci] = true;
            used_theirs[ri] = true;
            matched += 1;
        }
    }

    let share = |total: usize| {
        if total == 0 {
            1.0
        } else {
            matched as f64 / total as f64
        }
    };
    let precision = share(ours.len());
    let recall = share(theirs.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(BoundaryAgreement {
        precision,
        recall,
        f1,
        computed: ours.len(),
        reference: theirs.len(),
        matched,
        tolerance,
    })
}
