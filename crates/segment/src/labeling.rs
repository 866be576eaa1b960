//! Segment labelings and the chunks they are built from.

use std::ops::Range;

use serde::Serialize;

use crate::error::SegmentError;

/// A contiguous sub-range `start..start + len` of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// First position of the chunk.
    pub start: usize,
    /// Number of positions in the chunk.
    pub len: usize,
}

impl Chunk {
    /// One past the last position.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Positions covered by the chunk.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The chunk's samples within `values`.
    ///
    /// # Panics
    ///
    /// Panics if the chunk extends past `values`.
    pub fn values<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        &values[self.range()]
    }
}

/// A maximal run of one id inside a labeling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Segment id shared by the run.
    pub id: u32,
    /// First position of the run.
    pub start: usize,
    /// Number of positions in the run.
    pub len: usize,
}

/// Per-position segment ids over a sequence.
///
/// Ids never decrease along the sequence, so every id occupies one
/// contiguous run. Ids need not be consecutive integers; only their order
/// and grouping carry meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SegmentLabeling {
    ids: Vec<u32>,
}

impl SegmentLabeling {
    /// Wraps a sequence of ids.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidParameter`] if an id is smaller than
    /// its predecessor.
    pub fn new(ids: Vec<u32>) -> Result<Self, SegmentError> {
        if let Some(pos) = ids.windows(2).position(|w| w[1] < w[0]) {
            return Err(SegmentError::invalid(
                "ids",
                format!(
                    "id {} at position {} follows larger id {}",
                    ids[pos + 1],
                    pos + 1,
                    ids[pos]
                ),
            ));
        }
        Ok(Self { ids })
    }

    /// Caller guarantees the ids are non-decreasing.
    pub(crate) fn from_sorted_ids(ids: Vec<u32>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] <= w[1]));
        Self { ids }
    }

    /// Labels consecutive chunks `1, 2, ..., K` in order.
    pub(crate) fn from_chunks(chunks: &[Chunk]) -> Self {
        let total = chunks.iter().map(|c| c.len).sum();
        let mut ids = Vec::with_capacity(total);
        for (k, chunk) in chunks.iter().enumerate() {
            ids.extend(std::iter::repeat_n(k as u32 + 1, chunk.len));
        }
        Self::from_sorted_ids(ids)
    }

    /// Per-position ids.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Number of labeled positions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no position is labeled.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Maximal runs of equal ids, in order.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (pos, &id) in self.ids.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.id == id => run.len += 1,
                _ => runs.push(Run {
                    id,
                    start: pos,
                    len: 1,
                }),
            }
        }
        runs
    }

    /// Lengths of the runs, in order.
    pub fn run_lengths(&self) -> Vec<usize> {
        self.runs().iter().map(|r| r.len).collect()
    }

    /// Number of distinct segments.
    pub fn n_segments(&self) -> usize {
        self.boundaries().len() + usize::from(!self.ids.is_empty())
    }

    /// Positions whose id differs from the previous position's.
    pub fn boundaries(&self) -> Vec<usize> {
        change_positions(&self.ids)
    }

    /// Consumes the labeling, returning the ids.
    pub fn into_ids(self) -> Vec<u32> {
        self.ids
    }
}

/// Positions `p > 0` where `labels[p] != labels[p - 1]`.
pub fn change_positions<T: PartialEq>(labels: &[T]) -> Vec<usize> {
    labels
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, _)| i + 1)
        .collect()
}
