//! Error types for the migra-segment crate.

use migra_wavelet::WaveletError;

/// Error type for all fallible operations in the migra-segment crate.
///
/// Every variant is a local validation failure raised before any output is
/// built; no operation returns a partial labeling.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SegmentError {
    /// Returned when a configuration value is out of range or non-finite.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Returned when an auxiliary sequence does not match the signal length.
    #[error("{input} has length {got}, expected {expected}")]
    DimensionMismatch {
        /// Name of the mismatched input.
        input: &'static str,
        /// Length of the signal it must match.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// Returned when a signal or sub-band has no samples.
    #[error("{input} is empty")]
    EmptyInput {
        /// Name of the empty input.
        input: &'static str,
    },

    /// Returned when a signal or sub-band contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Wavelet decomposition error.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),
}

impl SegmentError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects empty or non-finite sequences.
pub(crate) fn check_samples(values: &[f64], input: &'static str) -> Result<(), SegmentError> {
    if values.is_empty() {
        return Err(SegmentError::EmptyInput { input });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SegmentError::NonFiniteInput { input });
    }
    Ok(())
}
