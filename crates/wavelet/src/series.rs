//! Validated time-series wrapper.

use crate::error::WaveletError;

/// Minimum number of samples a decomposable series must hold.
pub const MIN_SERIES_LEN: usize = 2;

/// A validated series of finite `f64` samples, one per fix.
///
/// Guarantees `len() >= 2` and that every value is finite.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    data: Vec<f64>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` after validating the data.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::SeriesTooShort`] | `data.len() < 2` |
    /// | [`WaveletError::NonFiniteData`] | any element is NaN or infinite |
    pub fn new(data: Vec<f64>) -> Result<Self, WaveletError> {
        if data.len() < MIN_SERIES_LEN {
            return Err(WaveletError::SeriesTooShort {
                len: data.len(),
                min: MIN_SERIES_LEN,
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(WaveletError::NonFiniteData);
        }
        Ok(Self { data })
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the series, returning the owned samples.
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

impl TryFrom<&[f64]> for TimeSeries {
    type Error = WaveletError;

    fn try_from(data: &[f64]) -> Result<Self, Self::Error> {
        Self::new(data.to_vec())
    }
}
