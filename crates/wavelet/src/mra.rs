//! Multiresolution Analysis (MRA) via MODWT.

use tracing::{debug, warn};

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::modwt::{ModwtConfig, imodwt, modwt};
use crate::series::TimeSeries;

/// Reconstruction error above which the MRA is logged as suspicious.
const RECONSTRUCTION_WARN_TOL: f64 = 1e-8;

/// Configuration for a Multiresolution Analysis.
///
/// The number of levels is always explicit: choosing it is left to the
/// analyst, who inspects the bands before settling on a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MraConfig {
    filter: WaveletFilter,
    n_levels: usize,
}

impl MraConfig {
    /// Creates a new MRA configuration.
    pub fn new(filter: WaveletFilter, n_levels: usize) -> Self {
        Self { filter, n_levels }
    }

    /// Returns the wavelet filter.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }
}

/// Multiresolution Analysis result.
///
/// Holds the detail components `D_1..D_J`, the smooth `S_J`, nominal periods
/// (in samples), variance fractions and the additive reconstruction error.
#[derive(Clone, Debug)]
pub struct Mra {
    details: Vec<Vec<f64>>,
    smooth: Vec<f64>,
    periods: Vec<f64>,
    variance_fractions: Vec<f64>,
    reconstruction_error: f64,
    filter: WaveletFilter,
}

impl Mra {
    /// Returns the number of detail levels.
    pub fn n_detail_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the detail component at the given level (0-indexed).
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        self.details.get(level).map(|v| v.as_slice())
    }

    /// Returns the smooth component `S_J`.
    pub fn smooth(&self) -> &[f64] {
        &self.smooth
    }

    /// Nominal period of each detail level followed by the smooth.
    ///
    /// Detail `j` covers periods `[2^j, 2^(j+1)]` samples and reports their
    /// geometric mean; the smooth reports `2^(J+1)`.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Variance of each component relative to the input (sample variance).
    pub fn variance_fractions(&self) -> &[f64] {
        &self.variance_fractions
    }

    /// Maximum absolute difference between the input and the component sum.
    pub fn reconstruction_error(&self) -> f64 {
        self.reconstruction_error
    }

    /// Returns the wavelet filter used.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Iterates over all components (details then smooth).
    pub fn components(&self) -> impl Iterator<Item = &[f64]> {
        self.details
            .iter()
            .map(|v| v.as_slice())
            .chain(std::iter::once(self.smooth.as_slice()))
    }

    pub(crate) fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>) {
        (self.details, self.smooth)
    }
}

/// Performs a Multiresolution Analysis on the given time series.
///
/// Each detail `D_j` is the inverse MODWT of the coefficients with every
/// level but `j` zeroed; the smooth likewise keeps only `V_J`. The components
/// sum back to the input.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidLevels`] | zero levels requested |
/// | [`WaveletError::LevelTooHigh`] | levels exceed the filter/length maximum |
/// | [`WaveletError::MraFailed`] | a component could not be extracted |
pub fn mra(series: &TimeSeries, config: &MraConfig) -> Result<Mra, WaveletError> {
    let data = series.as_slice();
    let n = data.len();
    let j = config.n_levels();
    let filter = config.filter();

    let coeffs = modwt(series, &ModwtConfig::new(filter, j))?;
    if coeffs.n_levels() != j {
        return Err(WaveletError::MraFailed(format!(
            "expected {j} detail levels, got {}",
            coeffs.n_levels()
        )));
    }

    let details = (0..j)
        .map(|level| imodwt(&coeffs.isolate(Some(level))))
        .collect::<Result<Vec<_>, _>>()?;
    let smooth = imodwt(&coeffs.isolate(None))?;

    let mut periods: Vec<f64> = (1..=j)
        .map(|level| 2.0_f64.powi(level as i32) * std::f64::consts::SQRT_2)
        .collect();
    periods.push(2.0_f64.powi((j + 1) as i32));

    let data_var = variance(data);
    let variance_fractions = details
        .iter()
        .chain(std::iter::once(&smooth))
        .map(|c| {
            if data_var > 0.0 {
                variance(c) / data_var
            } else {
                0.0
            }
        })
        .collect();

    let reconstruction_error = (0..n)
        .map(|i| {
            let sum: f64 = details.iter().map(|d| d[i]).sum::<f64>() + smooth[i];
            (data[i] - sum).abs()
        })
        .fold(0.0_f64, f64::max);
    if reconstruction_error > RECONSTRUCTION_WARN_TOL {
        warn!(
            reconstruction_error,
            filter = filter.name(),
            "MRA components do not sum back to the input"
        );
    }
    debug!(levels = j, len = n, reconstruction_error, "MRA computed");

    Ok(Mra {
        details,
        smooth,
        periods,
        variance_fractions,
        reconstruction_error,
        filter,
    })
}

/// Computes sample variance (N-1 denominator) of a data slice.
pub(crate) fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}
