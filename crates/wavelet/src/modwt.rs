//! Maximal Overlap Discrete Wavelet Transform (MODWT).
//!
//! Pyramid algorithm with periodic boundary handling, following
//! Percival & Walden (2000), ch. 5. Every coefficient vector has the length
//! of the input series.

use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::series::TimeSeries;

/// Computes the maximum feasible MODWT decomposition level for a
/// given series length and filter.
///
/// The maximum level `J` satisfies `L_J = (2^J - 1)(L - 1) + 1 <= N`,
/// where `L` is the filter length and `N` is the series length.
pub fn max_modwt_level(n: usize, filter: &WaveletFilter) -> usize {
    let l = filter.length() as f64;
    let n = n as f64;
    if l <= 1.0 || n <= 1.0 {
        return 0;
    }
    let ratio = (n - 1.0) / (l - 1.0) + 1.0;
    if ratio <= 1.0 {
        return 0;
    }
    ratio.log2().floor() as usize
}

/// Configuration for a MODWT decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModwtConfig {
    filter: WaveletFilter,
    n_levels: usize,
}

impl ModwtConfig {
    /// Creates a new MODWT configuration.
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

    /// Checks the level count against the series length.
    ///
    /// # Errors
    ///
    /// [`WaveletError::InvalidLevels`] for zero levels,
    /// [`WaveletError::LevelTooHigh`] above [`max_modwt_level`].
    pub fn validate(&self, series_len: usize) -> Result<(), WaveletError> {
        if self.n_levels < 1 {
            return Err(WaveletError::InvalidLevels {
                levels: self.n_levels,
            });
        }
        let max = max_modwt_level(series_len, &self.filter);
        if self.n_levels > max {
            return Err(WaveletError::LevelTooHigh {
                requested: self.n_levels,
                max,
                len: series_len,
            });
        }
        Ok(())
    }
}

/// MODWT decomposition coefficients.
///
/// Wavelet coefficients `W_1..W_J` and the level-`J` scaling coefficients `V_J`.
#[derive(Clone, Debug)]
pub struct ModwtCoeffs {
    details: Vec<Vec<f64>>,
    smooth: Vec<f64>,
    filter: WaveletFilter,
}

impl ModwtCoeffs {
    pub(crate) fn new(details: Vec<Vec<f64>>, smooth: Vec<f64>, filter: WaveletFilter) -> Self {
        Self {
            details,
            smooth,
            filter,
        }
    }

    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the wavelet coefficients at the given level (0-indexed).
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        self.details.get(level).map(|v| v.as_slice())
    }

    /// Returns the scaling coefficients of the deepest level.
    pub fn smooth(&self) -> &[f64] {
        &self.smooth
    }

    /// Returns the length of the original series.
    pub fn series_len(&self) -> usize {
        self.smooth.len()
    }

    /// Returns the wavelet filter used.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }

    /// Copy of these coefficients with every level except `keep` zeroed.
    ///
    /// `keep = None` retains only the scaling coefficients.
    pub(crate) fn isolate(&self, keep: Option<usize>) -> Self {
        let n = self.series_len();
        let details = (0..self.n_levels())
            .map(|level| {
                if keep == Some(level) {
                    self.details[level].clone()
                } else {
                    vec![0.0; n]
                }
            })
            .collect();
        let smooth = if keep.is_none() {
            self.smooth.clone()
        } else {
            vec![0.0; n]
        };
        Self::new(details, smooth, self.filter)
    }
}

/// MODWT filters rescaled by `1/sqrt(2)`.
fn modwt_filters(filter: &WaveletFilter) -> (Vec<f64>, Vec<f64>) {
    let g: Vec<f64> = filter.scaling_coeffs().iter().map(|c| c / SQRT_2).collect();
    let h: Vec<f64> = filter.wavelet_coeffs().iter().map(|c| c / SQRT_2).collect();
    (h, g)
}

/// One forward pyramid step: `V_{j-1}` to `(W_j, V_j)` with lag `stride = 2^(j-1)`.
fn forward_step(v_prev: &[f64], h: &[f64], g: &[f64], stride: usize) -> (Vec<f64>, Vec<f64>) {
    let n = v_prev.len();
    let mut w = vec![0.0; n];
    let mut v = vec![0.0; n];
    for t in 0..n {
        let (mut wt, mut vt) = (0.0, 0.0);
        for (l, (&hl, &gl)) in h.iter().zip(g).enumerate() {
            let k = (t + n - (stride * l) % n) % n;
            wt += hl * v_prev[k];
            vt += gl * v_prev[k];
        }
        w[t] = wt;
        v[t] = vt;
    }
    (w, v)
}

/// One inverse pyramid step: `(W_j, V_j)` back to `V_{j-1}`.
fn inverse_step(w: &[f64], v: &[f64], h: &[f64], g: &[f64], stride: usize) -> Vec<f64> {
    let n = v.len();
    let mut out = vec![0.0; n];
    for (t, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (l, (&hl, &gl)) in h.iter().zip(g).enumerate() {
            let k = (t + stride * l) % n;
            acc += hl * w[k] + gl * v[k];
        }
        *slot = acc;
    }
    out
}

/// Computes the MODWT decomposition of a time series.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidLevels`] | `config.n_levels() == 0` |
/// | [`WaveletError::LevelTooHigh`] | `config.n_levels()` exceeds `max_modwt_level()` |
pub fn modwt(series: &TimeSeries, config: &ModwtConfig) -> Result<ModwtCoeffs, WaveletError> {
    config.validate(series.len())?;
    let (h, g) = modwt_filters(&config.filter());

    let mut v = series.as_slice().to_vec();
    let mut details = Vec::with_capacity(config.n_levels());
    for j in 1..=config.n_levels() {
        let (w_j, v_j) = forward_step(&v, &h, &g, 1 << (j - 1));
        details.push(w_j);
        v = v_j;
    }
    debug!(
        levels = config.n_levels(),
        len = series.len(),
        filter = config.filter().name(),
        "MODWT computed"
    );
    Ok(ModwtCoeffs::new(details, v, config.filter()))
}

/// Reconstructs a time series from MODWT coefficients (inverse MODWT).
///
/// # Errors
///
/// Returns [`WaveletError::ModwtFailed`] if the coefficient vectors are empty
/// or differ in length.
pub fn imodwt(coeffs: &ModwtCoeffs) -> Result<Vec<f64>, WaveletError> {
    let n = coeffs.series_len();
    if n == 0 {
        return Err(WaveletError::ModwtFailed("empty scaling coefficients".into()));
    }
    if let Some(level) = coeffs.details.iter().position(|d| d.len() != n) {
        return Err(WaveletError::ModwtFailed(format!(
            "detail level {} has length {}, expected {n}",
            level + 1,
            coeffs.details[level].len()
        )));
    }
    let (h, g) = modwt_filters(&coeffs.filter());

    let mut v = coeffs.smooth.clone();
    for j in (1..=coeffs.n_levels()).rev() {
        v = inverse_step(&coeffs.details[j - 1], &v, &h, &g, 1 << (j - 1));
    }
    Ok(v)
}
