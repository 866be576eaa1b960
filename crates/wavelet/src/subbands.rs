//! Level-indexed approximation and detail bands.

use crate::error::WaveletError;
use crate::filter::WaveletFilter;
use crate::mra::{MraConfig, mra};
use crate::series::TimeSeries;

/// Approximation and detail sub-bands for levels `1..=L`.
///
/// Every band has the length of the decomposed series. The approximation at
/// level `j` is the MRA smooth `S_j = S_L + D_{j+1} + ... + D_L`, so
/// `S_j + D_j = S_{j-1}` and `S_0` is the input itself.
#[derive(Clone, Debug)]
pub struct SubBands {
    approximations: Vec<Vec<f64>>,
    details: Vec<Vec<f64>>,
    variance_fractions: Vec<f64>,
    filter: WaveletFilter,
}

impl SubBands {
    /// Builds a band set from precomputed bands, e.g. from another decomposer.
    ///
    /// `approximations[j - 1]` and `details[j - 1]` hold level `j`.
    ///
    /// # Errors
    ///
    /// [`WaveletError::InvalidLevels`] if no level is given,
    /// [`WaveletError::MraFailed`] if the level counts or band lengths differ.
    pub fn from_bands(
        approximations: Vec<Vec<f64>>,
        details: Vec<Vec<f64>>,
        filter: WaveletFilter,
    ) -> Result<Self, WaveletError> {
        if approximations.is_empty() {
            return Err(WaveletError::InvalidLevels { levels: 0 });
        }
        if approximations.len() != details.len() {
            return Err(WaveletError::MraFailed(format!(
                "{} approximation levels but {} detail levels",
                approximations.len(),
                details.len()
            )));
        }
        let n = approximations[0].len();
        if approximations.iter().chain(&details).any(|b| b.len() != n) {
            return Err(WaveletError::MraFailed(
                "sub-bands must all have the series length".into(),
            ));
        }
        let variance_fractions = vec![f64::NAN; details.len()];
        Ok(Self {
            approximations,
            details,
            variance_fractions,
            filter,
        })
    }

    /// Number of decomposition levels `L`.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Length shared by every band.
    pub fn series_len(&self) -> usize {
        self.details.first().map_or(0, Vec::len)
    }

    /// Approximation (low-frequency) band at `level` in `1..=L`.
    pub fn approximation(&self, level: usize) -> Option<&[f64]> {
        level
            .checked_sub(1)
            .and_then(|i| self.approximations.get(i))
            .map(Vec::as_slice)
    }

    /// Detail (high-frequency) band at `level` in `1..=L`.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        level
            .checked_sub(1)
            .and_then(|i| self.details.get(i))
            .map(Vec::as_slice)
    }

    /// Share of input variance carried by each detail level (NaN when unknown).
    pub fn detail_variance_fractions(&self) -> &[f64] {
        &self.variance_fractions
    }

    /// Returns the wavelet filter the bands were computed with.
    pub fn filter(&self) -> WaveletFilter {
        self.filter
    }
}

/// Decomposes a series into `levels` approximation and detail bands.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidLevels`] | `levels == 0` |
/// | [`WaveletError::LevelTooHigh`] | `levels` exceeds the filter/length maximum |
pub fn decompose(
    series: &TimeSeries,
    filter: WaveletFilter,
    levels: usize,
) -> Result<SubBands, WaveletError> {
    let analysis = mra(series, &MraConfig::new(filter, levels))?;
    let variance_fractions = analysis.variance_fractions()[..levels].to_vec();
    let (details, smooth) = analysis.into_parts();

    // S_j = S_{j+1} + D_{j+1}, accumulated from the deepest level upwards.
    let mut approximations = vec![Vec::new(); levels];
    let mut current = smooth;
    for j in (0..levels).rev() {
        if j + 1 < levels {
            for (s, d) in current.iter_mut().zip(&details[j + 1]) {
                *s += d;
            }
        }
        approximations[j] = current.clone();
    }

    Ok(SubBands {
        approximations,
        details,
        variance_fractions,
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profile() -> TimeSeries {
        let data = (0..96)
            .map(|i| {
                let level = if (30..60).contains(&i) { 8.0 } else { 1.0 };
                level + 0.25 * (i as f64 * 1.3).sin()
            })
            .collect();
        TimeSeries::new(data).unwrap()
    }

    #[test]
    fn levels_are_one_based() {
        let bands = decompose(&profile(), WaveletFilter::Haar, 3).unwrap();
        assert_eq!(bands.n_levels(), 3);
        assert_eq!(bands.series_len(), 96);
        assert!(bands.approximation(0).is_none());
        assert!(bands.detail(0).is_none());
        assert!(bands.approximation(3).is_some());
        assert!(bands.detail(4).is_none());
    }

    #[test]
    fn approximation_plus_detail_climbs_one_level() {
        let ts = profile();
        let bands = decompose(&ts, WaveletFilter::D4, 3).unwrap();
        for i in 0..ts.len() {
            // S_1 + D_1 = input
            let s1 = bands.approximation(1).unwrap()[i] + bands.detail(1).unwrap()[i];
            assert_abs_diff_eq!(s1, ts.as_slice()[i], epsilon = 1e-9);
            for level in 2..=3 {
                let up = bands.approximation(level).unwrap()[i] + bands.detail(level).unwrap()[i];
                assert_abs_diff_eq!(
                    up,
                    bands.approximation(level - 1).unwrap()[i],
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn deeper_approximations_are_smoother() {
        let bands = decompose(&profile(), WaveletFilter::Haar, 4).unwrap();
        let roughness = |x: &[f64]| x.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>();
        let r1 = roughness(bands.approximation(1).unwrap());
        let r4 = roughness(bands.approximation(4).unwrap());
        assert!(r4 < r1, "level 4 roughness {r4} not below level 1 {r1}");
    }

    #[test]
    fn zero_levels_rejected() {
        let err = decompose(&profile(), WaveletFilter::Haar, 0).unwrap_err();
        assert!(matches!(err, WaveletError::InvalidLevels { levels: 0 }));
    }

    #[test]
    fn from_bands_checks_shapes() {
        let ok = SubBands::from_bands(
            vec![vec![1.0, 2.0]],
            vec![vec![0.0, 0.0]],
            WaveletFilter::Haar,
        )
        .unwrap();
        assert_eq!(ok.n_levels(), 1);
        assert!(ok.detail_variance_fractions()[0].is_nan());

        let ragged = SubBands::from_bands(
            vec![vec![1.0, 2.0]],
            vec![vec![0.0]],
            WaveletFilter::Haar,
        );
        assert!(matches!(ragged, Err(WaveletError::MraFailed(_))));

        let empty = SubBands::from_bands(vec![], vec![], WaveletFilter::Haar);
        assert!(matches!(empty, Err(WaveletError::InvalidLevels { levels: 0 })));
    }
}
