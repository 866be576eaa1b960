//! Wavelet filter definitions.

use crate::error::WaveletError;

const HAAR: [f64; 2] = [
    std::f64::consts::FRAC_1_SQRT_2,
    std::f64::consts::FRAC_1_SQRT_2,
];

const D4: [f64; 4] = [
    0.482_962_913_144_534_16,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_4,
    -0.129_409_522_551_260_37,
];

const D6: [f64; 6] = [
    0.332_670_552_950_082_6,
    0.806_891_509_311_092_5,
    0.459_877_502_118_491_5,
    -0.135_011_020_010_254_6,
    -0.085_441_273_882_026_7,
    0.035_226_291_885_709_5,
];

const D8: [f64; 8] = [
    0.230_377_813_308_896_4,
    0.714_846_570_552_915_4,
    0.630_880_767_929_858_7,
    -0.027_983_769_416_859_9,
    -0.187_034_811_719_093_1,
    0.030_841_381_835_560_7,
    0.032_883_011_666_885_2,
    -0.010_597_401_785_069_0,
];

const LA8: [f64; 8] = [
    -0.075_765_714_789_273_33,
    -0.029_635_527_645_998_51,
    0.497_618_667_632_015_45,
    0.803_738_751_805_916_1,
    0.297_857_795_605_277_36,
    -0.099_219_543_576_847_22,
    -0.012_603_967_262_037_833,
    0.032_223_100_604_042_7,
];

const LA16: [f64; 16] = [
    -0.003_382_415_951_006_125_6,
    -0.000_542_132_331_791_148_1,
    0.031_695_087_811_492_98,
    0.007_607_487_324_917_605,
    -0.143_294_238_350_809_7,
    -0.061_273_359_067_658_524,
    0.481_359_651_258_372_2,
    0.777_185_751_700_523_5,
    0.364_441_894_835_331_4,
    -0.051_945_838_107_709_04,
    -0.027_219_029_917_056_003,
    0.049_137_179_673_607_506,
    0.003_808_752_013_890_615,
    -0.014_952_258_337_048_23,
    -0.000_302_920_514_721_366_8,
    0.001_889_950_332_759_460_9,
];

/// Supported wavelet filters for MODWT decomposition.
///
/// Haar, Daubechies extremal phase (D) and least asymmetric (LA) families.
/// Coefficients are the orthonormal DWT scaling filters (sum = sqrt 2); the
/// MODWT rescales them by 1/sqrt 2 internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletFilter {
    /// Haar wavelet (length 2).
    Haar,
    /// Daubechies D4 wavelet (length 4).
    D4,
    /// Daubechies D6 wavelet (length 6).
    D6,
    /// Daubechies D8 wavelet (length 8).
    D8,
    /// Least Asymmetric LA(8) wavelet (length 8).
    La8,
    /// Least Asymmetric LA(16) wavelet (length 16).
    La16,
}

impl Default for WaveletFilter {
    /// Returns `WaveletFilter::Haar`, the usual choice for step-like speed profiles.
    fn default() -> Self {
        Self::Haar
    }
}

impl WaveletFilter {
    /// Returns the filter length (number of coefficients).
    pub fn length(&self) -> usize {
        self.scaling_coeffs().len()
    }

    /// Returns the scaling (father wavelet) coefficients.
    pub fn scaling_coeffs(&self) -> &'static [f64] {
        match self {
            Self::Haar => &HAAR,
            Self::D4 => &D4,
            Self::D6 => &D6,
            Self::D8 => &D8,
            Self::La8 => &LA8,
            Self::La16 => &LA16,
        }
    }

    /// Returns the wavelet (mother wavelet) coefficients.
    ///
    /// Quadrature mirror of the scaling filter: `h[l] = (-1)^l g[L-1-l]`.
    pub fn wavelet_coeffs(&self) -> Vec<f64> {
        let g = self.scaling_coeffs();
        let len = g.len();
        (0..len)
            .map(|l| {
                let sign = if l % 2 == 0 { 1.0 } else { -1.0 };
                sign * g[len - 1 - l]
            })
            .collect()
    }

    /// Returns the lowercase name accepted by [`WaveletFilter::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::D4 => "d4",
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::La8 => "la8",
            Self::La16 => "la16",
        }
    }

    /// Parses a wavelet filter from a case-insensitive name string.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::UnsupportedFilter`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, WaveletError> {
        match name.to_lowercase().as_str() {
            "haar" => Ok(Self::Haar),
            "d4" => Ok(Self::D4),
            "d6" => Ok(Self::D6),
            "d8" => Ok(Self::D8),
            "la8" => Ok(Self::La8),
            "la16" => Ok(Self::La16),
            _ => Err(WaveletError::UnsupportedFilter(name.to_string())),
        }
    }
}
