//! # migra-wavelet
//!
//! Length-preserving wavelet decomposition of a movement profile.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::new(speed)?"] -->|"validate"| B["TimeSeries"]
//!     B -->|"modwt(&ts, &config)?"| C["ModwtCoeffs"]
//!     C -->|"imodwt(&coeffs)?"| B
//!     B -->|"mra(&ts, &config)?"| D["Mra"]
//!     B -->|"decompose(&ts, filter, levels)?"| E["SubBands"]
//!     E --> F[".approximation(level)"]
//!     E --> G[".detail(level)"]
//! ```
//!
//! ## Supported Filters
//!
//! | Filter | Length | Family |
//! |--------|--------|--------|
//! | [`WaveletFilter::Haar`] | 2 | Haar |
//! | [`WaveletFilter::D4`] | 4 | Daubechies |
//! | [`WaveletFilter::D6`] | 6 | Daubechies |
//! | [`WaveletFilter::D8`] | 8 | Daubechies |
//! | [`WaveletFilter::La8`] | 8 | Least Asymmetric |
//! | [`WaveletFilter::La16`] | 16 | Least Asymmetric |
//!
//! ## Quick Start
//!
//! ```
//! use migra_wavelet::{TimeSeries, WaveletFilter, decompose};
//!
//! let speed: Vec<f64> = (0..64).map(|i| if i < 32 { 0.5 } else { 9.0 }).collect();
//! let ts = TimeSeries::new(speed).unwrap();
//! let bands = decompose(&ts, WaveletFilter::Haar, 3).unwrap();
//! assert_eq!(bands.approximation(3).unwrap().len(), 64);
//! ```

mod error;
mod filter;
mod modwt;
mod mra;
mod series;
mod subbands;

pub use error::WaveletError;
pub use filter::WaveletFilter;
pub use modwt::{ModwtCoeffs, ModwtConfig, imodwt, max_modwt_level, modwt};
pub use mra::{Mra, MraConfig, mra};
pub use series::{MIN_SERIES_LEN, TimeSeries};
pub use subbands::{SubBands, decompose};
