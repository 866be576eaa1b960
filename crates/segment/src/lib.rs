//! # migra-segment
//!
//! Behavioural segmentation of a movement profile from its wavelet sub-bands.
//!
//! Two independent branches read one decomposition:
//!
//! ```mermaid
//! graph LR
//!     A["SubBands"] -->|"approximation(level)"| B["find_peaks"]
//!     B --> C["segment_by_peak_extents"]
//!     A -->|"detail(level)"| D["detect_change_points"]
//!     D --> E["stitch_labeling"]
//!     C --> F["Analysis"]
//!     E --> F
//! ```
//!
//! The peak branch labels a slow-varying band by the extents of its dominant
//! peaks. The change-point branch cuts a fast-varying band wherever its
//! magnitude jumps, then merges runs of short chunks. Every labeling is a
//! non-decreasing sequence of ids, one per position.
//!
//! ## Example
//!
//! ```
//! use migra_segment::{AnalysisConfig, ChangeConfig, PeakConfig, analyze};
//! use migra_wavelet::{TimeSeries, WaveletFilter, decompose};
//!
//! let speed: Vec<f64> = (0..256)
//!     .map(|i| if (64..96).contains(&i) || (160..200).contains(&i) { 8.0 } else { 0.5 })
//!     .collect();
//! let bands = decompose(&TimeSeries::new(speed).unwrap(), WaveletFilter::Haar, 4).unwrap();
//!
//! let config = AnalysisConfig::new(
//!     4,
//!     PeakConfig::new(2.0).with_min_distance(32),
//!     1,
//!     ChangeConfig::new(1.0).with_min_segment_length(16),
//! );
//! let analysis = analyze(&bands, &config).unwrap();
//! assert_eq!(analysis.peak_segments().len(), 256);
//! ```

mod changepoint;
mod compare;
mod config;
mod error;
mod extent;
mod labeling;
mod peaks;
mod pipeline;
mod stitch;

pub use changepoint::{change_points, detect_change_points, split_chunks};
pub use compare::{BoundaryAgreement, boundary_agreement};
pub use config::{AnalysisConfig, ChangeConfig, PeakConfig};
pub use error::SegmentError;
pub use extent::segment_by_peak_extents;
pub use labeling::{Chunk, Run, SegmentLabeling, change_positions};
pub use peaks::{Peak, find_peaks};
pub use pipeline::{Analysis, analyze, decompose_and_analyze};
pub use stitch::{stitch_labeling, stitch_short_chunks};
