//! # migra-io
//!
//! Read movement tracks from CSV files and write segmentation results as CSV
//! tables and a JSON report. Bridges track files into the `&[f64]` slices the
//! analysis crates work on.

mod error;
mod reader;
mod report;
mod track;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_labels, read_track};
pub use report::{
    AgreementSummary, ParameterSummary, Report, SegmentationSummary, WaveletSummary,
    named_labelings, write_report_json,
};
pub use track::{Fix, Track};
pub use writer::{SegmentTable, write_bands_csv, write_segments_csv};
