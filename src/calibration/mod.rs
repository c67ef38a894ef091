//! Calibration Module
//!
//! Statistics for judging whether predicted confidences match observed accuracy.
//!
//! # Submodules
//!
//! * `binning`: Reliability bins, per-bin mean confidence and accuracy over half-open intervals.
//! * `histogram`: Distribution of confidences as a percentage of samples.
//! * `summary`: Expected and maximum calibration error.
//! * `samples`: Confidence and correctness arrays extracted from classifier outputs.

pub mod binning;
pub mod histogram;
pub mod samples;
pub mod summary;

pub use binning::{BinStat, ReliabilityBins};
pub use histogram::ConfidenceHistogram;
pub use samples::ConfidenceSamples;
pub use summary::CalibrationSummary;
