//! CIFAR-style residual classifiers and calibration diagnostics.
//!
//! * [`models`] builds ResNet-18 / ResNet-34 backbones with a small-image stem, with `burn`.
//! * [`calibration`] bins predicted confidences against observed correctness.
//! * [`plotting`] draws reliability diagrams and confidence histograms with `plotters`.

// Modules
pub mod calibration;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod plotting;
pub mod utils;

// Individual classes, and functions
pub use calibration::{BinStat, CalibrationSummary, ConfidenceHistogram, ConfidenceSamples, ReliabilityBins};
pub use config::{ConfigIO, PlotConfig};
pub use errors::CalibError;
pub use models::{build_deep_classifier, build_shallow_classifier, BackboneConfig, ResNet, ResNetVariant};
pub use plotting::{plot_confidence_histogram, plot_reliability_diagram, save_calibration_report};
