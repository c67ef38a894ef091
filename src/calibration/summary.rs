use crate::calibration::binning::ReliabilityBins;
use crate::errors::CalibError;
use serde::{Deserialize, Serialize};

/// Scalar calibration metrics derived from reliability bins.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct CalibrationSummary {
    /// Expected calibration error: sample-weighted mean of `|gap|` over the binned samples.
    pub ece: f64,
    /// Maximum calibration error: largest `|gap|` over non-empty bins.
    pub mce: f64,
    /// Mean correctness of the binned samples.
    pub accuracy: f64,
    /// Mean confidence of the binned samples.
    pub mean_confidence: f64,
    /// Samples that contributed.
    pub n_samples: usize,
}

impl CalibrationSummary {
    pub fn from_bins(bins: &ReliabilityBins) -> Result<Self, CalibError> {
        let n_samples = bins.binned_samples();
        if n_samples == 0 {
            return Err(CalibError::EmptyInput("calibration summary".to_string()));
        }
        let n = n_samples as f64;
        let filled = || bins.bins.iter().filter(|b| !b.is_empty());

        let ece = filled().map(|b| b.count as f64 / n * b.gap().abs()).sum();
        let mce = filled().map(|b| b.gap().abs()).fold(0.0, f64::max);
        let accuracy = filled().map(|b| b.accuracy * b.count as f64).sum::<f64>() / n;
        let mean_confidence = filled().map(|b| b.mean_confidence * b.count as f64).sum::<f64>() / n;

        Ok(CalibrationSummary {
            ece,
            mce,
            accuracy,
            mean_confidence,
            n_samples,
        })
    }

    /// Bin the samples and summarise them in one call.
    pub fn compute(confidences: &[f64], accuracies: &[f64], n_bins: usize) -> Result<Self, CalibError> {
        Self::from_bins(&ReliabilityBins::compute(confidences, accuracies, n_bins)?)
    }
}
