//! Confidence Samples
//!
//! Per-prediction confidence and correctness, extracted from classifier outputs.
use crate::calibration::binning::ReliabilityBins;
use crate::calibration::histogram::ConfidenceHistogram;
use crate::calibration::summary::CalibrationSummary;
use crate::errors::CalibError;
use crate::utils::validate_parallel;
use burn::tensor::activation::softmax;
use burn::tensor::{backend::Backend, Int, Tensor};
use serde::{Deserialize, Serialize};

/// Parallel confidence and correctness arrays, one entry per prediction.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ConfidenceSamples {
    /// Probability assigned to the predicted class.
    pub confidences: Vec<f64>,
    /// 1.0 when the predicted class equals the label, else 0.0.
    pub correctness: Vec<f64>,
}

impl ConfidenceSamples {
    pub fn new(confidences: Vec<f64>, correctness: Vec<f64>) -> Result<Self, CalibError> {
        validate_parallel(&confidences, &correctness)?;
        Ok(ConfidenceSamples {
            confidences,
            correctness,
        })
    }

    /// From rows of class probabilities and the true label of each row.
    ///
    /// Ties resolve to the lowest class index.
    pub fn from_probabilities(probabilities: &[Vec<f64>], labels: &[usize]) -> Result<Self, CalibError> {
        if probabilities.len() != labels.len() {
            return Err(CalibError::LengthMismatch(probabilities.len(), labels.len()));
        }
        let mut samples = ConfidenceSamples::default();
        for (row, &label) in probabilities.iter().zip(labels) {
            let (predicted, confidence) = row
                .iter()
                .copied()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                    Some((_, bp)) if bp >= p => best,
                    _ => Some((i, p)),
                })
                .ok_or_else(|| CalibError::EmptyInput("probability row".to_string()))?;
            samples.push(confidence, predicted == label);
        }
        Ok(samples)
    }

    /// From raw logits `[batch, num_classes]` and integer labels `[batch]`.
    ///
    /// Confidence is the largest softmax probability of each row.
    pub fn from_logits<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Result<Self, CalibError> {
        let [n, _] = logits.dims();
        let [n_labels] = labels.dims();
        if n != n_labels {
            return Err(CalibError::LengthMismatch(n, n_labels));
        }
        let probabilities = softmax(logits, 1);
        let confidences = probabilities.clone().max_dim(1).reshape([n]);
        let correct = probabilities.argmax(1).reshape([n]).equal(labels).float();

        ConfidenceSamples::new(tensor_to_vec(confidences)?, tensor_to_vec(correct)?)
    }

    pub fn push(&mut self, confidence: f64, correct: bool) {
        self.confidences.push(confidence);
        self.correctness.push(if correct { 1.0 } else { 0.0 });
    }

    /// Append another batch.
    pub fn extend(&mut self, other: ConfidenceSamples) {
        self.confidences.extend(other.confidences);
        self.correctness.extend(other.correctness);
    }

    pub fn len(&self) -> usize {
        self.confidences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confidences.is_empty()
    }

    pub fn reliability(&self, n_bins: usize) -> Result<ReliabilityBins, CalibError> {
        ReliabilityBins::compute(&self.confidences, &self.correctness, n_bins)
    }

    pub fn histogram(&self, n_bins: usize) -> Result<ConfidenceHistogram, CalibError> {
        ConfidenceHistogram::compute(&self.confidences, &self.correctness, n_bins)
    }

    pub fn summary(&self, n_bins: usize) -> Result<CalibrationSummary, CalibError> {
        CalibrationSummary::from_bins(&self.reliability(n_bins)?)
    }
}

fn tensor_to_vec<B: Backend>(tensor: Tensor<B, 1>) -> Result<Vec<f64>, CalibError> {
    tensor
        .into_data()
        .convert::<f64>()
        .to_vec::<f64>()
        .map_err(|e| CalibError::UnableToRead(format!("tensor data: {:?}", e)))
}
