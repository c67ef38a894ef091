//! Confidence Histogram
//!
//! Distribution of predicted confidences over equal-width bins of [0, 1], as a percentage of
//! the counted samples.
use crate::errors::CalibError;
use crate::utils::{mean, unit_edges, validate_n_bins, validate_parallel};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfidenceHistogram {
    /// `n_bins + 1` edges from 0 to 1.
    pub edges: Vec<f64>,
    /// Samples per bin.
    pub counts: Vec<usize>,
    /// `counts` as a percentage of all counted samples.
    pub percentages: Vec<f64>,
    /// Mean over every confidence value passed in.
    pub mean_confidence: f64,
    /// Mean correctness over every sample passed in.
    pub accuracy: f64,
}

impl ConfidenceHistogram {
    /// Histogram of `confidences` with `n_bins` equal-width bins over [0, 1].
    ///
    /// Bins are half-open except the last, which also holds 1.0. Values outside [0, 1] are not
    /// counted but still contribute to `mean_confidence`.
    pub fn compute(confidences: &[f64], accuracies: &[f64], n_bins: usize) -> Result<Self, CalibError> {
        validate_n_bins(n_bins)?;
        validate_parallel(confidences, accuracies)?;
        let mean_confidence = mean(confidences).ok_or_else(|| CalibError::EmptyInput("confidence histogram".to_string()))?;
        let accuracy = mean(accuracies).ok_or_else(|| CalibError::EmptyInput("confidence histogram".to_string()))?;

        let edges = unit_edges(n_bins);
        let mut counts = vec![0usize; n_bins];
        for &c in confidences {
            if let Some(i) = histogram_bin(&edges, c) {
                counts[i] += 1;
            }
        }

        let total: usize = counts.iter().sum();
        if total == 0 {
            return Err(CalibError::EmptyInput("confidence histogram (no values in [0, 1])".to_string()));
        }
        let percentages = counts.iter().map(|&c| c as f64 / total as f64 * 100.0).collect();
        debug!(
            "Confidence histogram over {} samples, mean confidence {:.4}, accuracy {:.4}.",
            total, mean_confidence, accuracy
        );

        Ok(ConfidenceHistogram {
            edges,
            counts,
            percentages,
            mean_confidence,
            accuracy,
        })
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        1.0 / self.counts.len() as f64
    }

    /// Tallest bar, in percent.
    pub fn max_percentage(&self) -> f64 {
        self.percentages.iter().copied().fold(0.0, f64::max)
    }

    /// Signed gap between average confidence and accuracy, positive when over-confident.
    pub fn confidence_gap(&self) -> f64 {
        self.mean_confidence - self.accuracy
    }
}

fn histogram_bin(edges: &[f64], value: f64) -> Option<usize> {
    let n_bins = edges.len() - 1;
    if value.is_nan() || value < edges[0] || value > edges[n_bins] {
        return None;
    }
    let above = edges.partition_point(|&e| e <= value);
    Some((above - 1).min(n_bins - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_bin() {
        let edges = unit_edges(4);
        assert_eq!(histogram_bin(&edges, 0.0), Some(0));
        assert_eq!(histogram_bin(&edges, 0.25), Some(1));
        assert_eq!(histogram_bin(&edges, 0.74), Some(2));
        assert_eq!(histogram_bin(&edges, 1.0), Some(3));
        assert_eq!(histogram_bin(&edges, 1.01), None);
        assert_eq!(histogram_bin(&edges, -0.01), None);
        assert_eq!(histogram_bin(&edges, f64::NAN), None);
    }

    #[test]
    fn test_compute() {
        let conf = [0.1, 0.15, 0.55, 0.95];
        let acc = [0.0, 1.0, 1.0, 1.0];
        let h = ConfidenceHistogram::compute(&conf, &acc, 2).unwrap();
        assert_eq!(h.counts, vec![2, 2]);
        assert_eq!(h.percentages, vec![50.0, 50.0]);
        assert_relative_eq!(h.mean_confidence, 0.4375, epsilon = 1e-12);
        assert_relative_eq!(h.accuracy, 0.75, epsilon = 1e-12);
        assert_relative_eq!(h.confidence_gap(), -0.3125, epsilon = 1e-12);
        assert_relative_eq!(h.max_percentage(), 50.0, epsilon = 1e-12);
        assert_relative_eq!(h.bin_width(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_one_is_counted_in_last_bin() {
        let h = ConfidenceHistogram::compute(&[1.0, 0.2], &[1.0, 0.0], 5).unwrap();
        assert_eq!(h.counts, vec![0, 1, 0, 0, 1]);
        assert_relative_eq!(h.percentages.iter().sum::<f64>(), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_not_counted() {
        let h = ConfidenceHistogram::compute(&[1.5, 0.3, 0.7], &[1.0, 1.0, 0.0], 2).unwrap();
        assert_eq!(h.counts, vec![1, 1]);
        assert_relative_eq!(h.mean_confidence, 2.5 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            ConfidenceHistogram::compute(&[], &[], 10),
            Err(CalibError::EmptyInput(_))
        ));
        assert!(matches!(
            ConfidenceHistogram::compute(&[2.0], &[1.0], 10),
            Err(CalibError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(ConfidenceHistogram::compute(&[0.5], &[1.0], 0).is_err());
        assert!(matches!(
            ConfidenceHistogram::compute(&[0.5], &[1.0, 0.0], 10),
            Err(CalibError::LengthMismatch(1, 2))
        ));
    }
}
