//! Reliability Binning
//!
//! Per-bin mean confidence and observed accuracy over equal-width, half-open confidence bins.
use crate::errors::CalibError;
use crate::utils::{fmt_vec_output, unit_edges, validate_n_bins, validate_parallel};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Statistics of the samples whose confidence falls in `[lower, upper)`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct BinStat {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge.
    pub upper: f64,
    /// Mean confidence of the bin, 0 when empty.
    pub mean_confidence: f64,
    /// Mean correctness of the bin, 0 when empty.
    pub accuracy: f64,
    /// Number of samples in the bin.
    pub count: usize,
}

impl BinStat {
    fn empty(lower: f64, upper: f64) -> Self {
        BinStat {
            lower,
            upper,
            mean_confidence: 0.0,
            accuracy: 0.0,
            count: 0,
        }
    }

    /// Distinguishes a zero-filled empty bin from a bin whose statistics really are zero.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Signed calibration gap, positive when over-confident.
    pub fn gap(&self) -> f64 {
        self.mean_confidence - self.accuracy
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Reliability statistics for one set of predictions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReliabilityBins {
    /// One entry per bin, ordered by lower edge.
    pub bins: Vec<BinStat>,
    /// Samples that fell in no bin: confidence of exactly 1.0, outside [0, 1), or NaN.
    pub excluded: usize,
}

impl ReliabilityBins {
    /// Bin `confidences` into `n_bins` equal-width intervals `[i/n, (i+1)/n)`.
    ///
    /// * `confidences` - Predicted confidence of each sample.
    /// * `accuracies` - Correctness of each sample (1.0 or 0.0), parallel to `confidences`.
    /// * `n_bins` - Number of bins, at least 1.
    ///
    /// The last interval is open on the right, so a confidence of exactly 1.0 lands in no bin
    /// and is counted in `excluded`. Empty bins report 0 for both statistics.
    pub fn compute(confidences: &[f64], accuracies: &[f64], n_bins: usize) -> Result<Self, CalibError> {
        validate_n_bins(n_bins)?;
        validate_parallel(confidences, accuracies)?;

        let edges = unit_edges(n_bins);
        let mut conf_sum = vec![0.0; n_bins];
        let mut acc_sum = vec![0.0; n_bins];
        let mut counts = vec![0usize; n_bins];
        let mut excluded = 0;

        for (&c, &a) in confidences.iter().zip(accuracies) {
            match locate_bin(&edges, c) {
                Some(i) => {
                    conf_sum[i] += c;
                    acc_sum[i] += a;
                    counts[i] += 1;
                }
                None => excluded += 1,
            }
        }

        if excluded > 0 {
            warn!(
                "{} of {} samples fell outside the half-open reliability bins and were excluded.",
                excluded,
                confidences.len()
            );
        }

        let bins: Vec<BinStat> = edges
            .windows(2)
            .zip(counts.iter().zip(conf_sum.iter().zip(&acc_sum)))
            .map(|(edge, (&count, (&cs, &as_)))| {
                if count == 0 {
                    BinStat::empty(edge[0], edge[1])
                } else {
                    BinStat {
                        lower: edge[0],
                        upper: edge[1],
                        mean_confidence: cs / count as f64,
                        accuracy: as_ / count as f64,
                        count,
                    }
                }
            })
            .collect();

        let result = ReliabilityBins { bins, excluded };
        debug!("Reliability accuracies: [{}]", fmt_vec_output(&result.accuracies()));
        Ok(result)
    }

    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    /// Width shared by every bin.
    pub fn bin_width(&self) -> f64 {
        1.0 / self.bins.len() as f64
    }

    pub fn lower_edges(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.lower).collect()
    }

    pub fn accuracies(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.accuracy).collect()
    }

    pub fn mean_confidences(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.mean_confidence).collect()
    }

    pub fn gaps(&self) -> Vec<f64> {
        self.bins.iter().map(BinStat::gap).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// Parallel to `bins`, `true` where the statistics are zero-filled.
    pub fn empty_mask(&self) -> Vec<bool> {
        self.bins.iter().map(BinStat::is_empty).collect()
    }

    /// Samples that landed in some bin.
    pub fn binned_samples(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Index `i` such that `edges[i] <= value < edges[i + 1]`.
fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    // NaN compares false against every edge and yields 0.
    let above = edges.partition_point(|&e| e <= value);
    if above == 0 || above == edges.len() {
        None
    } else {
        Some(above - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_bin() {
        let edges = unit_edges(4);
        assert_eq!(locate_bin(&edges, 0.0), Some(0));
        assert_eq!(locate_bin(&edges, 0.2499), Some(0));
        assert_eq!(locate_bin(&edges, 0.25), Some(1));
        assert_eq!(locate_bin(&edges, 0.9999), Some(3));
        assert_eq!(locate_bin(&edges, 1.0), None);
        assert_eq!(locate_bin(&edges, -0.1), None);
        assert_eq!(locate_bin(&edges, 1.5), None);
        assert_eq!(locate_bin(&edges, f64::NAN), None);
    }

    #[test]
    fn test_decimal_edges_are_exact() {
        // 0.3 is the lower edge of bin 3, not the upper end of bin 2.
        let bins = ReliabilityBins::compute(&[0.3, 0.7], &[1.0, 0.0], 10).unwrap();
        assert_eq!(bins.counts(), vec![0, 0, 0, 1, 0, 0, 0, 1, 0, 0]);
        assert_eq!(bins.bins[3].lower, 0.3);
        assert_eq!(bins.bins[7].lower, 0.7);
    }

    #[test]
    fn test_bin_stat_gap() {
        let b = BinStat {
            lower: 0.5,
            upper: 0.6,
            mean_confidence: 0.55,
            accuracy: 0.25,
            count: 4,
        };
        assert!((b.gap() - 0.3).abs() < 1e-12);
        assert!((b.width() - 0.1).abs() < 1e-12);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_single_bin() {
        let r = ReliabilityBins::compute(&[0.2, 0.4, 0.9], &[1.0, 0.0, 1.0], 1).unwrap();
        assert_eq!(r.n_bins(), 1);
        assert_eq!(r.bins[0].count, 3);
        assert!((r.bins[0].mean_confidence - 0.5).abs() < 1e-12);
        assert!((r.bins[0].accuracy - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_accessors_are_parallel() {
        let r = ReliabilityBins::compute(&[0.05, 0.15, 0.95], &[0.0, 1.0, 1.0], 10).unwrap();
        assert_eq!(r.lower_edges().len(), 10);
        assert_eq!(r.counts(), vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(r.empty_mask().iter().filter(|e| **e).count(), 7);
        assert_eq!(r.binned_samples(), 3);
        assert!((r.bin_width() - 0.1).abs() < 1e-12);
        assert!((r.gaps()[0] - 0.05).abs() < 1e-12);
        assert!((r.mean_confidences()[9] - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            ReliabilityBins::compute(&[0.1], &[1.0], 0),
            Err(CalibError::InvalidParameter(..))
        ));
        assert!(matches!(
            ReliabilityBins::compute(&[0.1, 0.2], &[1.0], 10),
            Err(CalibError::LengthMismatch(2, 1))
        ));
    }

    #[test]
    fn test_empty_input_gives_zero_bins() {
        let r = ReliabilityBins::compute(&[], &[], 5).unwrap();
        assert_eq!(r.n_bins(), 5);
        assert!(r.bins.iter().all(|b| b.is_empty() && b.accuracy == 0.0 && b.mean_confidence == 0.0));
        assert_eq!(r.excluded, 0);
    }

    #[test]
    fn test_serialize() {
        let r = ReliabilityBins::compute(&[0.1, 0.6], &[0.0, 1.0], 2).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let r2: ReliabilityBins = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }
}
