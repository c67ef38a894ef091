#![allow(dead_code)]
use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Confidences in [0, 1) and correctness drawn with probability `confidence - overconfidence`.
pub(crate) fn create_samples(n_samples: usize, overconfidence: f64) -> (Vec<f64>, Vec<f64>) {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);
    let confidence_distribution = Uniform::new(0.0, 1.0);

    let confidences: Vec<f64> = (0..n_samples).map(|_| rng.sample(confidence_distribution)).collect();
    let accuracies = confidences
        .iter()
        .map(|&c| {
            let p = (c - overconfidence).clamp(0.0, 1.0);
            if rng.gen_bool(p) {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    (confidences, accuracies)
}
