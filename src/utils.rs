use crate::errors::CalibError;

/// Create a string of all available items.
pub fn items_to_strings(items: &[&str]) -> String {
    items.join(", ")
}

// Validation
pub fn validate_n_bins(n_bins: usize) -> Result<(), CalibError> {
    if n_bins == 0 {
        Err(CalibError::InvalidParameter(
            "n_bins".to_string(),
            "an integer greater or equal to 1".to_string(),
            n_bins.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_parallel(confidences: &[f64], accuracies: &[f64]) -> Result<(), CalibError> {
    if confidences.len() != accuracies.len() {
        Err(CalibError::LengthMismatch(confidences.len(), accuracies.len()))
    } else {
        Ok(())
    }
}

/// Equal-width edges over [0, 1], `n_bins + 1` values with the last one exactly 1.0.
pub fn unit_edges(n_bins: usize) -> Vec<f64> {
    (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect()
}

/// Arithmetic mean, `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn fmt_vec_output(v: &[f64]) -> String {
    v.iter().map(|n| format!("{:.4}", n)).collect::<Vec<_>>().join(", ")
}
