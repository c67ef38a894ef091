//! Calibration Report
//!
//! Reliability diagram and confidence histogram side by side, rendered to a file.
use crate::calibration::{ConfidenceHistogram, ReliabilityBins};
use crate::config::{PlotConfig, Validate};
use crate::errors::CalibError;
use crate::plotting::{plot_confidence_histogram, plot_reliability_diagram};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics behind a rendered report.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalibrationReport {
    pub reliability: ReliabilityBins,
    pub histogram: ConfidenceHistogram,
}

/// Fill `root` and draw both charts onto its left and right halves.
pub fn render_calibration_report<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    confidences: &[f64],
    accuracies: &[f64],
    n_bins: usize,
) -> Result<CalibrationReport, CalibError> {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    let reliability = plot_reliability_diagram(&panels[0], confidences, accuracies, n_bins)?;
    let histogram = plot_confidence_histogram(&panels[1], confidences, accuracies, n_bins)?;
    Ok(CalibrationReport { reliability, histogram })
}

/// Render a report to `path`, PNG when the extension is `png`, otherwise SVG.
///
/// PNG output needs the `ttf` feature: the bitmap backend cannot draw text with the built-in
/// font, so without it a `.png` path is rejected with [`CalibError::InvalidParameter`].
pub fn save_calibration_report<P: AsRef<Path>>(
    path: P,
    confidences: &[f64],
    accuracies: &[f64],
    config: &PlotConfig,
) -> Result<CalibrationReport, CalibError> {
    config.validate()?;
    let path = path.as_ref();
    let size = (config.width, config.height);
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    let report = if is_png {
        save_png_report(path, size, confidences, accuracies, config.n_bins)?
    } else {
        let root = SVGBackend::new(path, size).into_drawing_area();
        let report = render_calibration_report(&root, confidences, accuracies, config.n_bins)?;
        root.present()?;
        report
    };
    info!(
        "Wrote calibration report for {} samples to {}.",
        confidences.len(),
        path.display()
    );
    Ok(report)
}

#[cfg(feature = "ttf")]
fn save_png_report(
    path: &Path,
    size: (u32, u32),
    confidences: &[f64],
    accuracies: &[f64],
    n_bins: usize,
) -> Result<CalibrationReport, CalibError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    let report = render_calibration_report(&root, confidences, accuracies, n_bins)?;
    root.present()?;
    Ok(report)
}

#[cfg(not(feature = "ttf"))]
fn save_png_report(
    path: &Path,
    _size: (u32, u32),
    _confidences: &[f64],
    _accuracies: &[f64],
    _n_bins: usize,
) -> Result<CalibrationReport, CalibError> {
    Err(CalibError::InvalidParameter(
        "path".to_string(),
        "an .svg path, PNG output requires the `ttf` feature".to_string(),
        path.display().to_string(),
    ))
}
