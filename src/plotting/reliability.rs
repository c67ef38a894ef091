use crate::calibration::ReliabilityBins;
use crate::errors::CalibError;
use crate::plotting::{ACCURACY_COLOR, CAPTION_FONT, DIAGONAL_COLOR, GAP_COLOR, LABEL_AREA, MARGIN};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Bin `confidences` and draw the reliability diagram onto `area`.
///
/// * `area` - Caller-owned drawing area, not presented here.
/// * `confidences` - Predicted confidence of each sample.
/// * `accuracies` - Correctness of each sample, parallel to `confidences`.
/// * `n_bins` - Number of equal-width bins, usually [`crate::constants::DEFAULT_N_BINS`].
pub fn plot_reliability_diagram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    confidences: &[f64],
    accuracies: &[f64],
    n_bins: usize,
) -> Result<ReliabilityBins, CalibError> {
    let bins = ReliabilityBins::compute(confidences, accuracies, n_bins)?;
    draw_reliability_diagram(area, &bins)?;
    Ok(bins)
}

/// Draw precomputed reliability bins.
///
/// One bar per bin at the observed accuracy, a stacked bar from there to the mean confidence
/// (the gap), and the identity diagonal.
pub fn draw_reliability_diagram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bins: &ReliabilityBins,
) -> Result<(), CalibError> {
    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .caption("Reliability Diagram", CAPTION_FONT)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;

    chart
        .configure_mesh()
        .x_desc("Confidence")
        .y_desc("Accuracy")
        .draw()?;

    chart
        .draw_series(
            bins.bins
                .iter()
                .map(|b| Rectangle::new([(b.lower, 0.0), (b.upper, b.accuracy)], ACCURACY_COLOR.filled())),
        )?
        .label("Accuracy")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], ACCURACY_COLOR.filled()));

    // Stacked on the accuracy bar; extends downward when under-confident.
    chart
        .draw_series(
            bins.bins
                .iter()
                .map(|b| Rectangle::new([(b.lower, b.accuracy), (b.upper, b.mean_confidence)], GAP_COLOR.mix(0.5).filled())),
        )?
        .label("Gap")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], GAP_COLOR.mix(0.5).filled()));

    chart.draw_series(bins.bins.iter().flat_map(|b| {
        [
            Rectangle::new([(b.lower, 0.0), (b.upper, b.accuracy)], BLACK.stroke_width(1)),
            Rectangle::new([(b.lower, b.accuracy), (b.upper, b.mean_confidence)], BLACK.stroke_width(1)),
        ]
    }))?;

    chart.draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], DIAGONAL_COLOR.stroke_width(2)))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn render(confidences: &[f64], accuracies: &[f64], n_bins: usize) -> (Result<ReliabilityBins, CalibError>, String) {
        let mut svg = String::new();
        let result = {
            let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
            let result = root
                .fill(&WHITE)
                .map_err(CalibError::from)
                .and_then(|_| plot_reliability_diagram(&root, confidences, accuracies, n_bins));
            root.present().unwrap();
            result
        };
        (result, svg)
    }

    #[test]
    fn test_plot_reliability_diagram() {
        let (result, svg) = render(&[0.1, 0.6, 0.65, 0.9], &[0.0, 1.0, 0.0, 1.0], 10);
        let bins = result.unwrap();
        assert_eq!(bins.n_bins(), 10);
        assert_relative_eq!(bins.bins[6].accuracy, 0.5);
        assert!(svg.contains("Reliability Diagram"));
        assert!(svg.contains("Confidence"));
        assert!(svg.contains("Accuracy"));
        assert!(svg.contains("Gap"));
    }

    #[test]
    fn test_plot_reliability_diagram_empty_input() {
        let (result, svg) = render(&[], &[], 5);
        let bins = result.unwrap();
        assert!(bins.bins.iter().all(|b| b.is_empty()));
        assert!(svg.contains("Reliability Diagram"));
    }

    #[test]
    fn test_plot_reliability_diagram_invalid() {
        let (result, _) = render(&[0.5], &[1.0], 0);
        assert!(matches!(result, Err(CalibError::InvalidParameter(..))));
        let (result, _) = render(&[0.5, 0.2], &[1.0], 10);
        assert!(matches!(result, Err(CalibError::LengthMismatch(2, 1))));
    }

    #[test]
    fn test_draw_precomputed_bins() {
        let bins = ReliabilityBins::compute(&[0.3, 0.8], &[1.0, 0.0], 4).unwrap();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (400, 300)).into_drawing_area();
            draw_reliability_diagram(&root, &bins).unwrap();
            root.present().unwrap();
        }
        assert!(svg.starts_with("<svg"));
    }
}
