use crate::calibration::ConfidenceHistogram;
use crate::errors::CalibError;
use crate::plotting::{
    CAPTION_FONT, HISTOGRAM_COLOR, LABEL_AREA, MARGIN, MEAN_ACCURACY_COLOR, MEAN_CONFIDENCE_COLOR,
};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Compute the confidence histogram and draw it onto `area`.
///
/// * `area` - Caller-owned drawing area, not presented here.
/// * `confidences` - Predicted confidence of each sample.
/// * `accuracies` - Correctness of each sample, parallel to `confidences`.
/// * `n_bins` - Number of equal-width bins, usually [`crate::constants::DEFAULT_N_BINS`].
pub fn plot_confidence_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    confidences: &[f64],
    accuracies: &[f64],
    n_bins: usize,
) -> Result<ConfidenceHistogram, CalibError> {
    let histogram = ConfidenceHistogram::compute(confidences, accuracies, n_bins)?;
    draw_confidence_histogram(area, &histogram)?;
    Ok(histogram)
}

/// Draw a precomputed histogram with vertical lines at the average confidence and accuracy.
pub fn draw_confidence_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    histogram: &ConfidenceHistogram,
) -> Result<(), CalibError> {
    let y_max = (histogram.max_percentage() * 1.1).max(1.0);
    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .caption("Confidence Histogram", CAPTION_FONT)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..1f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Confidence")
        .y_desc("Percent of Samples")
        .draw()?;

    let bars = || histogram.edges.windows(2).zip(&histogram.percentages);
    chart
        .draw_series(bars().map(|(edge, &pct)| Rectangle::new([(edge[0], 0.0), (edge[1], pct)], HISTOGRAM_COLOR.mix(0.7).filled())))?
        .label("Confidence")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], HISTOGRAM_COLOR.mix(0.7).filled()));
    chart.draw_series(bars().map(|(edge, &pct)| Rectangle::new([(edge[0], 0.0), (edge[1], pct)], BLACK.stroke_width(1))))?;

    for (value, color, label) in [
        (histogram.mean_confidence, MEAN_CONFIDENCE_COLOR, "Avg Confidence"),
        (histogram.accuracy, MEAN_ACCURACY_COLOR, "Avg Accuracy"),
    ] {
        chart
            .draw_series(LineSeries::new(vec![(value, 0.0), (value, y_max)], color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
