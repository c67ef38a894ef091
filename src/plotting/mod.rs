//! Plotting
//!
//! Draws calibration diagnostics with `plotters` onto drawing areas owned by the caller. Each
//! function computes its statistics, draws them, and returns them. Presenting the area, and
//! any file it writes to, is left to the caller. The exception is `save_calibration_report`,
//! which owns its backend.
use plotters::style::RGBColor;

pub mod histogram;
pub mod reliability;
pub mod report;

pub use histogram::{draw_confidence_histogram, plot_confidence_histogram};
pub use reliability::{draw_reliability_diagram, plot_reliability_diagram};
pub use report::{render_calibration_report, save_calibration_report, CalibrationReport};

pub(crate) const ACCURACY_COLOR: RGBColor = RGBColor(31, 119, 180);
pub(crate) const GAP_COLOR: RGBColor = RGBColor(214, 39, 40);
pub(crate) const DIAGONAL_COLOR: RGBColor = RGBColor(128, 128, 128);
pub(crate) const HISTOGRAM_COLOR: RGBColor = RGBColor(135, 206, 235);
pub(crate) const MEAN_CONFIDENCE_COLOR: RGBColor = RGBColor(44, 160, 44);
pub(crate) const MEAN_ACCURACY_COLOR: RGBColor = RGBColor(214, 39, 40);

pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);
pub(crate) const MARGIN: u32 = 15;
pub(crate) const LABEL_AREA: u32 = 45;
