//! Errors
//!
//! Custom error types used throughout the `cifar_calib` crate.
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while computing or drawing calibration diagnostics.
#[derive(Debug, Error)]
pub enum CalibError {
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Confidence and correctness arrays must be parallel.
    #[error("Confidence array has {0} samples but correctness array has {1}.")]
    LengthMismatch(usize, usize),
    /// A statistic that needs at least one sample was requested on none.
    #[error("No samples available to compute {0}.")]
    EmptyInput(String),
    /// Failure reported by the drawing backend.
    #[error("Unable to draw chart: {0}")]
    Drawing(String),
    /// Unable to write config or report to file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read config or tensor data.
    #[error("Unable to read {0}")]
    UnableToRead(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for CalibError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        CalibError::Drawing(err.to_string())
    }
}
