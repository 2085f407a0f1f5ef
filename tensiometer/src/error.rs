use thiserror::Error;

/// Failures of a single droplet measurement
///
/// None of these are fatal. The orchestrator logs them and substitutes
/// the fixed "Measurement failed" message.
#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("no contour found")]
    NoContourFound,

    #[error("failed to determine bounding box: contour has no points")]
    DegenerateContour,

    #[error("invalid scale factor: {0} mm/px")]
    InvalidScale(f64),

    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

impl From<image::ImageError> for MeasurementError {
    fn from(err: image::ImageError) -> Self {
        MeasurementError::DecodeFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MeasurementError>;
