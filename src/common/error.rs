//! Error types for pid_path_tracking

use std::fmt;

/// Main error type for vehicle and tracker configuration
#[derive(Debug)]
pub enum TrackingError {
    /// Invalid parameter
    InvalidParameter(String),
    /// Reference path has no waypoints
    EmptyPath,
    /// I/O error
    IoError(std::io::Error),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            TrackingError::EmptyPath => write!(f, "Reference path is empty"),
            TrackingError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TrackingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackingError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackingError {
    fn from(e: std::io::Error) -> Self {
        TrackingError::IoError(e)
    }
}

/// Result type alias for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Reject values that are negative, NaN or infinite
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> TrackingResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TrackingError::InvalidParameter(format!(
            "{} must be finite and >= 0, got {}", name, value
        )))
    }
}

/// Reject values that are zero, negative, NaN or infinite
pub(crate) fn ensure_positive(name: &str, value: f64) -> TrackingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackingError::InvalidParameter(format!(
            "{} must be finite and > 0, got {}", name, value
        )))
    }
}

pub(crate) fn ensure_finite(name: &str, value: f64) -> TrackingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TrackingError::InvalidParameter(format!(
            "{} must be finite, got {}", name, value
        )))
    }
}
