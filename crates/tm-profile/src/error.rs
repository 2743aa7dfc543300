//! Error types for segment loading and phase calculation.

use thiserror::Error;

/// Validation failures raised while loading inputs or running a phase.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("No usable data: {what}")]
    EmptyData { what: String },

    #[error("Invalid range: {what}")]
    InvalidRange { what: String },

    #[error("Missing required parameters: {}", .keys.join(", "))]
    MissingParameter { keys: Vec<String> },

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    #[error("Segments only cover up to {covered_kmh} km/h, target is {target_kmh} km/h")]
    Coverage { target_kmh: f64, covered_kmh: f64 },
}

pub type MotionResult<T> = Result<T, MotionError>;

impl MotionError {
    pub(crate) fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        MotionError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}

impl From<tm_core::TmError> for MotionError {
    fn from(e: tm_core::TmError) -> Self {
        match e {
            tm_core::TmError::NonFinite { what, value } => {
                MotionError::invalid_parameter(what, value, "must be finite")
            }
        }
    }
}
