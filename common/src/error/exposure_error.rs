use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when code attempts to move a credential somewhere it would
/// become readable, e.g. serializing a [`crate::SecretKey`] wholesale.
#[derive(Debug, ThisError)]
pub enum ExposureError {
    #[error("Exposure Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
