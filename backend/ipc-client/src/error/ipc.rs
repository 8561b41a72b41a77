use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;
use tokio_tungstenite::tungstenite::Error as WsError;

#[derive(Debug, ThisError)]
pub enum IpcError {
    /// Transport-level failure to establish or maintain the socket,
    /// including a configuration that names no dialable target.
    #[error("Connection Error: {message} {location}")]
    Connection {
        message: String,
        location: ErrorLocation,
    },

    /// The connection ended, or produced an unexpected frame kind,
    /// before a reply was received.
    #[error("Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    /// The reply frame could not be parsed as JSON.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    /// Server-signaled rejection of the credential. The client performs no
    /// local credential check and never raises this itself; it exists for
    /// embedders that inspect replies and want a single taxonomy.
    #[error("Authorization Error: {message} {location}")]
    Authorization {
        message: String,
        location: ErrorLocation,
    },
}

impl From<WsError> for IpcError {
    #[track_caller]
    fn from(error: WsError) -> Self {
        IpcError::Connection {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for IpcError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        IpcError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
