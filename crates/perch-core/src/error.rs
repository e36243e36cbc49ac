//! Error types for Perch Core

use thiserror::Error;

use crate::channel::Channel;

/// Result type alias for Perch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Perch error types
#[derive(Error, Debug)]
pub enum Error {
    // Boundary errors
    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(Channel),

    #[error("Transport failed on {channel}: {reason}")]
    Transport { channel: Channel, reason: String },

    // Payload errors
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Invalid drag delta: ({dx}, {dy})")]
    InvalidDelta { dx: f64, dy: f64 },

    // Host errors
    #[error("Window operation failed: {0}")]
    Window(String),

    #[error("Failed to persist window state: {0}")]
    StatePersistence(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Content bundle unavailable: {0}")]
    ContentBundle(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a window error
    pub fn window(msg: impl std::fmt::Display) -> Self {
        Error::Window(msg.to_string())
    }

    /// Returns true if the next emission or sample is expected to self-correct
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ChannelUnavailable(_)
                | Error::Transport { .. }
                | Error::InvalidDimensions { .. }
                | Error::InvalidDelta { .. }
                | Error::Window(_)
        )
    }

    /// Returns a stable error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ChannelUnavailable(_) => "CHANNEL_UNAVAILABLE",
            Error::Transport { .. } => "TRANSPORT",
            Error::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            Error::InvalidDelta { .. } => "INVALID_DELTA",
            Error::Window(_) => "WINDOW",
            Error::StatePersistence(_) => "STATE_PERSISTENCE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::ContentBundle(_) => "CONTENT_BUNDLE",
            Error::Json(_) => "JSON",
            Error::Io(_) => "IO",
        }
    }
}
