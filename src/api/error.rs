//! Error types exposed by the feedback API layer.

use thiserror::Error;

/// Errors surfaced while configuring the client or talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend base URL could not be parsed.
    #[error("backend URL is invalid: {0}")]
    InvalidUrl(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Operation that timed out.
        message: String,
    },

    /// Networking failed before a response was received.
    #[error("network error talking to the feedback service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("feedback service returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Detail extracted from the response body, if any.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("unexpected response from the feedback service: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ApiError {
    /// Returns true when the failure happened before the backend answered.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}
