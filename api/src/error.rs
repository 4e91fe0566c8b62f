//! Error types for the backend transport

use thiserror::Error;

/// Errors that can occur when talking to the backend
///
/// Service implementations log these and collapse them to `None`/`false`;
/// only [`Transport`](crate::Transport) callers see them directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS)
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with `success: false`
    #[error("Request rejected (status {status}): {message}")]
    Rejected {
        /// Status reported by the backend
        status: u16,
        /// Message from the envelope payload
        message: String,
    },

    /// The backend reported success with a status other than the expected one
    #[error("Unexpected status {actual} (expected {expected}): {message}")]
    UnexpectedStatus {
        /// Status the operation requires
        expected: u16,
        /// Status the backend reported
        actual: u16,
        /// Message from the envelope payload, if any
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The configured base URL is not a usable http(s) URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Status code associated with the failure, when there is one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            Self::Network(_) | Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }
}
