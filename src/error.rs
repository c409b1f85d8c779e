//! Error types for routing and health polling.

use thiserror::Error;

use crate::data::SlotKind;

/// Reasons a telemetry event was not applied to the group model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The name is not of the form `group-<id>-<kind>-<index>`.
    #[error("unrecognised signal name: {0}")]
    MalformedName(String),

    /// The group id parsed but no such group exists.
    #[error("no group with id {0}")]
    UnknownGroup(u64),

    /// The channel index is outside the group's slot range.
    #[error("{kind:?} index {number} out of range")]
    IndexOutOfRange { kind: SlotKind, number: u64 },
}

/// Errors that can occur when querying the telemetry server.
#[derive(Debug, Error)]
pub enum HealthError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),

    /// Failed to parse response.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for HealthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HealthError::Timeout
        } else if err.is_connect() {
            HealthError::Connection(err.to_string())
        } else if err.is_decode() {
            HealthError::Parse(err.to_string())
        } else {
            HealthError::Http(err.to_string())
        }
    }
}
