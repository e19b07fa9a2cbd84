//! Error taxonomy shared by every zoomspy crate.
//!
//! Fetch-phase callers propagate these with `?`; the repost job catches
//! them per item and logs instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration missing or inconsistent (e.g. unknown team).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("{operation}: request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The service answered with an unexpected status.
    #[error("{operation}: status {status} body {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("{operation}: failed to decode response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("a run is already in progress")]
    RunInProgress,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// HTTP status for `Api` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a repeating run must stop on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
