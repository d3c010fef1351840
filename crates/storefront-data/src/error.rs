//! Fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching the catalog snapshot.
///
/// Any of these is a terminal failure for the session until the caller
/// retries; no partial catalog is ever installed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("API responded with status: {status} for {url}")]
    Http { status: u16, url: String },

    /// Request exceeded the client timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Failed to send the request or read the body.
    #[error("Request failed: {0}")]
    Request(String),

    /// Body was not a JSON array of products.
    #[error("Malformed catalog body: {0}")]
    Deserialization(String),

    /// Local fixture could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e.to_string())
    }
}
