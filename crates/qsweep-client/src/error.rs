//! # Design
//!
//! - Structured, constant-message errors for every upstream call.
//! - Capture the operation and URL so a failed fetch is attributable in the
//!   audit log without interpolating context into error messages.

use thiserror::Error;

/// Result type for qBittorrent Web API operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced while talking to the qBittorrent Web API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("qbittorrent api transport failure")]
    Http {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// Upstream returned a non-success status code.
    #[error("qbittorrent api status error")]
    Status {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// HTTP status code returned by the server.
        status: u16,
    },
    /// Response body did not decode as the expected JSON shape.
    #[error("qbittorrent api decode failure")]
    Decode {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// Base URL cannot carry the endpoint path.
    #[error("qbittorrent api url cannot be extended")]
    InvalidUrl {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Base URL that rejected the endpoint path.
        value: String,
    },
    /// HTTP client construction failed.
    #[error("failed to build http client")]
    Build {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
}

impl ClientError {
    pub(crate) fn http(operation: &'static str, url: &reqwest::Url, source: reqwest::Error) -> Self {
        Self::Http {
            operation,
            url: url.as_str().to_owned(),
            source,
        }
    }

    pub(crate) fn status(operation: &'static str, url: &reqwest::Url, status: u16) -> Self {
        Self::Status {
            operation,
            url: url.as_str().to_owned(),
            status,
        }
    }

    pub(crate) fn decode(
        operation: &'static str,
        url: &reqwest::Url,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            operation,
            url: url.as_str().to_owned(),
            source,
        }
    }

    pub(crate) fn invalid_url(operation: &'static str, value: &str) -> Self {
        Self::InvalidUrl {
            operation,
            value: value.to_owned(),
        }
    }
}
