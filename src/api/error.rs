//! Error classification for backend calls.
//!
//! Every failure is folded into an [`ApiError`] whose `Display` output is
//! the message shown to the user. Services convert it into
//! [`RequestState::Error`](crate::RequestState) before returning.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400: the submitted fields were rejected
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 401: missing or expired token
    #[error("Unauthorized: please log in again")]
    Unauthorized,

    /// 403: authenticated but not allowed
    #[error("Forbidden: you do not have permission to perform this action")]
    Forbidden,

    /// 404
    #[error("Resource not found")]
    NotFound,

    /// 500
    #[error("Server error: please try again later")]
    Server,

    /// Any other non-success status
    #[error("HTTP {status}: {description}")]
    Http { status: u16, description: String },

    /// No response was received (timeout, DNS, refused, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// A success status whose body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Strapi error body: `{"data": null, "error": {"status", "name", "message"}}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let server_message = strapi_message(body);
        match status.as_u16() {
            400 => ApiError::InvalidData(
                server_message.unwrap_or_else(|| "please check the submitted fields".to_string()),
            ),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            500 => ApiError::Server,
            code => ApiError::Http {
                status: code,
                description: server_message.unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Unknown status").to_string()
                }),
            },
        }
    }

    /// Classify a transport failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let cause = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            match err.url().and_then(|u| u.host_str()) {
                Some(host) => format!("could not connect to {}", host),
                None => "could not connect to server".to_string(),
            }
        } else {
            err.to_string()
        };
        ApiError::Network(cause)
    }

    /// True when the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

fn strapi_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
}
