//! Client-side error taxonomy.
//!
//! Three failure classes reach a caller: a server-reported error body,
//! a transport failure, or an undecodable response. Validation errors
//! caught before dispatch never become an [`ApiError`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shape of a server-reported failure: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by every API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the
    /// backend's `error` field when present, surfaced verbatim.
    Server { status: u16, message: String },
    /// The request never completed (DNS, connection, CORS).
    Network(String),
    /// The response arrived but its body could not be decoded.
    Decode(String),
}

impl ApiError {
    /// Recover the structured error from a non-2xx response body, or
    /// fall back to a status-based message.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) => format!("Request failed with status {status}"),
        };
        ApiError::Server { status, message }
    }

    /// Message suitable for direct display. Server messages pass
    /// through verbatim; transport and decode failures collapse to a
    /// generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { status, message } => write!(f, "server error ({status}): {message}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_body_is_surfaced_verbatim() {
        let err = ApiError::from_response_body(413, r#"{"error":"File too large"}"#);
        assert_eq!(err, ApiError::Server {
            status: 413,
            message: "File too large".into(),
        });
        assert_eq!(err.user_message(), "File too large");
    }

    #[test]
    fn unstructured_body_falls_back_to_status_message() {
        let err = ApiError::from_response_body(502, "Bad Gateway");
        assert_eq!(err.user_message(), "Request failed with status 502");
    }

    #[test]
    fn transport_errors_collapse_to_generic_message() {
        let err = ApiError::Network("Failed to fetch".into());
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
        assert!(!err.is_server_error());
    }
}
