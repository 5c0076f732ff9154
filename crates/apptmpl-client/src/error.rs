//! Client error types.

use serde_json::Value;
use thiserror::Error;

/// Display name shared by payload and plain-text response errors.
pub const GENERIC_ERROR_NAME: &str = "ResponseError";

/// Message carried by a [`ResponseError::Payload`].
pub const PAYLOAD_ERROR_MESSAGE: &str = "an error response was returned";

/// Tag identifying which kind of typed response error was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Structured `{msg, code, request_id}` body.
    Server,
    /// JSON body that isn't a structured error.
    Payload,
    /// Plain-text body.
    Response,
}

/// A non-2xx response, classified by its content type and body shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseError {
    /// The server returned a structured error body.
    #[error("{name} ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Display name derived from `code`, e.g. `RateLimitExceededError`.
        name: String,
        /// Error message from the server.
        message: String,
        /// Machine-readable error code.
        code: String,
        /// Optional structured error data.
        data: Option<Value>,
        /// Request correlation id assigned by the server.
        request_id: String,
    },

    /// The server returned JSON that doesn't look like a structured error.
    #[error("an error response was returned ({status})")]
    Payload {
        /// HTTP status code.
        status: u16,
        /// Raw body, preserved as parsed.
        payload: Value,
    },

    /// The server returned a plain-text body.
    #[error("{message} ({status})")]
    Response {
        /// HTTP status code.
        status: u16,
        /// The body text.
        message: String,
    },
}

impl ResponseError {
    /// Which of the three variants this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResponseError::Server { .. } => ErrorKind::Server,
            ResponseError::Payload { .. } => ErrorKind::Payload,
            ResponseError::Response { .. } => ErrorKind::Response,
        }
    }

    /// HTTP status code of the failed response.
    pub fn status(&self) -> u16 {
        match self {
            ResponseError::Server { status, .. }
            | ResponseError::Payload { status, .. }
            | ResponseError::Response { status, .. } => *status,
        }
    }

    /// Display name of the error.
    pub fn name(&self) -> &str {
        match self {
            ResponseError::Server { name, .. } => name,
            ResponseError::Payload { .. } | ResponseError::Response { .. } => GENERIC_ERROR_NAME,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ResponseError::Server { message, .. } | ResponseError::Response { message, .. } => {
                message
            }
            ResponseError::Payload { .. } => PAYLOAD_ERROR_MESSAGE,
        }
    }

    /// Request correlation id, only present on server errors.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ResponseError::Server { request_id, .. } => Some(request_id),
            _ => None,
        }
    }
}

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// HTTP transport failed (DNS, connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A response carried a content type the client can't interpret.
    #[error("unrecognized response content type: {0}")]
    UnrecognizedContentType(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The typed response error, if this is one.
    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            Error::Response(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response(err) => Some(err.status()),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
