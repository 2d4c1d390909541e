//! Client error taxonomy

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Broad error categories, each with its own propagation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field-level problems caught before any request is sent
    Validation,
    /// Non-2xx status or a response that could not be interpreted
    Transport,
    /// The service answered with an explicit error status
    Service,
    /// The service could not be reached at all
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Service => "service",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    #[error("Service returned an unexpected format ({content_type})")]
    UnexpectedContentType { content_type: String },

    #[error("Malformed response: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    Service(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::HttpStatus { .. }
            | ClientError::UnexpectedContentType { .. }
            | ClientError::MalformedBody(_) => ErrorKind::Transport,
            ClientError::Service(_) => ErrorKind::Service,
            ClientError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    /// Troubleshooting hints shown next to the error message
    pub fn remediation(&self) -> Vec<&'static str> {
        match self {
            ClientError::Validation(_) => vec!["Correct the highlighted fields and submit again"],
            ClientError::HttpStatus { status, .. } if *status >= 500 => vec![
                "The prediction service hit an internal error; check its logs",
                "Confirm the model files are loaded (see `health`)",
                "Try again in a few moments",
            ],
            ClientError::HttpStatus { .. } => vec![
                "Check the submitted values against the field limits",
                "Confirm the API URL points at the prediction service",
            ],
            ClientError::UnexpectedContentType { .. } | ClientError::MalformedBody(_) => vec![
                "Confirm the API URL points at the prediction service, not a web page or proxy",
                "Check that the service version matches this client",
            ],
            ClientError::Service(_) => vec![
                "Review the message above; the service rejected the request",
                "Adjust the inputs and try again",
            ],
            ClientError::Unavailable(_) => vec![
                "Make sure the prediction service is running",
                "Check the API URL and network connectivity",
            ],
        }
    }

    /// Classify a reqwest failure that happened before a response arrived
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ClientError::Unavailable(err.to_string())
        } else {
            ClientError::MalformedBody(err.to_string())
        }
    }
}
