use std::collections::BTreeMap;

use thiserror::Error;

/// Error returned by every call that reaches the REST backend.
///
/// The backend reports failures either as a field-scoped mapping
/// (`fieldErrors`) or as a single message; both are kept verbatim so the
/// controllers can show them as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Field-scoped errors reported by the backend, if any.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ApiError::Api { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// The backend's own message, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => Some(message),
            ApiError::NotFound(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Transport failures are worth retrying; rejections are not.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }
}
