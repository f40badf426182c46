//! Error handling for the NeoStore supplier client

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::model::FieldError;

/// Unified error type for the supplier client
#[derive(Error, Debug)]
pub enum Error {
    /// Local validation failures, keyed by field name; no request was issued
    #[error("Validation failed: {}", format_messages(.0))]
    Validation(BTreeMap<String, String>),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors while reading an import file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A structured error reported by the backend
    #[error("{error} (status {status})")]
    Server {
        status: u16,
        error: String,
        field_errors: Vec<FieldError>,
    },

    /// General errors
    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Field-level errors reported by the backend, if any
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Error::Server { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }

    /// Whether this error came from a request that never reached a response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Timeout | Error::Http(_))
    }
}

fn format_messages(errors: &BTreeMap<String, String>) -> String {
    errors
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}
