//! Feed client error types.

use std::fmt;

use crate::domain::RecordError;

/// Errors from fetching and normalizing a feed.
#[derive(Debug)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body was not a JSON array
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Missing credentials or fixture data
    NotConfigured(String),

    /// A record in the response failed to normalize
    Record(RecordError),
}

impl ClientError {
    /// Whether this is a failure of the fetch itself rather than of the data.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_)
                | ClientError::Json { .. }
                | ClientError::ApiError { .. }
                | ClientError::RateLimited
                | ClientError::Unauthorized
        )
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "HTTP error: {e}"),
            ClientError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ClientError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ClientError::RateLimited => write!(f, "rate limited by feed API"),
            ClientError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            ClientError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
            ClientError::Record(e) => write!(f, "invalid record: {e}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Record(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

impl From<RecordError> for ClientError {
    fn from(err: RecordError) -> Self {
        ClientError::Record(err)
    }
}
