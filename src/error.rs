//! Error types

use thiserror::Error;

/// Errors returned by the Wikipedia client
#[derive(Debug, Error)]
pub enum WikiError {
    /// Caller supplied something the client refuses before any request is made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Non-success HTTP status, or the request never completed (`status` is `None`)
    #[error("Wikipedia API request failed{}: {body}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    RemoteApi {
        status: Option<u16>,
        body: String,
    },

    /// A successful response whose body is not JSON
    #[error("failed to decode Wikipedia API response: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WikiError {
    /// HTTP status carried by a remote failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            WikiError::RemoteApi { status, .. } => *status,
            _ => None,
        }
    }

    /// Response body carried by a remote or decode failure
    pub fn body(&self) -> Option<&str> {
        match self {
            WikiError::RemoteApi { body, .. } | WikiError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        WikiError::RemoteApi {
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WikiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_display_includes_status() {
        let err = WikiError::RemoteApi {
            status: Some(503),
            body: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Wikipedia API request failed with status 503: busy");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.body(), Some("busy"));
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let err = WikiError::RemoteApi {
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Wikipedia API request failed: connection refused");
        assert_eq!(err.status(), None);
    }
}
