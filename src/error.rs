//! Error types for booksearch
//!
//! Every failure in the widget degrades to "no suggestions"; these types exist
//! so the catalog client and the CLI can report what actually went wrong.

use thiserror::Error;

/// Main error type for booksearch operations
#[derive(Error, Debug)]
pub enum BookSearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status} for '{url}'")]
    Status { status: u16, url: String },

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type alias for booksearch operations
pub type Result<T> = std::result::Result<T, BookSearchError>;

impl BookSearchError {
    /// Check if this error only affects a single lookup (the widget keeps running)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BookSearchError::Http(_) | BookSearchError::Status { .. } | BookSearchError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_are_recoverable() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(BookSearchError::Decode(decode).is_recoverable());
        assert!(BookSearchError::Status {
            status: 503,
            url: "http://localhost".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn setup_failures_are_fatal() {
        assert!(!BookSearchError::InvalidEndpoint("nope".to_string()).is_recoverable());
        assert!(!BookSearchError::Logging("already set".to_string()).is_recoverable());
    }

    #[test]
    fn status_message_names_the_url() {
        let err = BookSearchError::Status {
            status: 404,
            url: "http://localhost/volumes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog returned status 404 for 'http://localhost/volumes'"
        );
    }
}
