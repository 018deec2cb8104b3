//! Error types for the snarfer pipeline.

use thiserror::Error;

/// Main error type for all snarfer operations.
///
/// A message without a recognised link is not an error; the pipeline
/// reports that case as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SnarfError {
    /// HTTP request could not be completed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    /// The API body was not valid JSON for a metadata record.
    #[error("JSON decode error on {url}: {source}")]
    DecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured reply template is malformed or names an unknown field.
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Template configuration could not be parsed.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SnarfError {
    /// True for failures reaching the metadata API (transport or status).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            SnarfError::RequestError(_) | SnarfError::HttpStatus { .. }
        )
    }
}

/// Result type alias for snarfer operations.
pub type Result<T> = std::result::Result<T, SnarfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_mentions_url() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = SnarfError::DecodeError {
            url: "https://api.discogs.com/releases/1".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("JSON decode error on https://api.discogs.com/releases/1:"));
        assert!(!err.is_fetch_error());
    }

    #[test]
    fn test_http_status_is_fetch_error() {
        let err = SnarfError::HttpStatus {
            url: "https://api.discogs.com/masters/9".to_string(),
            status: 404,
            message: "Master Release not found.".to_string(),
        };
        assert!(err.is_fetch_error());
        assert_eq!(
            err.to_string(),
            "HTTP 404 from https://api.discogs.com/masters/9: Master Release not found."
        );
    }
}
