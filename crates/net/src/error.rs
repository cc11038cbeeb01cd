//! Network error types

use thiserror::Error;

/// Network operation result type
pub type NetResult<T> = Result<T, NetError>;

/// Errors raised while loading stylesheet source
#[derive(Debug, Error)]
pub enum NetError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Stylesheet is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetError {
    /// Whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, NetError::NotFound(_) | NetError::HttpError { status: 404 })
    }
}

impl From<reqwest::Error> for NetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetError::Timeout
        } else if err.is_connect() {
            NetError::ConnectionError(err.to_string())
        } else if err.is_redirect() {
            NetError::TooManyRedirects
        } else {
            NetError::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetError {
    fn from(err: url::ParseError) -> Self {
        NetError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert!(NetError::NotFound("a.css".into()).is_not_found());
        assert!(NetError::HttpError { status: 404 }.is_not_found());
        assert!(!NetError::HttpError { status: 500 }.is_not_found());
        assert!(!NetError::Timeout.is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(NetError::HttpError { status: 503 }.to_string(), "HTTP error: 503");
        assert_eq!(
            NetError::UnsupportedScheme("ftp".into()).to_string(),
            "Unsupported scheme: ftp"
        );
    }
}
