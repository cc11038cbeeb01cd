//! HTTP response representation

use std::collections::HashMap;
use url::Url;

use crate::error::{NetError, NetResult};

/// HTTP response
#[derive(Debug)]
pub struct Response {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response
    pub fn new(url: Url, status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }

    /// Whether the server labelled the body as CSS
    pub fn is_stylesheet(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/css"))
    }

    /// Get the body as a UTF-8 string
    pub fn text(&self) -> NetResult<String> {
        String::from_utf8(self.body.clone()).map_err(|e| NetError::InvalidEncoding(e.to_string()))
    }

    /// Get the body as a UTF-8 string, replacing invalid characters
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &[u8]) -> Response {
        let mut headers = HashMap::new();
        if let Some(ct) = content_type {
            headers.insert("content-type".to_string(), ct.to_string());
        }
        Response::new(
            Url::parse("https://example.com/theme.css").unwrap(),
            status,
            headers,
            body.to_vec(),
        )
    }

    #[test]
    fn test_success_range() {
        assert!(response(200, None, b"").is_success());
        assert!(response(204, None, b"").is_success());
        assert!(!response(404, None, b"").is_success());
    }

    #[test]
    fn test_stylesheet_content_type() {
        assert!(response(200, Some("text/css; charset=utf-8"), b"").is_stylesheet());
        assert!(!response(200, Some("text/html"), b"").is_stylesheet());
        assert!(!response(200, None, b"").is_stylesheet());
    }

    #[test]
    fn test_text() {
        assert_eq!(response(200, None, b"a {}").text().unwrap(), "a {}");
        assert!(response(200, None, &[0xff, 0xfe]).text().is_err());
        assert_eq!(response(200, None, &[b'a', 0xff]).text_lossy(), "a\u{fffd}");
    }
}
