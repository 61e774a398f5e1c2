//! HTTP/1.1 response parsing
//!
//! Decodes a raw response captured in a single buffered read. The text splits
//! at the first blank line into a header block and an optional body; the
//! status code is the second whitespace-separated token of the first line.

use crate::http::CRLF;
use crate::{CrawlError, Result};
use std::collections::HashMap;

const HEADER_BODY_SEPARATOR: &str = "\r\n\r\n";
const SET_COOKIE: &str = "Set-Cookie";

/// A parsed HTTP response
///
/// Built fresh per request/response cycle and discarded once the crawl engine
/// has dispatched on it.
#[derive(Debug, Clone)]
pub struct Response {
    /// Numeric status code from the status line
    pub status: u16,

    /// Header map; a repeated key keeps the last value seen
    pub headers: HashMap<String, String>,

    /// Raw `Set-Cookie` values, in response order
    pub cookies: Vec<String>,

    /// Body text; absent when the response carried no header/body separator
    pub body: Option<String>,
}

impl Response {
    /// Parses raw response bytes into a `Response`.
    ///
    /// Fails with a parse error when the first line is not a recognizable
    /// status line. Header lines without a `: ` separator are skipped.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim();

        let (header_block, body) = match text.split_once(HEADER_BODY_SEPARATOR) {
            Some((head, rest)) => (head, Some(rest.to_string())),
            None => (text, None),
        };

        let mut lines = header_block.split(CRLF);
        let status_line = lines.next().unwrap_or("");
        let status = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse::<u16>().ok())
            .ok_or_else(|| CrawlError::Parse(format!("bad status line: {status_line:?}")))?;

        let mut headers = HashMap::new();
        let mut cookies = Vec::new();
        for line in lines {
            if let Some((key, value)) = line.split_once(": ") {
                if key == SET_COOKIE {
                    cookies.push(value.to_string());
                } else {
                    headers.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(Self {
            status,
            headers,
            cookies,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_and_body() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<html>hi</html>";
        let response = Response::parse(raw).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/html")
        );
        assert_eq!(response.body.as_deref(), Some("<html>hi</html>"));
    }

    #[test]
    fn test_headers_only_has_no_body() {
        let raw = b"HTTP/1.1 403 Forbidden\r\nServer: nginx\r\n\r\n";
        let response = Response::parse(raw).unwrap();
        assert_eq!(response.status, 403);
        assert_eq!(response.body, None);
    }

    #[test]
    fn test_set_cookie_order_preserved() {
        let raw = b"HTTP/1.1 200 OK\r\nSet-Cookie: csrftoken=a; Path=/\r\nServer: nginx\r\nSet-Cookie: sessionid=b; HttpOnly\r\n\r\nbody";
        let response = Response::parse(raw).unwrap();
        assert_eq!(
            response.cookies,
            vec!["csrftoken=a; Path=/", "sessionid=b; HttpOnly"]
        );
        assert!(!response.headers.contains_key("Set-Cookie"));
    }

    #[test]
    fn test_repeated_header_last_wins() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Thing: first\r\nX-Thing: second\r\n\r\nbody";
        let response = Response::parse(raw).unwrap();
        assert_eq!(
            response.headers.get("X-Thing").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn test_body_splits_at_first_blank_line() {
        let raw = b"HTTP/1.1 200 OK\r\n\r\nfirst\r\n\r\nsecond";
        let response = Response::parse(raw).unwrap();
        assert_eq!(response.body.as_deref(), Some("first\r\n\r\nsecond"));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            Response::parse(b"not http at all"),
            Err(CrawlError::Parse(_))
        ));
        assert!(matches!(Response::parse(b""), Err(CrawlError::Parse(_))));
    }

    #[test]
    fn test_redirect_location_header() {
        let raw = b"HTTP/1.1 302 Found\r\nLocation: /fakebook/other/\r\n\r\n";
        let response = Response::parse(raw).unwrap();
        assert_eq!(response.status, 302);
        assert_eq!(
            response.headers.get("Location").map(String::as_str),
            Some("/fakebook/other/")
        );
    }

    #[test]
    fn test_malformed_header_line_skipped() {
        let raw = b"HTTP/1.1 200 OK\r\nGoodKey: value\r\nnonsense-line\r\n\r\nbody";
        let response = Response::parse(raw).unwrap();
        assert_eq!(response.headers.len(), 1);
    }
}
