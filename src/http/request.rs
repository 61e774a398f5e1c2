//! HTTP/1.1 request framing
//!
//! Builds the raw byte form of GET and POST requests. Every target URL is
//! checked against the fixed crawl host before anything is framed; the request
//! line carries the URL's path only.

use crate::config::{CONTACT, HOST, USER_AGENT};
use crate::http::CRLF;
use crate::{CrawlError, Result};
use url::Url;

/// Builds a raw GET request for `url`, attaching `cookies` when any are set.
pub fn build_get(url: &Url, cookies: &[(String, String)]) -> Result<Vec<u8>> {
    check_host(url)?;

    let mut request = format!("GET {} HTTP/1.1{CRLF}", url.path());
    request.push_str(&format!("Host: {HOST}{CRLF}"));
    if !cookies.is_empty() {
        request.push_str(&format!("Cookie: {}{CRLF}", cookie_header(cookies)));
    }
    request.push_str(CRLF);

    Ok(request.into_bytes())
}

/// Builds a raw POST request carrying a form-encoded `body`.
pub fn build_post(url: &Url, cookies: &[(String, String)], body: &str) -> Result<Vec<u8>> {
    check_host(url)?;

    let mut request = format!("POST {} HTTP/1.1{CRLF}", url.path());
    request.push_str(&format!("Host: {HOST}{CRLF}"));
    request.push_str(&format!("From: {CONTACT}{CRLF}"));
    request.push_str(&format!("User-Agent: {USER_AGENT}{CRLF}"));
    request.push_str(&format!(
        "Content-Type: application/x-www-form-urlencoded{CRLF}"
    ));
    request.push_str(&format!("Content-Length: {}{CRLF}", body.len()));
    if !cookies.is_empty() {
        request.push_str(&format!("Cookie: {}{CRLF}", cookie_header(cookies)));
    }
    request.push_str(CRLF);
    request.push_str(body);

    Ok(request.into_bytes())
}

/// Rejects any URL that does not point at the crawl host.
fn check_host(url: &Url) -> Result<()> {
    if url.host_str() == Some(HOST) {
        Ok(())
    } else {
        Err(CrawlError::DomainViolation {
            url: url.to_string(),
            host: HOST.to_string(),
        })
    }
}

/// Formats the Cookie header value as `k=v; k=v`.
fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
