//! HTTP client pairing the codec with a transport

use crate::http::request::{build_get, build_post};
use crate::http::response::Response;
use crate::transport::Transport;
use crate::Result;
use url::Url;

/// Sends framed requests through a transport and parses the responses
pub struct HttpClient<T: Transport> {
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// GETs `url` with the given cookies attached.
    pub fn get(&self, url: &Url, cookies: &[(String, String)]) -> Result<Response> {
        let request = build_get(url, cookies)?;
        let raw = self.transport.exchange(&request)?;
        Response::parse(&raw)
    }

    /// POSTs a form-encoded `body` to `url` with the given cookies attached.
    pub fn post(&self, url: &Url, cookies: &[(String, String)], body: &str) -> Result<Response> {
        let request = build_post(url, cookies, body)?;
        let raw = self.transport.exchange(&request)?;
        Response::parse(&raw)
    }
}
