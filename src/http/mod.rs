//! Raw HTTP/1.1 message codec and the client pairing it with a transport
//!
//! Requests are framed by hand and responses parsed from a single buffered
//! read; there is no chunked transfer-encoding or keep-alive support.

mod client;
mod request;
mod response;

pub use client::HttpClient;
pub use request::{build_get, build_post};
pub use response::Response;

/// Line terminator used throughout HTTP/1.1 framing
pub(crate) const CRLF: &str = "\r\n";
