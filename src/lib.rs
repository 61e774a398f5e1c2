//! Flagcrawl: an authenticated single-site flag hunter
//!
//! This crate implements a web crawler that logs into a fixed web application,
//! walks its pages breadth-first within one path prefix, and collects the
//! secret flags embedded in page text.

pub mod config;
pub mod crawler;
pub mod http;
pub mod session;
pub mod transport;

use thiserror::Error;

/// Main error type for flagcrawl operations
///
/// Recoverable HTTP statuses (403/404/503) are handled inside the crawl loop
/// and never surface here; everything below aborts the run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Transport timeout for {host}:{port}")]
    TransportTimeout { host: String, port: u16 },

    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL {url} does not point to {host}")]
    DomainViolation { url: String, host: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Malformed HTTP response: {0}")]
    Parse(String),

    #[error("Login page did not set an anti-forgery cookie")]
    MissingAntiForgeryToken,

    #[error("Login response did not set a session cookie")]
    MissingSessionToken,

    #[error("Unrecognized HTTP status: {0}")]
    UnrecognizedStatus(u16),
}

/// Result type alias for flagcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use crawler::Crawler;
pub use session::Session;
pub use transport::{TlsTransport, Transport};
