//! Socket transport for raw HTTP exchanges
//!
//! One fresh TCP + TLS connection per request/response cycle: connect, write
//! the full request, read until the server closes or the buffer cap is hit,
//! close. Nothing is shared between calls.

use crate::config::{HOST, PORT, READ_LIMIT, TRANSPORT_TIMEOUT};
use crate::{CrawlError, Result};
use native_tls::{HandshakeError, TlsConnector, TlsStream};
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

/// A blocking request/response byte exchange with the crawl host.
///
/// The crawler reaches the network exclusively through this seam, which keeps
/// the engine testable against scripted responses.
pub trait Transport {
    /// Sends the full raw request and returns the raw response bytes.
    fn exchange(&self, request: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        (**self).exchange(request)
    }
}

/// TLS transport that opens one encrypted connection per exchange
pub struct TlsTransport {
    connector: TlsConnector,
}

impl TlsTransport {
    /// Creates a transport using the platform's default trust roots.
    pub fn new() -> Result<Self> {
        Ok(Self {
            connector: TlsConnector::new()?,
        })
    }

    fn connect(&self) -> Result<TlsStream<TcpStream>> {
        let addr = (HOST, PORT).to_socket_addrs()?.next().ok_or_else(|| {
            CrawlError::Io(std::io::Error::new(
                ErrorKind::AddrNotAvailable,
                format!("{HOST} did not resolve"),
            ))
        })?;

        let stream = TcpStream::connect_timeout(&addr, TRANSPORT_TIMEOUT).map_err(map_io_error)?;
        stream.set_read_timeout(Some(TRANSPORT_TIMEOUT))?;
        stream.set_write_timeout(Some(TRANSPORT_TIMEOUT))?;

        self.connector.connect(HOST, stream).map_err(|e| match e {
            HandshakeError::Failure(err) => CrawlError::Tls(err),
            HandshakeError::WouldBlock(_) => timeout_error(),
        })
    }
}

impl Transport for TlsTransport {
    fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        let mut stream = self.connect()?;
        stream.write_all(request).map_err(map_io_error)?;

        let mut response = Vec::new();
        let mut chunk = [0u8; 8192];
        while response.len() < READ_LIMIT {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&chunk[..n]),
                Err(e) => return Err(map_io_error(e)),
            }
        }
        response.truncate(READ_LIMIT);

        tracing::trace!("received {} response bytes", response.len());
        Ok(response)
    }
}

fn timeout_error() -> CrawlError {
    CrawlError::TransportTimeout {
        host: HOST.to_string(),
        port: PORT,
    }
}

/// Maps socket deadline overruns to the fatal timeout error; everything else
/// stays an IO error.
fn map_io_error(e: std::io::Error) -> CrawlError {
    match e.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => timeout_error(),
        _ => CrawlError::Io(e),
    }
}
