//! Crawl loop and per-status dispatch
//!
//! The engine owns the frontier and is the only thing that mutates it. Every
//! fetch fully blocks the loop; ordering is strict FIFO except for the two
//! deliberate reprioritizations (redirect to the front, retry to the tail).

use crate::config::{Credentials, CRAWL_PREFIX, FLAG_TARGET, HOST};
use crate::crawler::frontier::Frontier;
use crate::crawler::scanner::scan_document;
use crate::http::{HttpClient, Response};
use crate::session::Session;
use crate::transport::Transport;
use crate::{CrawlError, Result};
use url::Url;

const STATUS_OK: u16 = 200;
const STATUS_FOUND: u16 = 302;
const STATUS_FORBIDDEN: u16 = 403;
const STATUS_NOT_FOUND: u16 = 404;
const STATUS_UNAVAILABLE: u16 = 503;

/// Authenticated breadth-first crawler over a fixed path prefix
///
/// The public contract is `login` followed by `crawl`; request framing,
/// response parsing, and cookie handling stay behind this boundary.
pub struct Crawler<T: Transport> {
    client: HttpClient<T>,
    session: Session,
    credentials: Credentials,
}

impl<T: Transport> Crawler<T> {
    /// Creates a crawler that fetches through `transport`.
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            client: HttpClient::new(transport),
            session: Session::new(),
            credentials,
        }
    }

    /// Logs in and stores the session cookies for the rest of the run.
    pub fn login(&mut self) -> Result<()> {
        self.session.login(&self.client, &self.credentials)
    }

    /// Runs the crawl to completion and returns the flags found.
    ///
    /// Terminates the instant the flag target is reached, or when the
    /// frontier runs dry (returning however many flags were seen by then).
    /// Transport timeouts and unrecognized statuses abort the whole run.
    pub fn crawl(&mut self) -> Result<Vec<String>> {
        if !self.session.is_authenticated() {
            return Err(CrawlError::MissingSessionToken);
        }

        let mut frontier = Frontier::new();
        frontier.push_back(crawl_root()?);
        let mut flags = Vec::new();

        while let Some(url) = frontier.pop() {
            tracing::debug!("fetching {url}");
            let response = self.fetch(&url)?;
            frontier.mark_visited(url.clone());

            match response.status {
                STATUS_OK => {
                    if self.collect_page(&url, &response, &mut frontier, &mut flags)? {
                        return Ok(flags);
                    }
                }
                STATUS_FOUND => {
                    let location = response.headers.get("Location").ok_or_else(|| {
                        CrawlError::Parse(format!("redirect from {url} without Location"))
                    })?;
                    let target = url.join(location)?;
                    tracing::debug!("redirected to {target}");
                    frontier.push_front(target);
                }
                STATUS_FORBIDDEN | STATUS_NOT_FOUND => {
                    tracing::debug!("abandoning {url} ({})", response.status);
                }
                STATUS_UNAVAILABLE => {
                    tracing::debug!("server error for {url}, retrying later");
                    frontier.push_back(url);
                }
                other => return Err(CrawlError::UnrecognizedStatus(other)),
            }
        }

        tracing::info!(
            "frontier exhausted after {} pages with {} of {} flags",
            frontier.visited_len(),
            flags.len(),
            FLAG_TARGET
        );
        Ok(flags)
    }

    /// Scans a fetched page, queues in-prefix links, and appends flags.
    ///
    /// Returns true once the flag target is reached; flags past the target on
    /// the same page are left uncollected.
    fn collect_page(
        &self,
        url: &Url,
        response: &Response,
        frontier: &mut Frontier,
        flags: &mut Vec<String>,
    ) -> Result<bool> {
        let body = match &response.body {
            Some(body) => body,
            None => return Ok(false),
        };

        let scan = scan_document(body);
        for href in &scan.links {
            if !href.contains(CRAWL_PREFIX) {
                continue;
            }
            let link = url.join(href)?;
            if frontier.enqueue_discovered(link) {
                tracing::trace!("queued {href} ({} pending)", frontier.pending_len());
            }
        }

        for flag in scan.flags {
            flags.push(flag);
            tracing::info!("flag {} of {} found on {url}", flags.len(), FLAG_TARGET);
            if flags.len() == FLAG_TARGET {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn fetch(&self, url: &Url) -> Result<Response> {
        self.client.get(url, &self.session.cookie_pairs())
    }
}

/// The crawl's seed URL.
fn crawl_root() -> Result<Url> {
    Ok(Url::parse(&format!("https://{HOST}{CRAWL_PREFIX}"))?)
}
