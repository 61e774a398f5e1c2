//! Fixed crawl target and startup credentials
//!
//! The crawler talks to exactly one application on one host; everything that
//! pins it there lives in this module.

use std::time::Duration;

/// Host serving the crawled application
pub const HOST: &str = "proj5.3700.network";

/// HTTPS port on the crawl host
pub const PORT: u16 = 443;

/// Path of the login form
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Path prefix the crawl is confined to; doubles as the crawl root
pub const CRAWL_PREFIX: &str = "/fakebook/";

/// Substring marking a flag-bearing text node
pub const FLAG_SENTINEL: &str = "FLAG: ";

/// Number of flags that ends the crawl
pub const FLAG_TARGET: usize = 5;

/// Upper bound on bytes read from a single response
pub const READ_LIMIT: usize = 1_000_000;

/// Connect/read/write budget for one socket lifecycle
pub const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent on POST requests
pub const USER_AGENT: &str = "flagcrawl/1.0";

/// From address sent on POST requests
pub const CONTACT: &str = "crawler@flagcrawl.net";

/// Login credentials, supplied once at startup and never mutated
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
