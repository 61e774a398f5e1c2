//! Crawl engine: frontier management, status dispatch, and page scanning
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier and visited-set bookkeeping
//! - The per-status dispatch policy of the crawl loop
//! - Single-pass HTML scanning for anchors and flags

mod engine;
mod frontier;
mod scanner;

pub use engine::Crawler;
pub use frontier::Frontier;
pub use scanner::{scan_document, Scan};
