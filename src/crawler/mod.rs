//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-request deadlines
//! - The FIFO frontier and visited set
//! - Domain scoping, page budget, and politeness delay
//! - Progress and diagnostic event reporting

mod coordinator;
mod events;
mod fetcher;
mod frontier;

pub use coordinator::{CrawlOutcome, Crawler, PageRecord, StopHandle};
pub use events::{CrawlEvent, EventSink, TracingSink};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::Frontier;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It builds the HTTP
/// client, seeds the frontier from the configuration, and runs the crawl
/// loop to completion, returning whatever was successfully fetched.
pub async fn crawl(config: Config) -> Result<CrawlOutcome> {
    Crawler::new(config)?.run().await
}
