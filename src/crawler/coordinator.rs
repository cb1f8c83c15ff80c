//! Crawl coordination: the main fetch/extract/discover loop
//!
//! The coordinator drives the frontier, applies the domain allow-list and
//! page budget, reports progress through the event sink, and isolates every
//! per-URL failure so the loop always runs to queue-exhaustion, budget
//! exhaustion, or a cooperative stop.

use crate::config::Config;
use crate::crawler::events::{CrawlEvent, EventSink, TracingSink};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::extract::{extract_blocks, TextBlock};
use crate::url::{has_excluded_extension, is_allowed_domain, resolve};
use crate::{AtlasError, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// One successfully fetched, in-scope page with its extracted blocks
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// The URL the page was fetched from
    pub url: String,
    /// Ordered text blocks extracted from the main content region
    pub blocks: Vec<TextBlock>,
}

/// Everything a finished crawl produced
///
/// Pages are held in crawl order (the inference pass scopes modules per
/// page, and the assembler merges page outlines in this order). Lookup by
/// URL is provided for map-style access.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Successfully fetched pages, in the order they were fetched
    pub pages: Vec<PageRecord>,
    /// Number of pages that counted against the budget
    pub pages_visited: u32,
}

impl CrawlOutcome {
    /// Looks up a page record by URL
    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.url == url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Cooperative stop signal for a running crawl
///
/// Cloneable handle; `stop()` from any thread makes the crawl loop finish
/// the current iteration and return its best-effort results.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the crawl stop after the current iteration
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Crawler over a single site within an allow-list of domains
pub struct Crawler {
    config: Config,
    client: Client,
    sink: Arc<dyn EventSink>,
    stop: StopHandle,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(Duration::from_secs(config.crawler.fetch_timeout_secs))?;

        Ok(Self {
            config,
            client,
            sink: Arc::new(TracingSink),
            stop: StopHandle::new(),
        })
    }

    /// Replaces the default tracing sink with a caller-provided one
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns a handle that can stop this crawl from another task
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs the crawl to completion and returns best-effort results
    ///
    /// The loop continues while the frontier is non-empty, the page budget is
    /// not exhausted, and no stop was requested. Per iteration it dequeues in
    /// FIFO order, skips visited URLs without counting them, skips
    /// out-of-domain URLs with a warning (seeds included), and otherwise
    /// fetches, extracts, discovers links, and sleeps the politeness delay.
    /// A fetch failure is reported for that URL and the loop moves on; the
    /// URL is not requeued.
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let seeds = self.validate_seeds()?;

        self.sink.emit(CrawlEvent::Info(format!(
            "Starting crawl from {} seed(s)",
            seeds.len()
        )));

        let max_pages = self.config.crawler.max_pages;
        let delay = Duration::from_millis(self.config.crawler.politeness_delay_ms);
        let mut frontier = Frontier::new(seeds);
        let mut outcome = CrawlOutcome::default();

        while outcome.pages_visited < max_pages && !self.stop.is_stopped() {
            let url = match frontier.dequeue() {
                Some(url) => url,
                None => break,
            };

            if frontier.is_visited(&url) {
                continue;
            }

            if !is_allowed_domain(&url, &self.config.site.allowed_domains) {
                self.sink.emit(CrawlEvent::Warning(format!(
                    "Skipping {} - outside allowed domains",
                    url
                )));
                continue;
            }

            frontier.mark_visited(&url);
            outcome.pages_visited += 1;
            self.sink.emit(CrawlEvent::Progress {
                current: outcome.pages_visited,
                total: max_pages,
            });
            tracing::debug!("Crawling: {}", url);

            let body = match fetch_url(&self.client, url.as_str()).await {
                FetchResult::Success { body, .. } => body,
                FetchResult::HttpError { status_code } => {
                    self.sink.emit(CrawlEvent::Error(format!(
                        "Error crawling {}: HTTP {}",
                        url, status_code
                    )));
                    continue;
                }
                FetchResult::NetworkError { error } => {
                    self.sink
                        .emit(CrawlEvent::Error(format!("Error crawling {}: {}", url, error)));
                    continue;
                }
            };

            // Parse, extract, and discover links in one synchronous pass so
            // the parsed document is dropped before the next await point.
            let (blocks, links) = self.process_body(&url, &body);

            outcome.pages.push(PageRecord {
                url: url.to_string(),
                blocks,
            });

            for link in links {
                if is_allowed_domain(&link, &self.config.site.allowed_domains)
                    && !frontier.is_visited(&link)
                    && !has_excluded_extension(&link)
                {
                    frontier.enqueue(link);
                }
            }

            // Politeness pause between fetches; skips and failures do not pay it
            tokio::time::sleep(delay).await;
        }

        self.sink.emit(CrawlEvent::Success(format!(
            "Finished crawling. Visited {} page(s)",
            outcome.pages_visited
        )));

        Ok(outcome)
    }

    /// Validates the configured seeds, reporting invalid ones
    ///
    /// Individual invalid seeds are reported and dropped; the crawl aborts
    /// only when every seed is invalid.
    fn validate_seeds(&self) -> Result<Vec<Url>> {
        let mut seeds = Vec::new();
        let mut invalid = Vec::new();

        for seed in &self.config.site.seeds {
            match Url::parse(seed) {
                Ok(url) if url.host_str().is_some() => seeds.push(url),
                _ => invalid.push(seed.clone()),
            }
        }

        for seed in &invalid {
            self.sink
                .emit(CrawlEvent::Error(format!("Invalid seed URL: {}", seed)));
        }

        if seeds.is_empty() {
            return Err(AtlasError::NoValidSeeds(invalid.join(", ")));
        }

        Ok(seeds)
    }

    /// Parses a fetched body, extracting content blocks and discovered links
    fn process_body(&self, base: &Url, body: &str) -> (Vec<TextBlock>, Vec<Url>) {
        let doc = Html::parse_document(body);

        let blocks = extract_blocks(&doc, &self.config.extraction);

        // Anchors are discovered over the raw document, not the content
        // region, so navigation links keep the crawl moving.
        let mut links = Vec::new();
        if let Ok(anchor_sel) = Selector::parse("a[href]") {
            for element in doc.select(&anchor_sel) {
                if let Some(href) = element.value().attr("href") {
                    if let Some(absolute) = resolve(base, href) {
                        links.push(absolute);
                    }
                }
            }
        }

        (blocks, links)
    }
}
