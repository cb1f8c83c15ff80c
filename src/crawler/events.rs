//! Progress and diagnostic events emitted during a crawl
//!
//! The crawl loop reports everything user-visible through an [`EventSink`]
//! rather than printing directly, so a UI layer (or a test) can observe the
//! crawl without the core depending on it. The default sink forwards events
//! to `tracing`.

/// One progress or diagnostic event from the crawl loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// Informational message (crawl started, page fetched, ...)
    Info(String),
    /// A URL was skipped (out-of-domain, invalid seed, ...)
    Warning(String),
    /// A per-URL failure; the crawl itself continues
    Error(String),
    /// Pages visited so far out of the page budget
    Progress { current: u32, total: u32 },
    /// The crawl finished
    Success(String),
}

/// Sink for crawl events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Default sink that forwards events to `tracing`
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::Info(msg) => tracing::info!("{}", msg),
            CrawlEvent::Warning(msg) => tracing::warn!("{}", msg),
            CrawlEvent::Error(msg) => tracing::error!("{}", msg),
            CrawlEvent::Progress { current, total } => {
                tracing::info!("Progress: {}/{} pages", current, total)
            }
            CrawlEvent::Success(msg) => tracing::info!("{}", msg),
        }
    }
}
