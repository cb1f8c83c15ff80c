use serde::Deserialize;

/// Main configuration structure for Doc-Atlas
///
/// The allow-list and seeds are explicit per-crawl configuration; nothing in
/// the crate reads or mutates process-global crawl state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages to fetch before the crawl stops
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Fixed pause between consecutive fetches (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Per-request deadline (seconds); a timed-out fetch fails that URL only
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

/// Crawl scope configuration: where to start and what stays in bounds
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Hosts the crawler may visit; everything else is skipped with a warning
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Seed URLs the frontier starts from (FIFO order is preserved)
    pub seeds: Vec<String>,
}

/// Content extraction selector strategy
///
/// Defaults target MkDocs-Material style documentation; both selectors can be
/// overridden per site. When neither selector matches, extraction falls back
/// to the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Primary content container selector
    #[serde(rename = "content-selector", default = "default_content_selector")]
    pub content_selector: String,

    /// Narrower article region tried inside the content container
    #[serde(rename = "article-selector", default = "default_article_selector")]
    pub article_selector: String,
}

fn default_content_selector() -> String {
    "div.md-content".to_string()
}

fn default_article_selector() -> String {
    "article.md-content__inner".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_selector: default_content_selector(),
            article_selector: default_article_selector(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the extracted module outline is written to as JSON
    #[serde(rename = "json-path")]
    pub json_path: String,
}
