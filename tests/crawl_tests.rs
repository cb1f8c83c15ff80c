//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl cycle end-to-end: frontier traversal, domain scoping, link
//! filtering, failure isolation, and outline assembly.

use doc_atlas::config::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, SiteConfig};
use doc_atlas::crawler::{CrawlEvent, Crawler, EventSink};
use doc_atlas::output::assemble_modules;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects crawl events for assertions
#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<CrawlEvent>>,
}

impl TestSink {
    fn events(&self) -> Vec<CrawlEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: CrawlEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Creates a test configuration for the given mock server
fn test_config(server: &MockServer, seeds: Vec<String>, max_pages: u32) -> Config {
    let domain = url::Url::parse(&server.uri())
        .expect("Failed to parse mock server URI")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    Config {
        crawler: CrawlerConfig {
            max_pages,
            politeness_delay_ms: 10, // Very short for testing
            fetch_timeout_secs: 5,
        },
        site: SiteConfig {
            allowed_domains: vec![domain],
            seeds,
        },
        extraction: ExtractionConfig::default(),
        output: OutputConfig {
            json_path: "./test_modules.json".to_string(),
        },
    }
}

/// Mounts a simple HTML page at the given path
async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn doc_page(content: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    format!(
        r#"<html><head><title>Test</title></head><body>
        <nav><p>Site navigation</p></nav>
        <div class="md-content"><article class="md-content__inner">{content}</article></div>
        {anchors}
        </body></html>"#
    )
}

#[tokio::test]
async fn test_full_crawl_and_outline() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        doc_page(
            "<h1>Docs</h1><h2>Auth</h2><p>Authentication overview.</p>\
             <h3>Login</h3><p>How to log in.</p>",
            &["/billing"],
        ),
    )
    .await;

    mount_page(
        &server,
        "/billing",
        doc_page("<h2>Billing</h2><p>Billing overview.</p>", &[]),
    )
    .await;

    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(outcome.len(), 2);
    assert_eq!(outcome.pages_visited, 2);

    let modules = assemble_modules(&outcome);
    assert_eq!(modules.len(), 2);

    assert_eq!(modules[0].name, "Auth");
    assert_eq!(modules[0].description, "Authentication overview.");
    assert_eq!(modules[0].submodules.len(), 1);
    assert_eq!(modules[0].submodules[0].name, "Login");
    assert_eq!(modules[0].submodules[0].description, "How to log in.");

    assert_eq!(modules[1].name, "Billing");
    assert!(modules[1].source_url.ends_with("/billing"));
}

#[tokio::test]
async fn test_seeds_are_crawled_in_fifo_order() {
    let server = MockServer::start().await;

    mount_page(&server, "/first", doc_page("<h2>First</h2><p>a</p>", &[])).await;
    mount_page(&server, "/second", doc_page("<h2>Second</h2><p>b</p>", &[])).await;

    let config = test_config(
        &server,
        vec![
            format!("{}/first", server.uri()),
            format!("{}/second", server.uri()),
        ],
        10,
    );
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(outcome.len(), 2);
    assert!(outcome.pages[0].url.ends_with("/first"));
    assert!(outcome.pages[1].url.ends_with("/second"));
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let server = MockServer::start().await;

    // A chain of pages longer than the budget
    mount_page(&server, "/", doc_page("<h2>Root</h2><p>r</p>", &["/p1"])).await;
    mount_page(&server, "/p1", doc_page("<h2>P1</h2><p>1</p>", &["/p2"])).await;
    mount_page(&server, "/p2", doc_page("<h2>P2</h2><p>2</p>", &["/p3"])).await;
    mount_page(&server, "/p3", doc_page("<h2>P3</h2><p>3</p>", &[])).await;

    let config = test_config(&server, vec![format!("{}/", server.uri())], 2);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.len(), 2);
}

#[tokio::test]
async fn test_revisits_produce_no_second_record() {
    let server = MockServer::start().await;

    // Both pages link back to the root; the root must be fetched only once
    mount_page(
        &server,
        "/",
        doc_page("<h2>Root</h2><p>r</p>", &["/p1", "/"]),
    )
    .await;
    mount_page(&server, "/p1", doc_page("<h2>P1</h2><p>1</p>", &["/"])).await;

    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.len(), 2);

    let roots = outcome
        .pages
        .iter()
        .filter(|p| p.url == format!("{}/", server.uri()))
        .count();
    assert_eq!(roots, 1);
}

#[tokio::test]
async fn test_excluded_extensions_are_never_fetched() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        doc_page(
            "<h2>Root</h2><p>r</p>",
            &["/manual.pdf", "/archive.zip", "/logo.png", "/photo.jpg", "/page"],
        ),
    )
    .await;
    mount_page(&server, "/page", doc_page("<h2>Page</h2><p>p</p>", &[])).await;

    for file in ["/manual.pdf", "/archive.zip", "/logo.png", "/photo.jpg"] {
        Mock::given(method("GET"))
            .and(path(file))
            .respond_with(ResponseTemplate::new(200))
            .expect(0) // Must never be fetched
            .mount(&server)
            .await;
    }

    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(outcome.len(), 2);
    // Mock expectations (expect(0)) are verified when the server drops
}

#[tokio::test]
async fn test_out_of_domain_links_are_skipped_with_warning() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        doc_page(
            "<h2>Root</h2><p>r</p>",
            &["https://elsewhere.example.net/page", "/local"],
        ),
    )
    .await;
    mount_page(&server, "/local", doc_page("<h2>Local</h2><p>l</p>", &[])).await;

    let sink = Arc::new(TestSink::default());
    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config)
        .expect("Failed to create crawler")
        .with_sink(sink.clone());
    let outcome = crawler.run().await.expect("Crawl failed");

    // Only the two in-domain pages count against the budget
    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.len(), 2);

    let warned = sink.events().iter().any(
        |e| matches!(e, CrawlEvent::Warning(msg) if msg.contains("elsewhere.example.net")),
    );
    assert!(warned, "expected an out-of-domain warning");
}

#[tokio::test]
async fn test_fetch_failures_are_isolated() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        doc_page("<h2>Root</h2><p>r</p>", &["/missing", "/ok"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", doc_page("<h2>Ok</h2><p>fine</p>", &[])).await;

    let sink = Arc::new(TestSink::default());
    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config)
        .expect("Failed to create crawler")
        .with_sink(sink.clone());
    let outcome = crawler.run().await.expect("Crawl failed");

    // The 404 consumed budget but produced no record; /ok still crawled
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.len(), 2);
    assert!(outcome.get(&format!("{}/ok", server.uri())).is_some());

    let errored = sink
        .events()
        .iter()
        .any(|e| matches!(e, CrawlEvent::Error(msg) if msg.contains("HTTP 404")));
    assert!(errored, "expected a fetch error event");
}

#[tokio::test]
async fn test_all_fetches_fail_yields_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl must not error out");

    assert!(outcome.is_empty());
    assert!(assemble_modules(&outcome).is_empty());
}

#[tokio::test]
async fn test_progress_events_count_up_to_budget() {
    let server = MockServer::start().await;

    mount_page(&server, "/", doc_page("<h2>Root</h2><p>r</p>", &["/p1"])).await;
    mount_page(&server, "/p1", doc_page("<h2>P1</h2><p>1</p>", &[])).await;

    let sink = Arc::new(TestSink::default());
    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config)
        .expect("Failed to create crawler")
        .with_sink(sink.clone());
    crawler.run().await.expect("Crawl failed");

    let progress: Vec<(u32, u32)> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::Progress { current, total } => Some((*current, *total)),
            _ => None,
        })
        .collect();

    assert_eq!(progress, vec![(1, 10), (2, 10)]);

    let finished = sink
        .events()
        .iter()
        .any(|e| matches!(e, CrawlEvent::Success(_)));
    assert!(finished);
}

#[tokio::test]
async fn test_navigation_text_never_reaches_the_outline() {
    let server = MockServer::start().await;

    // The nav contains a heading that must not become a module
    let body = r#"<html><body>
        <div class="md-content">
            <nav><h2>Nav Module</h2><p>nav text</p></nav>
            <h2>Real</h2><p>Real description.</p>
        </div>
        </body></html>"#;
    mount_page(&server, "/", body.to_string()).await;

    let config = test_config(&server, vec![format!("{}/", server.uri())], 10);
    let crawler = Crawler::new(config).expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    let modules = assemble_modules(&outcome);
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "Real");
}
