//! Crawl frontier: the FIFO queue of URLs pending visitation
//!
//! Uniqueness is enforced with a visited-set check at dequeue time, not at
//! enqueue time. An already-queued-but-unvisited URL may therefore sit in the
//! queue more than once; the duplicate costs queue space but is skipped
//! without fetching when it surfaces.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO frontier with a visited set
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the given URLs, preserving their order
    pub fn new(seeds: Vec<Url>) -> Self {
        Self {
            queue: VecDeque::from(seeds),
            visited: HashSet::new(),
        }
    }

    /// Appends a URL to the back of the queue
    ///
    /// Duplicate pushes are tolerated; dedup happens at dequeue.
    pub fn enqueue(&mut self, url: Url) {
        self.queue.push_back(url);
    }

    /// Removes and returns the next URL in FIFO order
    pub fn dequeue(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Returns true if the URL has already been visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Marks a URL as visited
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.as_str().to_string());
    }

    /// Number of URLs currently queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no URLs are queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
