use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// A fetched page and the hyperlinks found on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// URL used for the successful request
    pub url: String,

    /// Raw `href` values in document order
    pub links: Vec<String>,
}

impl PageLinks {
    /// Create a new page links instance
    pub fn new(url: String, links: Vec<String>) -> Self {
        Self { url, links }
    }
}

/// Shared mapping from effective URL to its hyperlinks
///
/// Writes are last-write-wins: a second insert for the same URL replaces the
/// earlier value entirely.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<Mutex<HashMap<String, Vec<String>>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a page, returning the links it replaced (if any)
    pub async fn insert(&self, page: PageLinks) -> Option<Vec<String>> {
        let mut map = self.inner.lock().await;
        map.insert(page.url, page.links)
    }

    pub async fn get(&self, url: &str) -> Option<Vec<String>> {
        self.inner.lock().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Take the contents out, leaving the store empty
    pub async fn into_map(self) -> HashMap<String, Vec<String>> {
        std::mem::take(&mut *self.inner.lock().await)
    }
}

/// Counters describing what happened during a run
///
/// Evicted and failed URLs are otherwise silent; these counters only report
/// them and never change what gets fetched.
#[derive(Debug, Default)]
pub struct RunStats {
    candidates: AtomicUsize,
    queued: AtomicUsize,
    evicted: AtomicUsize,
    consumers_spawned: AtomicUsize,
    fetched: AtomicUsize,
    failed: AtomicUsize,
    overwritten: AtomicUsize,
}

impl RunStats {
    pub fn record_candidates(&self, count: usize) {
        self.candidates.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_queued(&self, count: usize) {
        self.queued.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_evicted(&self, count: usize) {
        self.evicted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_consumer_spawned(&self) {
        self.consumers_spawned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_overwritten(&self) {
        self.overwritten.fetch_add(1, Ordering::Relaxed);
    }

    /// Plain-value copy of the counters
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            candidates: self.candidates.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            consumers_spawned: self.consumers_spawned.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            overwritten: self.overwritten.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`RunStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Candidate URLs found in the input text
    pub candidates: usize,
    /// URLs appended to the work queue
    pub queued: usize,
    /// URLs dropped by the queue capacity policy
    pub evicted: usize,
    /// Consumer tasks spawned (one per popped URL)
    pub consumers_spawned: usize,
    /// Successful fetches
    pub fetched: usize,
    /// URLs dropped because the fetch failed
    pub failed: usize,
    /// Results that replaced an earlier result for the same URL
    pub overwritten: usize,
}

/// Final output of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Effective URL mapped to its hyperlinks
    pub results: HashMap<String, Vec<String>>,

    pub stats: StatsSummary,
}
