//! Helpers shared by the test modules.

use crate::error::FetchError;
use crate::ingestion::fetch::Fetcher;

use std::collections::HashMap;
use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned documents; any other locator answers like a 404.
#[derive(Default)]
pub struct StaticFetcher {
    documents: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, locator: &str, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(locator.to_string(), body.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: locator.to_string(),
                status: 404,
            })
    }
}

/// Holds every fetch until `parties` fetches are in flight, then serves from `inner`.
pub struct GatedFetcher {
    inner: StaticFetcher,
    gate: Barrier,
}

impl GatedFetcher {
    pub fn new(inner: StaticFetcher, parties: usize) -> Self {
        Self {
            inner,
            gate: Barrier::new(parties),
        }
    }
}

impl Fetcher for GatedFetcher {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        self.gate.wait();
        self.inner.fetch(locator)
    }
}
