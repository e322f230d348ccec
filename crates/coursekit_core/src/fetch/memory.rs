//! In-process document source for embedding and tests.

use crate::fetch::{FetchError, FetchResult, Fetcher};
use std::collections::{BTreeMap, BTreeSet};

/// Serves documents from memory. Paths marked as failing return a transport
/// error instead of a body.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: BTreeMap<String, Vec<u8>>,
    failing: BTreeSet<String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> &mut Self {
        self.documents.insert(path.into(), body.into());
        self
    }

    /// Inserts a JSON value serialized as the document body.
    pub fn insert_json(&mut self, path: impl Into<String>, value: &serde_json::Value) -> &mut Self {
        self.insert(path, value.to_string())
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.documents.remove(path)
    }

    /// Makes every fetch of `path` fail at the transport level.
    pub fn fail(&mut self, path: impl Into<String>) -> &mut Self {
        self.failing.insert(path.into());
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> FetchResult<Option<Vec<u8>>> {
        if self.failing.contains(path) {
            return Err(FetchError::Transport {
                path: path.to_string(),
                message: "connection reset".to_string(),
            });
        }
        Ok(self.documents.get(path).cloned())
    }
}
