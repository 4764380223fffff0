use crate::url::CanonicalUrl;
use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks which canonical URLs have been scheduled during one crawl run
///
/// The set grows monotonically for the lifetime of a run and is never
/// persisted. `try_mark` is the deduplication primitive: it must be a
/// single check-and-set so that concurrent tasks cannot both claim the
/// same URL.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks a URL as visited
    ///
    /// Returns true and records the URL iff it was not already present;
    /// returns false without mutation otherwise.
    pub fn try_mark(&self, url: &CanonicalUrl) -> bool {
        self.inner.lock().unwrap().insert(url.as_str().to_string())
    }

    /// Returns the number of URLs marked so far
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
