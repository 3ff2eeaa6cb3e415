//! Avatar image loading and caching for the users view.
//!
//! Avatars are fetched on a worker thread and cached in a bounded LRU map
//! keyed by URL. In-flight fetches are never cancelled; late results are
//! discarded through a generation check instead (see
//! [`super::data_source::UsersDataSource`]).

use log::*;
use lru::LruCache;
use std::{
    num::NonZeroUsize,
    sync::{
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
    thread,
};

use crate::github::client::GitHubApi;

/// Maximum number of avatars kept in the cache.
pub const CACHE_CAPACITY: usize = 50;

/// Bounded least-recently-used cache of raw avatar bytes keyed by URL.
pub struct AvatarCache {
    entries: LruCache<String, Arc<Vec<u8>>>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap()),
        }
    }

    /// Returns the cached bytes for `url`, marking the entry as recently
    /// used.
    pub fn get(&mut self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.entries.get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(url)
    }

    /// Inserts `bytes` for `url`, evicting the least-recently-used entry
    /// when at capacity. Concurrent fetches for one URL are not
    /// deduplicated; the last writer wins, which is harmless because the
    /// payload is content-stable per URL.
    pub fn put(&mut self, url: String, bytes: Vec<u8>) {
        self.entries.put(url, Arc::new(bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetch issued for a row binding. The generation tags which binding of
/// the row issued it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvatarRequest {
    pub url: String,
    pub row: usize,
    pub generation: u64,
}

/// A completed fetch carrying the request tags back to the data source.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvatarResult {
    pub url: String,
    pub row: usize,
    pub generation: u64,
    pub bytes: Vec<u8>,
}

/// Worker thread downloading avatars one request at a time. Failed or
/// empty responses are dropped silently: no retry, no result, no cache
/// entry.
pub struct AvatarLoader {
    tx: Sender<AvatarRequest>,
    rx: Receiver<AvatarResult>,
}

impl AvatarLoader {
    pub fn new(client: Arc<dyn GitHubApi>) -> Self {
        let (req_tx, req_rx) = channel::<AvatarRequest>();
        let (result_tx, result_rx) = channel::<AvatarResult>();

        thread::spawn(move || {
            while let Ok(request) = req_rx.recv() {
                match client.fetch_avatar(&request.url) {
                    Ok(bytes) => {
                        let result = AvatarResult {
                            url: request.url,
                            row: request.row,
                            generation: request.generation,
                            bytes,
                        };

                        if result_tx.send(result).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!("avatar fetch failed for {}: {e}", request.url);
                    }
                }
            }
        });

        Self {
            tx: req_tx,
            rx: result_rx,
        }
    }

    pub fn request(&self, request: AvatarRequest) {
        // worker gone means we are shutting down
        let _ = self.tx.send(request);
    }

    /// Returns the next completed fetch without blocking.
    pub fn try_recv(&self) -> Option<AvatarResult> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
#[path = "./avatar_tests.rs"]
mod tests;
