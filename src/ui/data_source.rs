//! View data source for the users table: row binding, avatar lookup, and
//! stale-fetch suppression.

use std::sync::Arc;

use crate::github::types::GitHubUser;

use super::avatar::{AvatarCache, AvatarLoader, AvatarRequest, AvatarResult};

// matches the blank placeholder dimensions drawn by the original screen
const PLACEHOLDER_SIZE: usize = 48;

/// Image bytes to show for a row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RowAvatar {
    /// The fetched avatar for the bound URL.
    Loaded(Arc<Vec<u8>>),
    /// The uniform blank placeholder shown while a fetch is outstanding.
    Placeholder(Arc<Vec<u8>>),
}

/// Maps rows of the users table to avatar images.
///
/// Every rebinding of rows bumps a generation counter and issues fetches
/// tagged with it for any uncached avatar. A completed fetch always writes
/// the cache, but the row only redraws if its binding generation still
/// matches: fetches are never cancelled, their results just arrive too
/// late to matter.
pub struct UsersDataSource {
    cache: AvatarCache,
    loader: AvatarLoader,
    generation: u64,
    // avatar URL bound to each row position
    rows: Vec<String>,
    placeholder: Option<Arc<Vec<u8>>>,
}

impl UsersDataSource {
    pub fn new(loader: AvatarLoader) -> Self {
        Self {
            cache: AvatarCache::new(),
            loader,
            generation: 0,
            rows: Vec::new(),
            placeholder: None,
        }
    }

    /// Rebinds row positions to `users`. When the bound URLs change, the
    /// generation advances and fetches are issued for rows without a cache
    /// entry.
    pub fn bind_rows(&mut self, users: &[GitHubUser]) {
        let urls: Vec<String> = users.iter().map(|u| u.avatar_url.clone()).collect();

        if urls == self.rows {
            return;
        }

        self.generation += 1;
        self.rows = urls;

        for (row, url) in self.rows.iter().enumerate() {
            if self.cache.contains(url) {
                continue;
            }

            self.loader.request(AvatarRequest {
                url: url.clone(),
                row,
                generation: self.generation,
            });
        }
    }

    /// Drains completed fetches, returning the row positions that may
    /// redraw.
    pub fn poll(&mut self) -> Vec<usize> {
        let mut redraw = Vec::new();

        while let Some(result) = self.loader.try_recv() {
            let row = result.row;
            if self.accept(result) {
                redraw.push(row);
            }
        }

        redraw
    }

    /// Returns the image for `row`: the cached avatar when present,
    /// otherwise the blank placeholder (created once and reused).
    pub fn avatar(&mut self, row: usize) -> RowAvatar {
        if let Some(url) = self.rows.get(row).cloned() {
            if let Some(bytes) = self.cache.get(&url) {
                return RowAvatar::Loaded(bytes);
            }
        }

        RowAvatar::Placeholder(self.placeholder())
    }

    /// Applies a completed fetch. The cache is always written; the return
    /// value reports whether the originating row binding is still current
    /// and the row may redraw.
    fn accept(&mut self, result: AvatarResult) -> bool {
        let current = result.generation == self.generation
            && self
                .rows
                .get(result.row)
                .map(|url| *url == result.url)
                .unwrap_or(false);

        self.cache.put(result.url, result.bytes);

        current
    }

    fn placeholder(&mut self) -> Arc<Vec<u8>> {
        if let Some(placeholder) = &self.placeholder {
            return Arc::clone(placeholder);
        }

        // uniform white square, one byte per pixel
        let blank = Arc::new(vec![0xff_u8; PLACEHOLDER_SIZE * PLACEHOLDER_SIZE]);
        self.placeholder = Some(Arc::clone(&blank));
        blank
    }
}

#[cfg(test)]
#[path = "./data_source_tests.rs"]
mod tests;
