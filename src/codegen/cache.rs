//
//  pyramid-api
//  codegen/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Page Cache
//!
//! Fetched documentation pages are mirrored into a [`CacheStore`] keyed by
//! their logical name (`"User"`, `"method/access/getMe"`, `"index/objects"`).
//! A cached page is always preferred over the network. There is no TTL and
//! no invalidation: delete the entry by hand to force a re-fetch.
//!
//! Two stores are provided:
//!
//! - [`FsCacheStore`]: a directory on disk, one `.htm` file per key
//! - [`MemoryCacheStore`]: an in-process map, used for fixtures and tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::ScrapeError;

/// Storage for fetched documentation pages.
pub trait CacheStore: Send + Sync {
    /// Returns the cached page text for `key`, or `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, ScrapeError>;

    /// Stores the page text for `key`, replacing any previous entry.
    fn store(&self, key: &str, content: &str) -> Result<(), ScrapeError>;
}

/// A cache mirrored into a directory.
///
/// Keys may contain `/`; each segment becomes a subdirectory, so
/// `method/access/getMe` is stored at `<root>/method/access/getMe.htm`.
#[derive(Debug, Clone)]
pub struct FsCacheStore {
    root: PathBuf,
}

impl FsCacheStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|s| !s.is_empty() && *s != "..") {
            path.push(segment);
        }
        path.set_extension("htm");
        path
    }
}

impl CacheStore for FsCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, ScrapeError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, key: &str, content: &str) -> Result<(), ScrapeError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// An in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    pages: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cache with a page. Useful for fixture-backed runs.
    pub fn with_page(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.lock().insert(key.into(), content.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.lock().get(key).cloned())
    }

    fn store(&self, key: &str, content: &str) -> Result<(), ScrapeError> {
        self.lock().insert(key.to_string(), content.to_string());
        Ok(())
    }
}
