//
//  pyramid-api
//  codegen/fetch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Page Fetching
//!
//! [`DocSource`] combines a [`PageFetcher`] with a [`CacheStore`]: a page is
//! read from the cache when present and downloaded (then cached) otherwise.
//! Both halves are injectable so a generator run can be made fully
//! deterministic with a [`MemoryCacheStore`](super::MemoryCacheStore) and an
//! [`OfflineFetcher`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pyramid_api::codegen::{DocSource, FsCacheStore, HttpFetcher};
//!
//! # async fn example() -> Result<(), pyramid_api::codegen::ScrapeError> {
//! let source = DocSource::new(HttpFetcher::new()?, FsCacheStore::new("cache"));
//! let page = source
//!     .fetch_page("User", "https://help.example.com/definitions/User.htm")
//!     .await?;
//! println!("{} bytes", page.source.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{CacheStore, ScrapeError};

/// A fetched (or cached) documentation page.
///
/// Only the raw text is kept; call [`HtmlPage::document`] to parse it.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    /// Logical name the page is cached under
    pub name: String,
    /// Where the page lives upstream
    pub url: String,
    /// Raw HTML text
    pub source: String,
}

impl HtmlPage {
    pub fn new(name: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            source: source.into(),
        }
    }

    /// Parses the page into a DOM tree.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.source)
    }
}

/// Downloads page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        let http = Client::builder()
            .user_agent(format!("pyramid-api/{}", crate::VERSION))
            .build()
            .map_err(|source| ScrapeError::Fetch {
                url: String::new(),
                source,
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

/// A fetcher that never touches the network.
///
/// Every fetch fails with [`ScrapeError::NotCached`], so a run backed by it
/// only succeeds for pages already in the cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

#[async_trait]
impl PageFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        Err(ScrapeError::NotCached(url.to_string()))
    }
}

/// Cache-first page source.
pub struct DocSource {
    fetcher: Box<dyn PageFetcher>,
    cache: Box<dyn CacheStore>,
}

impl DocSource {
    pub fn new(fetcher: impl PageFetcher + 'static, cache: impl CacheStore + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            cache: Box::new(cache),
        }
    }

    /// Returns the page cached under `name`, fetching `url` on a miss.
    ///
    /// A fetched page is written to the cache exactly once; later calls for
    /// the same name are served from the cache without a freshness check.
    pub async fn fetch_page(&self, name: &str, url: &str) -> Result<HtmlPage, ScrapeError> {
        if let Some(source) = self.cache.load(name)? {
            tracing::debug!("cache hit for {}", name);
            return Ok(HtmlPage::new(name, url, source));
        }

        tracing::debug!("fetching {} from {}", name, url);
        let source = self.fetcher.fetch(url).await?;
        self.cache.store(name, &source)?;
        Ok(HtmlPage::new(name, url, source))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::codegen::MemoryCacheStore;

    struct CountingFetcher {
        pages: HashMap<String, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::NotCached(url.to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetch_once_then_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CountingFetcher {
            pages: HashMap::from([("https://docs/User.htm".to_string(), "<h1>User</h1>".to_string())]),
            calls: calls.clone(),
        };
        let source = DocSource::new(fetcher, MemoryCacheStore::new());

        let first = source.fetch_page("User", "https://docs/User.htm").await.unwrap();
        let second = source.fetch_page("User", "https://docs/User.htm").await.unwrap();

        assert_eq!(first.source, "<h1>User</h1>");
        assert_eq!(second.source, "<h1>User</h1>");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_preferred_over_network() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CountingFetcher {
            pages: HashMap::from([("https://docs/User.htm".to_string(), "fresh".to_string())]),
            calls: calls.clone(),
        };
        let cache = MemoryCacheStore::new().with_page("User", "stale");
        let source = DocSource::new(fetcher, cache);

        let page = source.fetch_page("User", "https://docs/User.htm").await.unwrap();
        assert_eq!(page.source, "stale");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_offline_miss_fails() {
        let source = DocSource::new(OfflineFetcher, MemoryCacheStore::new());
        let err = source.fetch_page("Role", "https://docs/Role.htm").await.unwrap_err();
        assert!(matches!(err, ScrapeError::NotCached(_)));
    }

    #[tokio::test]
    async fn test_http_fetcher() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/definitions/User.htm")
            .with_status(200)
            .with_body("<html><h1>User</h1></html>")
            .create_async()
            .await;
        let missing = server
            .mock("GET", "/definitions/Nope.htm")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch(&format!("{}/definitions/User.htm", server.url()))
            .await
            .unwrap();
        assert!(body.contains("<h1>User</h1>"));

        let err = fetcher
            .fetch(&format!("{}/definitions/Nope.htm", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::FetchStatus { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));

        ok.assert_async().await;
        missing.assert_async().await;
    }
}
