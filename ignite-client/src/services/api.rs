//! Cached fetch orchestrator
//!
//! Composes cache, fetcher and decoder into the two calls the rest of the
//! system consumes: `cached_get_sessions` (cache-first with an explicit
//! bypass) and the plain `get_sessions` (never touches the cache).
//!
//! There is no callback plumbing here: each call is an async fn whose result
//! resumes the caller's task on its own runtime context, never inline on the
//! I/O path.

use crate::models::{decode_response, PagedSessionsResponse};
use crate::services::cache::ResponseCache;
use crate::services::fetcher::FetchPage;
use ignite_common::Result;

/// Where a successful result came from, so callers can tell cached data
/// apart from a fresh fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Served from the on-disk response cache
    Cache,
    /// Fetched live from the search API
    Network,
}

/// A decoded page plus its provenance
#[derive(Debug, Clone)]
pub struct SessionsResult {
    pub response: PagedSessionsResponse,
    pub origin: DataOrigin,
}

/// Orchestrates cache -> fetch -> save -> decode for single pages
pub struct SessionsApi<F: FetchPage> {
    fetcher: F,
    cache: ResponseCache,
}

impl<F: FetchPage> SessionsApi<F> {
    pub fn new(fetcher: F, cache: ResponseCache) -> Self {
        Self { fetcher, cache }
    }

    /// Fetch one page, consulting the cache first.
    ///
    /// With `clear_cache` set the cache is never read, only refreshed: the
    /// page is fetched live and the raw bytes saved over any existing entry.
    /// The save is enqueued fire-and-forget and does not delay the result.
    pub async fn cached_get_sessions(
        &self,
        day_id: i64,
        page_number: i64,
        clear_cache: bool,
    ) -> Result<SessionsResult> {
        // if clear_cache is set we never load from cache
        if !clear_cache {
            if let Some(bytes) = self.cache.load(day_id, page_number).await {
                tracing::debug!(day_id, page_number, "serving sessions page from cache");
                return Ok(SessionsResult {
                    response: decode_response(&bytes)?,
                    origin: DataOrigin::Cache,
                });
            }
        }

        let bytes = self.fetcher.fetch_page(day_id, page_number).await?;
        // cache the raw bytes even if decoding then fails; they were valid at
        // transport level and a later client version may decode them
        self.cache.save(day_id, page_number, bytes.clone()).await;

        Ok(SessionsResult {
            response: decode_response(&bytes)?,
            origin: DataOrigin::Network,
        })
    }

    /// Plain variant: always fetches live, never reads or writes the cache.
    pub async fn get_sessions(
        &self,
        day_id: i64,
        page_number: i64,
    ) -> Result<PagedSessionsResponse> {
        let bytes = self.fetcher.fetch_page(day_id, page_number).await?;
        decode_response(&bytes)
    }
}
