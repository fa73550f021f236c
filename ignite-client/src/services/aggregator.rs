//! Pagination aggregator
//!
//! The search API's paging is cumulative, not windowed: page N contains
//! every session from pages 1 through N, not the Nth slice. So there is no
//! point walking pages one by one. Ask for page 1, read `pages_count` from
//! the answer, and if there is more than one page ask for the final page
//! directly; by the cumulative contract that single response is the complete
//! set. At most two round-trips, and pages 2..pages_count-1 are never
//! requested.
//!
//! Each invocation is self-contained and returns a fresh value; there is no
//! shared aggregate, so overlapping refreshes are just two independent
//! futures and the caller decides which result to keep.

use crate::models::Session;
use crate::services::api::{DataOrigin, SessionsApi};
use crate::services::fetcher::FetchPage;
use ignite_common::Result;

/// The complete, merged session list for one conference day
#[derive(Debug, Clone)]
pub struct DaySessions {
    pub day_id: i64,
    pub sessions: Vec<Session>,
    /// Provenance of the response the list was taken from
    pub origin: DataOrigin,
}

/// Fetch every session for one day, working around cumulative paging.
///
/// The same `clear_cache` flag applies to both requests of the run. Exactly
/// one terminal result is produced; the exploratory first page is never
/// surfaced. The second response is taken as final whatever its own
/// `pages_count` claims, which bounds the run at two round-trips even
/// against an inconsistent server.
pub async fn fetch_day_sessions<F: FetchPage>(
    api: &SessionsApi<F>,
    day_id: i64,
    clear_cache: bool,
) -> Result<DaySessions> {
    // pages are 1-based
    let first = api.cached_get_sessions(day_id, 1, clear_cache).await?;

    if first.response.page_number >= first.response.pages_count {
        tracing::debug!(
            day_id,
            sessions = first.response.sessions.len(),
            "single page covers the whole day"
        );
        return Ok(DaySessions {
            day_id,
            sessions: first.response.sessions,
            origin: first.origin,
        });
    }

    // jump straight to the last page; it contains pages 1..=N combined
    let last_page = first.response.pages_count;
    let full = api.cached_get_sessions(day_id, last_page, clear_cache).await?;

    tracing::debug!(
        day_id,
        last_page,
        sessions = full.response.sessions.len(),
        "aggregated day sessions"
    );

    Ok(DaySessions {
        day_id,
        sessions: full.response.sessions,
        origin: full.origin,
    })
}
