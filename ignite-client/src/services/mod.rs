//! Service modules for the fetch-cache-aggregate pipeline

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod fetcher;
pub mod grouping;

pub use aggregator::{fetch_day_sessions, DaySessions};
pub use api::{DataOrigin, SessionsApi, SessionsResult};
pub use cache::ResponseCache;
pub use fetcher::{FetchPage, SearchApiClient};
pub use grouping::{group_sessions, ScheduleSection};
