//! # Ignite Schedule Client
//!
//! Client for the MS Ignite NZ session search API:
//! - Strict data model decoded leniently from the loosely-specified wire JSON
//! - Per-page response cache with strictly serialized disk access
//! - Cached fetch orchestration (cache -> fetch -> save -> decode)
//! - Pagination aggregation working around the API's cumulative paging
//! - Start-time grouping for list display
//!
//! The library is UI-agnostic; the `ignite-client` binary is a thin consumer
//! that drives one day's aggregation and prints the grouped result.

pub mod models;
pub mod services;

pub use ignite_common::{Error, Result};
