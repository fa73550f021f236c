//! # Ignite Schedule Common Library
//!
//! Shared code for the conference-schedule client:
//! - Error types
//! - Cache directory resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
