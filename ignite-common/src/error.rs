//! Common error types for the schedule client

use thiserror::Error;

/// Common result type for schedule client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the fetch-cache-aggregate pipeline.
///
/// Transport, API and decode failures are surfaced as distinct variants so a
/// caller can tell "the network broke" apart from "the server answered with
/// garbage". Field-level problems inside an otherwise well-formed response
/// never reach this type; the decoder absorbs those into defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection-level failure (DNS, TLS, timeout, aborted transfer)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status other than 200
    #[error("API returned HTTP {0}")]
    Api(u16),

    /// Response body was not a decodable JSON object
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
