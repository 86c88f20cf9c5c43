//! Aggregation Engine Error Hierarchy
//!
//! Defines error types for the windowed aggregation engine, categorized by
//! operational concern: configuration, identity resolution, durable offload.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration validation failures (fatal at start)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Increment routed to an identity with no live aggregator
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Durable sink failures during offload
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Caller-recoverable: the identity does not resolve to a running aggregator.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no aggregator registered under `{0}`")]
    UnknownAggregator(String),

    #[error("aggregator `{0}` is not running")]
    NotRunning(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Disk I/O failures in the embedded sink
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization failures for persisted records
    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    /// Embedded database errors
    #[error(transparent)]
    Db(#[from] sled::Error),

    /// Batch rejected by an external sink
    #[error("batch insert failed: {0}")]
    Insert(String),
}
