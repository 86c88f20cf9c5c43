//! A time-windowed counter aggregation engine.
//!
//! High-frequency `increment` calls are absorbed by an in-memory concurrent
//! table partitioned into fixed-length time windows. A per-aggregator actor
//! task periodically drains every window that has closed and offloads it as a
//! batch of append-only delta records to a pluggable [`DurableSink`]. Write
//! latency is bounded by an in-memory update; persistence latency by batch
//! I/O; memory by the number of distinct keys touched per window.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tally_engine::{AggregatorConfig, AggregatorRegistry, MemorySink};
//!
//! # async fn demo() -> tally_engine::Result<()> {
//! let registry = AggregatorRegistry::new(Arc::new(MemorySink::new()));
//! registry.start(AggregatorConfig::default())?;
//! let total = registry.increment("default", "page_views", 1)?;
//! assert_eq!(total, 1);
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod core;
mod errors;
mod metrics;
mod observer;
mod registry;
mod storage;
mod utils;

pub use crate::config::*;
pub use crate::constants::*;
pub use crate::core::*;
pub use crate::errors::*;
pub use crate::metrics::*;
pub use crate::observer::*;
pub use crate::registry::*;
pub use crate::storage::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
