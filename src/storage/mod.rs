//! Durable sink boundary: where offloaded delta batches go.

mod mem_sink;
mod sled_sink;

pub use mem_sink::*;
pub use sled_sink::*;

//---
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

#[cfg(test)]
mod mem_sink_test;

/// The durable unit of offloaded aggregation output.
///
/// Records are append-only: a logical counter's durable value is the sum of
/// every record persisted for its key, across all flush cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRecord {
    pub key: String,
    pub value: i64,
    /// Flush time in whole seconds since the epoch.
    pub timestamp: u64,
}

/// Persistence boundary for offloaded delta batches.
///
/// The engine requires exactly two operations: a one-call batch insert and a
/// summed read-back per key. Connection handling, pooling and retries belong
/// to the implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DurableSink: Send + Sync + 'static {
    /// Persists a batch of delta records, returning how many were inserted.
    async fn insert_batch(&self, records: &[DeltaRecord]) -> Result<usize>;

    /// Sums every persisted delta for `key`; `None` when no record exists.
    async fn sum_by_key(&self, key: &str) -> Result<Option<i64>>;
}
