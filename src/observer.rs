//! Pluggable instrumentation for aggregator lifecycle and operations.
//!
//! Callbacks run inline on the increment hot path and inside the actor's
//! flush cycle, so implementations must be cheap and non-blocking.

use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::StopReason;

/// Receives structured lifecycle and operation events from the engine.
///
/// Every method has a no-op default, so an implementation only overrides the
/// events it cares about.
pub trait AggregatorObserver: Send + Sync + 'static {
    fn started(&self, _name: &str) {}

    fn stopped(&self, _name: &str, _reason: StopReason) {}

    fn increment_begin(&self, _key: &str, _amount: i64) {}

    fn increment_end(&self, _key: &str, _amount: i64, _elapsed: Duration) {}

    fn flush_begin(&self, _name: &str) {}

    fn flush_end(&self, _name: &str, _elapsed: Duration) {}

    /// Emitted only when a flush actually handed records to the sink.
    fn flushed_batch(&self, _name: &str, _inserted: usize) {}
}

/// Default observer: forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AggregatorObserver for TracingObserver {
    fn started(&self, name: &str) {
        info!("[aggregator:{}] started", name);
    }

    fn stopped(&self, name: &str, reason: StopReason) {
        info!("[aggregator:{}] stopped: {}", name, reason);
    }

    fn increment_begin(&self, key: &str, amount: i64) {
        debug!(%key, amount, "increment begin");
    }

    fn increment_end(&self, key: &str, amount: i64, elapsed: Duration) {
        debug!(%key, amount, ?elapsed, "increment end");
    }

    fn flush_begin(&self, name: &str) {
        debug!("[aggregator:{}] flush begin", name);
    }

    fn flush_end(&self, name: &str, elapsed: Duration) {
        debug!("[aggregator:{}] flush end in {:?}", name, elapsed);
    }

    fn flushed_batch(&self, name: &str, inserted: usize) {
        info!("[aggregator:{}] offloaded {} delta records", name, inserted);
    }
}
