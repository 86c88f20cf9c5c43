use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::AccumulatorTable;

/// Read-mostly snapshot of an aggregator's increment-path state.
///
/// Published once when the aggregator starts and cleared when it stops, via
/// an atomic pointer swap. The increment path loads it directly, so
/// concurrent increments scale independently of the actor's command queue
/// and of flush-cycle load.
pub(crate) struct AggregatorShared {
    pub(crate) window_ms: u64,
    pub(crate) table: Arc<AccumulatorTable>,
    pub(crate) started_at_ms: u64,
}

pub(crate) type SharedCell = Arc<ArcSwapOption<AggregatorShared>>;
