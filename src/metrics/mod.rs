use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

#[cfg(test)]
mod metrics_test;

lazy_static! {
    pub static ref INCREMENT_TOTAL_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "tally_increments_total",
            "Number of increment operations applied"
        ),
        &["aggregator"]
    )
    .expect("metric can not be created");

    pub static ref FLUSHED_RECORDS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "tally_flushed_records_total",
            "Delta records handed to the durable sink"
        ),
        &["aggregator"]
    )
    .expect("metric can not be created");

    pub static ref FLUSH_DURATION_METRIC: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "tally_flush_duration_ms",
            "Histogram of flush cycle duration in ms"
        )
        .buckets(exponential_buckets(1.0, 2.0, 10).unwrap()),
        &["aggregator"]
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

/// Registers the engine metrics with [`struct@REGISTRY`]. Call once at startup;
/// scraping the registry is the embedder's concern.
pub fn register_custom_metrics() {
    REGISTRY
        .register(Box::new(INCREMENT_TOTAL_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(FLUSHED_RECORDS_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(FLUSH_DURATION_METRIC.clone()))
        .expect("collector can be registered");
}

pub(crate) fn record_increment(name: &str) {
    INCREMENT_TOTAL_METRIC.with_label_values(&[name]).inc();
}

pub(crate) fn record_flushed(name: &str, count: usize) {
    FLUSHED_RECORDS_METRIC
        .with_label_values(&[name])
        .inc_by(count as u64);
}

pub(crate) fn observe_flush_duration(name: &str, elapsed: Duration) {
    FLUSH_DURATION_METRIC
        .with_label_values(&[name])
        .observe(elapsed.as_secs_f64() * 1000.0);
}
