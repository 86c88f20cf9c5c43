//! Shared helpers for unit tests.

use std::time::Duration;

use parking_lot::Mutex;

use crate::AggregatorObserver;
use crate::StopReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Started(String),
    Stopped(String, StopReason),
    IncrementBegin(String, i64),
    IncrementEnd(String, i64),
    FlushBegin(String),
    FlushEnd(String),
    FlushedBatch(String, usize),
}

/// Observer that records every emitted event for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    pub fn flushed_batches(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::FlushedBatch(_, inserted) => Some(inserted),
                _ => None,
            })
            .collect()
    }

    pub fn stop_reasons(&self) -> Vec<StopReason> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::Stopped(_, reason) => Some(reason),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        self.events.lock().push(event);
    }
}

impl AggregatorObserver for RecordingObserver {
    fn started(&self, name: &str) {
        self.push(ObservedEvent::Started(name.to_string()));
    }

    fn stopped(&self, name: &str, reason: StopReason) {
        self.push(ObservedEvent::Stopped(name.to_string(), reason));
    }

    fn increment_begin(&self, key: &str, amount: i64) {
        self.push(ObservedEvent::IncrementBegin(key.to_string(), amount));
    }

    fn increment_end(&self, key: &str, amount: i64, _elapsed: Duration) {
        self.push(ObservedEvent::IncrementEnd(key.to_string(), amount));
    }

    fn flush_begin(&self, name: &str) {
        self.push(ObservedEvent::FlushBegin(name.to_string()));
    }

    fn flush_end(&self, name: &str, _elapsed: Duration) {
        self.push(ObservedEvent::FlushEnd(name.to_string()));
    }

    fn flushed_batch(&self, name: &str, inserted: usize) {
        self.push(ObservedEvent::FlushedBatch(name.to_string(), inserted));
    }
}
