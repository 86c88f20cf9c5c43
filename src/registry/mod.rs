//! Identity registry and the lock-free increment path.
//!
//! Each registered identity owns one actor task; the registry publishes a
//! read-mostly snapshot per identity so increments reach the accumulator
//! table without serializing through the actor's command queue.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use config::ConfigError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::AggregatorActor;
use crate::core::AggregatorCommand;
use crate::core::AggregatorShared;
use crate::core::SharedCell;
use crate::current_slot;
use crate::metrics;
use crate::observer::AggregatorObserver;
use crate::observer::TracingObserver;
use crate::storage::DurableSink;
use crate::utils;
use crate::AccumulatorTable;
use crate::AggregatorConfig;
use crate::Error;
use crate::ResolutionError;
use crate::Result;


struct AggregatorHandle {
    shared: SharedCell,
    cmd_tx: mpsc::Sender<AggregatorCommand>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Owns every aggregator identity in a process.
///
/// Aggregators registered here run fully independently: separate tables,
/// separate timers, no shared state beyond the sink and observer handles.
pub struct AggregatorRegistry {
    aggregators: DashMap<String, AggregatorHandle>,
    sink: Arc<dyn DurableSink>,
    observer: Arc<dyn AggregatorObserver>,
}

impl AggregatorRegistry {
    pub fn new(sink: Arc<dyn DurableSink>) -> Self {
        Self::with_observer(sink, Arc::new(TracingObserver))
    }

    pub fn with_observer(sink: Arc<dyn DurableSink>, observer: Arc<dyn AggregatorObserver>) -> Self {
        Self {
            aggregators: DashMap::new(),
            sink,
            observer,
        }
    }

    /// starting -> running: validates `config`, allocates the accumulator
    /// table, publishes the increment snapshot and spawns the actor task.
    ///
    /// Fails fast when the configuration is invalid or the identity is
    /// already registered; no actor is created in either case.
    pub fn start(&self, config: AggregatorConfig) -> Result<()> {
        config.validate()?;

        let entry = match self.aggregators.entry(config.name.clone()) {
            Entry::Occupied(_) => {
                return Err(Error::Config(ConfigError::Message(format!(
                    "aggregator `{}` is already registered",
                    config.name
                ))));
            }
            Entry::Vacant(entry) => entry,
        };

        let table = Arc::new(AccumulatorTable::new());
        let shared: SharedCell = Arc::new(ArcSwapOption::from_pointee(AggregatorShared {
            window_ms: config.offload_interval_ms,
            table: table.clone(),
            started_at_ms: utils::timestamp_millis(),
        }));
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();

        let actor = AggregatorActor::new(
            config.name.clone(),
            config.offload_interval_ms,
            table,
            shared.clone(),
            self.sink.clone(),
            self.observer.clone(),
            cmd_rx,
            cancel.clone(),
        );
        let join = tokio::spawn(actor.run());

        entry.insert(AggregatorHandle {
            shared,
            cmd_tx,
            cancel,
            join,
        });
        self.observer.started(&config.name);
        Ok(())
    }

    /// Adds `amount` (possibly negative) to `key` in the current window of
    /// the aggregator registered under `name`. Returns the new in-window
    /// total.
    ///
    /// Bounded, non-blocking: resolves the published snapshot and bumps the
    /// table directly. Never waits on the actor or a flush cycle.
    pub fn increment(&self, name: &str, key: &str, amount: i64) -> Result<i64> {
        let shared = {
            let handle = self
                .aggregators
                .get(name)
                .ok_or_else(|| ResolutionError::UnknownAggregator(name.to_string()))?;
            handle
                .shared
                .load_full()
                .ok_or_else(|| ResolutionError::NotRunning(name.to_string()))?
        };

        self.observer.increment_begin(key, amount);
        let started = Instant::now();

        let slot = current_slot(shared.window_ms);
        let total = shared.table.bump(slot, key, amount);

        self.observer.increment_end(key, amount, started.elapsed());
        metrics::record_increment(name);
        Ok(total)
    }

    /// Triggers one flush cycle now and reports how many records reached
    /// the sink. The normal timer cadence is re-armed afterwards.
    pub async fn flush(&self, name: &str) -> Result<usize> {
        let cmd_tx = {
            let handle = self
                .aggregators
                .get(name)
                .ok_or_else(|| ResolutionError::UnknownAggregator(name.to_string()))?;
            handle.cmd_tx.clone()
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        cmd_tx
            .send(AggregatorCommand::Flush(ack_tx))
            .await
            .map_err(|_| ResolutionError::NotRunning(name.to_string()))?;
        ack_rx
            .await
            .map_err(|_| ResolutionError::NotRunning(name.to_string()))?
    }

    /// running -> stopping -> stopped: cancels the actor and waits for its
    /// forced final flush, so every accumulated delta has been offered to
    /// the sink when this returns.
    pub async fn stop(&self, name: &str) -> Result<()> {
        let (name, handle) = self
            .aggregators
            .remove(name)
            .ok_or_else(|| ResolutionError::UnknownAggregator(name.to_string()))?;

        handle.cancel.cancel();
        if let Err(e) = handle.join.await {
            warn!("[aggregator:{}] task join failed: {:?}", name, e);
        }
        Ok(())
    }

    /// Stops every registered aggregator.
    pub async fn shutdown(&self) {
        let names: Vec<String> = self
            .aggregators
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for name in names {
            if let Err(e) = self.stop(&name).await {
                warn!("shutdown: stopping `{}` failed: {:?}", name, e);
            }
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.aggregators.contains_key(name)
    }
}
