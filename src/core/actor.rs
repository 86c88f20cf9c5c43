use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::clock;
use super::AggregatorCommand;
use super::FlushTimer;
use super::SharedCell;
use super::StopReason;
use crate::constants::SLOT_UNWINDOWED;
use crate::metrics;
use crate::observer::AggregatorObserver;
use crate::storage::DeltaRecord;
use crate::storage::DurableSink;
use crate::utils;
use crate::AccumulatorTable;
use crate::Result;

/// The owning task for one aggregator identity.
///
/// Holds the accumulator table and flush timer, and executes flush cycles
/// serially with respect to each other and to shutdown. The increment hot
/// path never passes through here: it reaches the table through the snapshot
/// published at start time.
pub(crate) struct AggregatorActor {
    name: String,
    window_ms: u64,
    table: Arc<AccumulatorTable>,
    shared: SharedCell,
    timer: FlushTimer,
    sink: Arc<dyn DurableSink>,
    observer: Arc<dyn AggregatorObserver>,
    cmd_rx: mpsc::Receiver<AggregatorCommand>,
    shutdown: CancellationToken,
}

impl AggregatorActor {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        window_ms: u64,
        table: Arc<AccumulatorTable>,
        shared: SharedCell,
        sink: Arc<dyn DurableSink>,
        observer: Arc<dyn AggregatorObserver>,
        cmd_rx: mpsc::Receiver<AggregatorCommand>,
        shutdown: CancellationToken,
    ) -> Self {
        let timer = FlushTimer::new(window_ms);
        Self {
            name,
            window_ms,
            table,
            shared,
            timer,
            sink,
            observer,
            cmd_rx,
            shutdown,
        }
    }

    /// Runs until cancelled or orphaned. One command or timer tick is
    /// processed at a time; cancellation wins over pending work.
    pub(crate) async fn run(mut self) {
        info!("[aggregator:{}] running", self.name);

        if self.timer.is_expired() {
            self.timer.reset();
        }

        let reason = loop {
            let tick = sleep_until(self.timer.next_deadline());
            tokio::select! {
                // Use biased to ensure branch order
                biased;
                // P0: shutdown received
                _ = self.shutdown.cancelled() => {
                    warn!("[aggregator:{}] shutdown signal received", self.name);
                    break StopReason::Shutdown;
                }
                // P1: manual flush commands
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(AggregatorCommand::Flush(ack)) => {
                            let outcome = self.flush_cycle(false).await;
                            self.timer.reset();
                            // Receiver may have given up; nothing to do then
                            let _ = ack.send(outcome);
                        }
                        None => {
                            warn!("[aggregator:{}] command channel closed", self.name);
                            break StopReason::Aborted;
                        }
                    }
                }
                // P2: Tick: offload every window that has closed
                _ = tick => {
                    if let Err(e) = self.flush_cycle(false).await {
                        error!("[aggregator:{}] flush failed: {:?}", self.name, e);
                    }
                    self.timer.reset();
                }
            }
        };

        self.stop(reason).await;
    }

    /// stopping -> stopped: unpublish the increment snapshot, run one forced
    /// flush so nothing accumulated is silently lost, emit the stopped event.
    async fn stop(&mut self, reason: StopReason) {
        let started_at_ms = self
            .shared
            .load()
            .as_ref()
            .map(|shared| shared.started_at_ms);
        self.shared.store(None);

        if let Err(e) = self.flush_cycle(true).await {
            error!("[aggregator:{}] final flush failed: {:?}", self.name, e);
        }

        self.observer.stopped(&self.name, reason);
        let uptime_ms = started_at_ms
            .map(|t| utils::timestamp_millis().saturating_sub(t))
            .unwrap_or_default();
        info!(
            "[aggregator:{}] stopped ({}), uptime {}ms",
            self.name, reason, uptime_ms
        );
    }

    /// One flush cycle: drain, offload, report.
    async fn flush_cycle(&mut self, forced: bool) -> Result<usize> {
        self.observer.flush_begin(&self.name);
        let started = Instant::now();

        let outcome = self.offload(forced).await;

        let elapsed = started.elapsed();
        self.observer.flush_end(&self.name, elapsed);
        metrics::observe_flush_duration(&self.name, elapsed);

        if let Ok(inserted) = &outcome {
            if *inserted > 0 {
                self.observer.flushed_batch(&self.name, *inserted);
                metrics::record_flushed(&self.name, *inserted);
                debug!("[aggregator:{}] offloaded {} delta records", self.name, inserted);
            }
        }

        outcome
    }

    /// Drains every entry whose window has closed (every entry, in forced
    /// mode) and writes them to the sink as one batch.
    ///
    /// Drained entries are not re-queued on sink failure: a retry after a
    /// partial insert could double-count, so the batch is dropped and the
    /// failure surfaces only through instrumentation (at-most-once per
    /// record).
    async fn offload(&mut self, forced: bool) -> Result<usize> {
        let threshold = if forced {
            SLOT_UNWINDOWED
        } else {
            clock::current_slot(self.window_ms)
        };

        let drained = self.table.drain_below(threshold);
        if drained.is_empty() {
            return Ok(0);
        }

        let timestamp = utils::timestamp_secs();
        let records: Vec<DeltaRecord> = drained
            .into_iter()
            .map(|(key, value)| DeltaRecord {
                key,
                value,
                timestamp,
            })
            .collect();

        let inserted = self.sink.insert_batch(&records).await?;
        Ok(inserted)
    }
}
