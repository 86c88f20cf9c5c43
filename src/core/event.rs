use tokio::sync::oneshot;

use crate::Result;

/// Commands accepted by a running aggregator actor outside its timer.
#[derive(Debug)]
pub(crate) enum AggregatorCommand {
    /// Trigger a flush cycle now; replies with the number of records handed
    /// to the durable sink.
    Flush(oneshot::Sender<Result<usize>>),
}

/// Why an aggregator left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Graceful stop requested through the registry.
    Shutdown,
    /// The owning registry went away without a graceful stop.
    Aborted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Shutdown => write!(f, "shutdown"),
            StopReason::Aborted => write!(f, "aborted"),
        }
    }
}
