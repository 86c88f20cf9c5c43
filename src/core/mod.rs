mod actor;
mod clock;
mod event;
mod snapshot;
mod table;
mod timer;

pub(crate) use actor::*;
pub use clock::current_slot;
pub(crate) use event::AggregatorCommand;
pub use event::StopReason;
pub(crate) use snapshot::*;
pub use table::*;
pub(crate) use timer::*;

#[cfg(test)]
mod clock_test;
