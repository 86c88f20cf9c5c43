use crate::constants::SLOT_UNWINDOWED;
use crate::utils::timestamp_millis;

/// Identifier of the time window the current instant belongs to: wall-clock
/// milliseconds floored to a `window_ms` boundary.
///
/// A zero window length disables windowing and yields [`SLOT_UNWINDOWED`],
/// which drains unconditionally on every flush.
///
/// Monotonically non-decreasing under non-decreasing real time.
pub fn current_slot(window_ms: u64) -> u64 {
    if window_ms == 0 {
        return SLOT_UNWINDOWED;
    }

    slot_for(timestamp_millis(), window_ms)
}

pub(super) fn slot_for(now_ms: u64, window_ms: u64) -> u64 {
    (now_ms / window_ms) * window_ms
}
