use std::time::{SystemTime, UNIX_EPOCH};

/// return millisecond
pub(crate) fn timestamp_millis() -> u64 {
    let now = SystemTime::now();
    let since_epoch = now.duration_since(UNIX_EPOCH).expect("Time went backwards");
    since_epoch.as_millis() as u64
}

/// return second
///
/// Delta record timestamps use whole seconds; the sub-second component is
/// discarded for determinism.
pub(crate) fn timestamp_secs() -> u64 {
    let now = SystemTime::now();
    let since_epoch = now.duration_since(UNIX_EPOCH).expect("Time went backwards");
    since_epoch.as_secs()
}
