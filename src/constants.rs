/// Slot id returned by the window clock when windowing is disabled.
///
/// Doubles as the drain threshold meaning "drain every resident entry",
/// which is how the forced shutdown flush ignores window boundaries.
pub const SLOT_UNWINDOWED: u64 = 0;

/// Identity used when a configuration does not name its aggregator.
pub const DEFAULT_AGGREGATOR_NAME: &str = "default";

/// Sled tree holding offloaded delta records.
pub const DELTA_RECORD_TREE: &str = "delta_records";
