use dashmap::DashMap;

use crate::constants::SLOT_UNWINDOWED;

/// Concurrent accumulation table keyed by `(time slot, counter key)`.
///
/// [`bump`](Self::bump) is the hot path: callers on arbitrary tasks add to
/// entries without blocking each other on different keys, while same-key
/// updates serialize through the entry so no increment is lost.
/// [`drain_below`](Self::drain_below) is executed only by the owning actor
/// during a flush cycle; the sharded locking underneath gives it a stable
/// scan while bumps keep landing on not-yet-visited shards.
pub struct AccumulatorTable {
    entries: DashMap<(u64, String), i64>,
}

impl AccumulatorTable {
    pub fn new() -> Self {
        AccumulatorTable {
            entries: DashMap::new(),
        }
    }

    /// Adds `amount` to the entry for `(slot, key)`, creating it with an
    /// implicit base of zero. Returns the post-update in-window total.
    pub fn bump(&self, slot: u64, key: &str, amount: i64) -> i64 {
        let mut entry = self.entries.entry((slot, key.to_owned())).or_insert(0);
        *entry += amount;
        *entry
    }

    /// Atomically removes and returns every entry whose slot is strictly
    /// below `threshold`.
    ///
    /// A threshold of [`SLOT_UNWINDOWED`] is forced mode: every resident
    /// entry is drained regardless of slot. Entries at or above the
    /// threshold are never touched, including entries created concurrently
    /// while the scan runs.
    pub fn drain_below(&self, threshold: u64) -> Vec<(String, i64)> {
        let mut drained = Vec::new();
        self.entries.retain(|(slot, key), value| {
            if threshold == SLOT_UNWINDOWED || *slot < threshold {
                drained.push((key.clone(), *value));
                false
            } else {
                true
            }
        });
        drained
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AccumulatorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AccumulatorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccumulatorTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}
