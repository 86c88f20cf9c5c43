use async_trait::async_trait;
use parking_lot::RwLock;

use super::DeltaRecord;
use super::DurableSink;
use crate::Result;

/// In-memory durable sink.
///
/// Keeps the full append-only record log, which makes it the natural harness
/// for embedding the engine in tests and single-process tools.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<Vec<DeltaRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record persisted so far, in insertion order.
    pub fn records(&self) -> Vec<DeltaRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl DurableSink for MemorySink {
    async fn insert_batch(&self, records: &[DeltaRecord]) -> Result<usize> {
        self.records.write().extend_from_slice(records);
        Ok(records.len())
    }

    async fn sum_by_key(&self, key: &str) -> Result<Option<i64>> {
        let log = self.records.read();
        let mut sum = None;
        for record in log.iter().filter(|record| record.key == key) {
            *sum.get_or_insert(0) += record.value;
        }
        Ok(sum)
    }
}
