use async_trait::async_trait;
use sled::Batch;
use tracing::debug;

use super::DeltaRecord;
use super::DurableSink;
use crate::constants::DELTA_RECORD_TREE;
use crate::Result;
use crate::SinkError;

/// Embedded sled-backed durable sink.
///
/// Records are bincode-encoded under length-prefixed keys
/// (`u32-be key length || key bytes || u64-be id`), so `sum_by_key` is a
/// single prefix scan and one flush batch applies atomically.
pub struct SledDeltaSink {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledDeltaSink {
    pub fn new(db: sled::Db) -> Result<Self> {
        let tree = db.open_tree(DELTA_RECORD_TREE).map_err(SinkError::Db)?;
        Ok(Self { db, tree })
    }

    fn record_key(&self, key: &str) -> Result<Vec<u8>> {
        // Monotonic id keeps same-key records distinct within the prefix
        let id = self.db.generate_id().map_err(SinkError::Db)?;
        let mut buf = key_prefix(key);
        buf.extend_from_slice(&id.to_be_bytes());
        Ok(buf)
    }
}

impl std::fmt::Debug for SledDeltaSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledDeltaSink")
            .field("records", &self.tree.len())
            .finish()
    }
}

fn key_prefix(key: &str) -> Vec<u8> {
    let bytes = key.as_bytes();
    let mut buf = Vec::with_capacity(4 + bytes.len() + 8);
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
    buf
}

#[async_trait]
impl DurableSink for SledDeltaSink {
    async fn insert_batch(&self, records: &[DeltaRecord]) -> Result<usize> {
        let mut batch = Batch::default();
        for record in records {
            let encoded = bincode::serialize(record).map_err(SinkError::Bincode)?;
            batch.insert(self.record_key(&record.key)?, encoded);
        }
        self.tree.apply_batch(batch).map_err(SinkError::Db)?;

        debug!("persisted {} delta records", records.len());
        Ok(records.len())
    }

    async fn sum_by_key(&self, key: &str) -> Result<Option<i64>> {
        let mut sum = None;
        for item in self.tree.scan_prefix(key_prefix(key)) {
            let (_, value) = item.map_err(SinkError::Db)?;
            let record: DeltaRecord =
                bincode::deserialize(&value).map_err(SinkError::Bincode)?;
            *sum.get_or_insert(0) += record.value;
        }
        Ok(sum)
    }
}
