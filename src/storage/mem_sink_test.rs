use crate::storage::{DeltaRecord, DurableSink, MemorySink};

fn record(key: &str, value: i64) -> DeltaRecord {
    DeltaRecord {
        key: key.to_string(),
        value,
        timestamp: 1_700_000_000,
    }
}

#[tokio::test]
async fn test_insert_batch_appends_records() {
    let sink = MemorySink::new();
    assert!(sink.is_empty());

    let inserted = sink
        .insert_batch(&[record("a", 1), record("b", 2)])
        .await
        .expect("insert should succeed");
    assert_eq!(inserted, 2);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_sum_by_key_spans_batches() {
    let sink = MemorySink::new();
    sink.insert_batch(&[record("a", 3), record("b", 10)])
        .await
        .unwrap();
    sink.insert_batch(&[record("a", -1)]).await.unwrap();

    assert_eq!(sink.sum_by_key("a").await.unwrap(), Some(2));
    assert_eq!(sink.sum_by_key("b").await.unwrap(), Some(10));
    assert_eq!(sink.sum_by_key("missing").await.unwrap(), None);
}
