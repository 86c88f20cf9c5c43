use std::time::Duration;

use super::*;

#[test]
fn test_record_helpers_update_counters() {
    record_increment("metrics-test");
    record_increment("metrics-test");
    record_flushed("metrics-test", 7);

    assert_eq!(
        INCREMENT_TOTAL_METRIC
            .with_label_values(&["metrics-test"])
            .get(),
        2
    );
    assert_eq!(
        FLUSHED_RECORDS_METRIC
            .with_label_values(&["metrics-test"])
            .get(),
        7
    );
}

#[test]
fn test_flush_duration_observed() {
    observe_flush_duration("metrics-duration-test", Duration::from_millis(3));

    let histogram = FLUSH_DURATION_METRIC.with_label_values(&["metrics-duration-test"]);
    assert_eq!(histogram.get_sample_count(), 1);
    assert!(histogram.get_sample_sum() >= 3.0);
}

#[test]
fn test_register_custom_metrics() {
    register_custom_metrics();
    record_increment("metrics-registry-test");

    let families = REGISTRY.gather();
    assert!(families
        .iter()
        .any(|family| family.get_name() == "tally_increments_total"));
}
