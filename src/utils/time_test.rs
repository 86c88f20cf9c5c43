use std::thread::sleep;

use crate::utils::{timestamp_millis, timestamp_secs};

#[test]
fn test_timestamp_millis() {
    let t1 = timestamp_millis();
    sleep(std::time::Duration::from_millis(10));
    let t2 = timestamp_millis();

    // Ensure time is moving forward
    assert!(t2 > t1);
    // Difference should be at least 10ms
    assert!(t2 - t1 >= 10);
}

#[test]
fn test_timestamp_secs() {
    let secs = timestamp_secs();
    let millis = timestamp_millis();

    // Should be a reasonable value (somewhere between 2021 and now)
    assert!(secs > 1609459200);
    // Seconds and milliseconds come from the same clock
    assert!(millis / 1000 >= secs);
}
