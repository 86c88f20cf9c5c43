use super::clock::{current_slot, slot_for};
use crate::constants::SLOT_UNWINDOWED;

#[test]
fn test_slot_floors_to_window_boundary() {
    assert_eq!(slot_for(0, 200), 0);
    assert_eq!(slot_for(199, 200), 0);
    assert_eq!(slot_for(200, 200), 200);
    assert_eq!(slot_for(1_234, 200), 1_200);
    assert_eq!(slot_for(1_699_999_999_123, 10_000), 1_699_999_990_000);
}

#[test]
fn test_zero_window_returns_sentinel() {
    assert_eq!(current_slot(0), SLOT_UNWINDOWED);
}

#[test]
fn test_slot_is_monotonic() {
    let mut last = 0;
    for now in (0..10_000).step_by(7) {
        let slot = slot_for(now, 250);
        assert!(slot >= last);
        assert!(slot <= now);
        last = slot;
    }
}

#[test]
fn test_current_slot_tracks_wall_clock() {
    let s1 = current_slot(50);
    std::thread::sleep(std::time::Duration::from_millis(60));
    let s2 = current_slot(50);

    // A full window elapsed, so the slot must have advanced
    assert!(s2 > s1);
    assert_eq!(s1 % 50, 0);
    assert_eq!(s2 % 50, 0);
}
