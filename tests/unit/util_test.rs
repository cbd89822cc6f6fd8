//! Tests for utility functions

use std::time::Duration;

use parking_allocator::util::{init_tracing, now_ms, Clock, ManualClock, SystemClock};

#[test]
fn test_now_ms_tracks_system_clock() {
    let before = now_ms();
    let clock = SystemClock.now_ms();
    assert!(clock >= before);
}

#[test]
fn test_manual_clock_as_trait_object() {
    let clock: Box<dyn Clock> = Box::new(ManualClock::new(0));
    assert_eq!(clock.now_ms(), 0);

    let manual = ManualClock::default();
    manual.advance(Duration::from_millis(1_500));
    assert_eq!(manual.now_ms(), 1_500);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized twice without panicking");
}
