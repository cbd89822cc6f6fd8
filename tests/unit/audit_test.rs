//! Tests for audit sink

use parking_allocator::core::{build_audit_event, AuditAction, AuditSink, InMemoryAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event("AB1", "Mall", AuditAction::Park, 42, Some("ticket".to_string()));

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0], event);
    assert_eq!(events[0].plate, "AB1");
    assert_eq!(events[0].action, AuditAction::Park);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("A", "Mall", AuditAction::Park, 1, None));
    sink.record(build_audit_event("B", "Mall", AuditAction::Park, 2, None));
    sink.record(build_audit_event("C", "Mall", AuditAction::Reject, 3, None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].plate, "B"); // First one popped
    assert_eq!(events[1].plate, "C");
}

#[test]
fn test_zero_capacity_sink_drops_everything() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event("A", "Mall", AuditAction::Park, 1, None));
    assert!(sink.events().is_empty());
}

#[test]
fn test_clones_share_buffer() {
    let sink = InMemoryAuditSink::new(8);
    let mut writer = sink.clone();

    writer.record(build_audit_event("A", "Mall", AuditAction::Park, 1, None));
    writer.record(build_audit_event("A", "Mall", AuditAction::Unpark, 2, Some("3.00".into())));

    assert_eq!(sink.events().len(), 2);
    assert_eq!(sink.events_with(AuditAction::Unpark).len(), 1);
    assert!(sink.events_with(AuditAction::Reject).is_empty());
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event("AB1", "Mall", AuditAction::Unpark, 1_000, Some("3.00".to_string()));
    let other = build_audit_event("AB1", "Mall", AuditAction::Unpark, 1_000, None);

    assert_eq!(event.lot, "Mall");
    assert_eq!(event.created_at_ms, 1_000);
    assert_eq!(event.payload, Some("3.00".to_string()));
    assert_eq!(event.event_id.len(), 36);
    assert_ne!(event.event_id, other.event_id);
    assert_eq!(AuditAction::Reject.to_string(), "reject");
}
