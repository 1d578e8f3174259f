//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use netsync_foundation::{Error, ErrorContext, ErrorKind, LocalId, NetId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_object_not_found() {
    let err = Error::object_not_found(LocalId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::ObjectNotFound(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_stale_object() {
    let err = Error::stale_object(LocalId::new(5, 2));
    assert!(matches!(err.kind, ErrorKind::StaleObject(_)));
    assert!(format!("{err}").contains("5v2"));
}

#[test]
fn error_local_id_out_of_range() {
    let err = Error::local_id_out_of_range(8, 4);
    assert_eq!(
        err.kind,
        ErrorKind::LocalIdOutOfRange {
            index: 8,
            length: 4
        }
    );
    assert_eq!(format!("{err}"), "local id out of range: 8 (length 4)");
}

#[test]
fn error_net_id_out_of_range() {
    let err = Error::net_id_out_of_range(NetId(6), 2);
    assert_eq!(format!("{err}"), "net id out of range: 6 (length 2)");
}

#[test]
fn error_net_id_conflict() {
    let err = Error::net_id_conflict(NetId(1), LocalId::new(0, 1), LocalId::new(2, 1));
    assert_eq!(
        format!("{err}"),
        "net id 1 already held by #0, refused for #2"
    );
}

#[test]
fn error_inconsistent() {
    let err = Error::inconsistent("slot 3 is empty but not free");
    assert!(matches!(err.kind, ErrorKind::Inconsistent(_)));
    assert!(format!("{err}").contains("slot 3"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_optional() {
    let err = Error::stale_object(LocalId::new(1, 2));
    assert!(err.context.is_none());
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_operation("set_net_id");
    assert_eq!(format!("{ctx}"), "in set_net_id");

    let ctx = ErrorContext::new().with_object("door");
    assert_eq!(format!("{ctx}"), "for `door`");
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::inconsistent("x"));
}
