//! Integration tests for object allocation and destruction
//!
//! Tests local-id assignment, recycling, and stale handle detection.

use std::collections::HashSet;

use netsync_foundation::{ErrorKind, NetId};
use netsync_storage::{NoopListener, ObjectRegistry};

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn allocate_three_then_recycle_middle() {
    let mut registry = ObjectRegistry::new();
    let ids: Vec<_> = (0..3).map(|_| registry.allocate()).collect();
    assert_eq!(ids.iter().map(|id| id.index).collect::<Vec<_>>(), vec![0, 1, 2]);

    registry.deallocate(ids[1]).unwrap();
    let again = registry.allocate();

    assert_eq!(again.index, 1);
    assert_eq!(registry.slot_count(), 3);
    assert_eq!(registry.len(), 3);
}

#[test]
fn recycling_is_last_freed_first() {
    let mut registry = ObjectRegistry::new();
    let ids: Vec<_> = (0..5).map(|_| registry.allocate()).collect();

    registry.deallocate(ids[0]).unwrap();
    registry.deallocate(ids[3]).unwrap();
    registry.deallocate(ids[2]).unwrap();

    let reused: Vec<_> = (0..4).map(|_| registry.allocate().index).collect();
    assert_eq!(reused, vec![2, 3, 0, 5]);
}

#[test]
fn local_id_is_stable_across_mutation() {
    let mut registry = ObjectRegistry::new();
    let id = registry.allocate();
    let other = registry.allocate();

    registry.set_net_id(id, Some(NetId(9)), &mut NoopListener).unwrap();
    registry.deallocate(other).unwrap();
    registry.allocate();
    registry.set_net_id(id, None, &mut NoopListener).unwrap();

    assert_eq!(registry.get(id).unwrap().local_id(), id);
}

#[test]
fn live_ids_never_collide() {
    let mut registry = ObjectRegistry::new();
    let mut live = Vec::new();

    for round in 0..20 {
        live.push(registry.allocate());
        live.push(registry.allocate());
        if round % 3 == 0 {
            let id = live.remove(0);
            registry.deallocate(id).unwrap();
        }
    }

    let indices: HashSet<_> = live.iter().map(|id| id.index).collect();
    assert_eq!(indices.len(), live.len());
}

// =============================================================================
// Stale Handles
// =============================================================================

#[test]
fn recycled_slot_rejects_old_handle() {
    let mut registry = ObjectRegistry::new();
    let old = registry.allocate();
    registry.deallocate(old).unwrap();
    let new = registry.allocate();

    assert_eq!(old.index, new.index);
    assert!(registry.get(old).is_none());
    assert!(registry.get(new).is_some());

    let err = registry.deallocate(old).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleObject(_)));
}

#[test]
fn double_deallocate_leaves_registry_intact() {
    let mut registry = ObjectRegistry::new();
    let id = registry.allocate();
    registry.deallocate(id).unwrap();

    assert!(registry.deallocate(id).is_err());
    assert_eq!(registry.free_count(), 1);
    registry.check_consistency().unwrap();
}

#[test]
fn empty_after_all_deallocated() {
    let mut registry = ObjectRegistry::new();
    let ids: Vec<_> = (0..4).map(|_| registry.allocate()).collect();
    for id in ids {
        registry.deallocate(id).unwrap();
    }

    assert!(registry.is_empty());
    assert_eq!(registry.all_objects().filter(Option::is_some).count(), 0);
    assert_eq!(registry.slot_count(), 4);
}
