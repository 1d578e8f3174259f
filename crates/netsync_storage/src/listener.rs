//! Change notifications delivered to the registry's owner.

use netsync_foundation::NetId;

use crate::object::ObjectData;

/// Receives net-id changes from an [`ObjectRegistry`](crate::ObjectRegistry).
///
/// The registry does not hold its owner; the owner passes itself (or a
/// handle to its replication bookkeeping) into each operation that can
/// change a net id.
pub trait SyncListener {
    /// Called synchronously after `object`'s net id changed from `previous`
    /// to `object.net_id()`.
    fn on_net_id_changed(&mut self, object: &ObjectData, previous: Option<NetId>);
}

impl<F> SyncListener for F
where
    F: FnMut(&ObjectData, Option<NetId>),
{
    fn on_net_id_changed(&mut self, object: &ObjectData, previous: Option<NetId>) {
        self(object, previous);
    }
}

/// Listener that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl SyncListener for NoopListener {
    fn on_net_id_changed(&mut self, _object: &ObjectData, _previous: Option<NetId>) {}
}
