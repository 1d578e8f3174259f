//! The object registry: dense slots, sparse net-id index, controller index.
//!
//! `ObjectRegistry` is the only writer of all three views, so every mutating
//! operation leaves them agreeing with each other:
//! - every live slot holds the object whose local id names that slot,
//! - every occupied net-id slot holds an object recording that net id,
//! - an object is in the controller index iff it has a controller.

use std::collections::HashSet;

use netsync_foundation::{ControllerId, Error, ErrorContext, LocalId, NetId, ObjectHandle, Result};
use tracing::{debug, error, warn};

use crate::config::{CollisionPolicy, RegistryConfig};
use crate::controllers::ControllerIndex;
use crate::listener::SyncListener;
use crate::net_index::NetIdTable;
use crate::object::ObjectData;
use crate::slots::SlotTable;

/// How a lookup treats ids outside the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Out-of-range ids are an error.
    Strict,
    /// Out-of-range ids resolve to nothing.
    Lenient,
}

/// Registry of synchronizable objects.
///
/// Objects are addressed by generational [`LocalId`]s from creation to
/// destruction and optionally by a [`NetId`] once the replication layer
/// assigns one. All mutation takes `&mut self`; callers sharing a registry
/// between threads must serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: SlotTable<ObjectData>,
    net_ids: NetIdTable,
    controllers: ControllerIndex,
    config: RegistryConfig,
}

fn resolve<'a>(
    objects: &'a SlotTable<ObjectData>,
    id: LocalId,
    operation: &'static str,
) -> Result<&'a ObjectData> {
    objects.get(id).map_err(|err| {
        error!(local_id = ?id, operation, error = %err, "invalid object handle");
        err.with_context(ErrorContext::new().with_operation(operation))
    })
}

fn resolve_mut<'a>(
    objects: &'a mut SlotTable<ObjectData>,
    id: LocalId,
    operation: &'static str,
) -> Result<&'a mut ObjectData> {
    objects.get_mut(id).map_err(|err| {
        error!(local_id = ?id, operation, error = %err, "invalid object handle");
        err.with_context(ErrorContext::new().with_operation(operation))
    })
}

/// Resolves the holder recorded in the net-id table.
fn holder(objects: &SlotTable<ObjectData>, id: LocalId) -> &ObjectData {
    match objects.get(id) {
        Ok(object) => object,
        Err(err) => panic!("net-id table refers to a dead object: {err}"),
    }
}

impl ObjectRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut net_ids = NetIdTable::new();
        net_ids.reserve(config.net_id_capacity);
        Self {
            objects: SlotTable::with_capacity(config.object_capacity),
            net_ids,
            controllers: ControllerIndex::new(),
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Creates a new object and returns its local id.
    ///
    /// The most recently freed local index is reused first. The new object
    /// has no net id, no controller, and no app handle.
    pub fn allocate(&mut self) -> LocalId {
        let id = self.objects.insert_with(ObjectData::new);
        debug!(local_id = %id, "allocated object");
        id
    }

    /// Creates a new object bound to `handle` with a diagnostic name.
    pub fn allocate_for(&mut self, handle: ObjectHandle, name: impl Into<String>) -> LocalId {
        let name = name.into();
        let id = self.objects.insert_with(|id| {
            let mut object = ObjectData::new(id);
            object.set_app_handle(Some(handle));
            object.set_name(name);
            object
        });
        debug!(local_id = %id, "allocated object");
        id
    }

    /// Destroys an object.
    ///
    /// Frees its net id slot, detaches its controller from the controller
    /// index, and returns its local index to the free list. No net-id
    /// notification is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or names no live object; the
    /// registry is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the slot or the net-id table disagree with the object stored
    /// under `id`.
    pub fn deallocate(&mut self, id: LocalId) -> Result<()> {
        resolve(&self.objects, id, "deallocate")?;

        let mut object = self.objects.remove(id)?;
        assert_eq!(
            object.local_id, id,
            "slot {} holds object {:?}",
            id.index, object.local_id
        );

        if let Some(net_id) = object.net_id.take() {
            self.net_ids.release(net_id, id);
        }

        // The owner may have cleared the controller without notifying.
        object.set_controller(None);
        self.controllers.sync(&object);

        debug!(local_id = %id, name = object.name(), "deallocated object");
        Ok(())
    }

    // =========================================================================
    // Network ids
    // =========================================================================

    /// Assigns, reassigns, or clears (`None`) the net id of an object.
    ///
    /// Setting the id an object already has does nothing. Otherwise the old
    /// net-id slot is released, the new one is taken (growing the table if
    /// needed), and `listener` is told about the change.
    ///
    /// If another object holds `net_id`, the configured
    /// [`CollisionPolicy`] decides: `Overwrite` logs a warning, clears the
    /// previous holder's net id (notifying `listener` for it too), and
    /// proceeds; `Reject` returns an error without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or names no live object, or if the
    /// assignment is rejected by the collision policy.
    ///
    /// # Panics
    ///
    /// The net-id table is indexed directly, so assigning `net_id` grows it
    /// to `net_id + 1` slots. A very large id allocates a very large table
    /// and may abort on allocation failure.
    pub fn set_net_id<L>(
        &mut self,
        id: LocalId,
        net_id: Option<NetId>,
        listener: &mut L,
    ) -> Result<()>
    where
        L: SyncListener + ?Sized,
    {
        let incoming = resolve(&self.objects, id, "set_net_id")?;
        let previous = incoming.net_id;
        if previous == net_id {
            return Ok(());
        }

        let displaced = net_id
            .and_then(|n| self.net_ids.get(n))
            .filter(|other| *other != id);

        if let (Some(net_id), Some(other)) = (net_id, displaced) {
            let current = holder(&self.objects, other);
            warn!(
                net_id = %net_id,
                object = incoming.name(),
                holder = current.name(),
                "object was assigned a net id already held by another object"
            );
            if self.config.collision_policy == CollisionPolicy::Reject {
                return Err(Error::net_id_conflict(net_id, other, id).with_context(
                    ErrorContext::new()
                        .with_operation("set_net_id")
                        .with_object(incoming.name()),
                ));
            }
        }

        if let Some(old) = previous {
            self.net_ids.release(old, id);
        }
        resolve_mut(&mut self.objects, id, "set_net_id")?.net_id = None;

        let Some(net_id) = net_id else {
            debug!(local_id = %id, previous = ?previous, "cleared net id");
            listener.on_net_id_changed(self.objects.get(id)?, previous);
            return Ok(());
        };

        if let Some(other) = displaced {
            self.objects.get_mut(other)?.net_id = None;
            listener.on_net_id_changed(holder(&self.objects, other), Some(net_id));
        }

        if !self.net_ids.in_range(net_id) {
            debug!(
                net_id = %net_id,
                from = self.net_ids.len(),
                to = net_id.slot() + 1,
                "growing net-id table"
            );
        }
        self.net_ids.assign(net_id, id);
        let object = self.objects.get_mut(id)?;
        object.net_id = Some(net_id);
        debug!(local_id = %id, net_id = %net_id, previous = ?previous, "assigned net id");
        listener.on_net_id_changed(object, previous);
        Ok(())
    }

    /// Proposes the lowest net id no object holds.
    ///
    /// Nothing is reserved; commit the id with [`ObjectRegistry::set_net_id`].
    #[must_use]
    pub fn generate_net_id(&self) -> NetId {
        self.net_ids.first_free()
    }

    /// Pre-allocates the net-id table for `count` ids.
    pub fn reserve_net_ids(&mut self, count: usize) {
        self.net_ids.reserve(count);
    }

    /// Returns the net-id table length (highest net id ever assigned + 1).
    #[must_use]
    pub fn net_id_capacity(&self) -> usize {
        self.net_ids.len()
    }

    // =========================================================================
    // Controllers
    // =========================================================================

    /// Updates the controller index after an object's controller changed.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or names no live object.
    pub fn notify_controller_changed(&mut self, id: LocalId) -> Result<()> {
        let object = resolve(&self.objects, id, "notify_controller_changed")?;
        if self.controllers.sync(object) {
            debug!(local_id = %id, controller = ?object.controller(), "controller changed");
        }
        Ok(())
    }

    /// Attaches `controller` to an object and updates the controller index.
    ///
    /// Returns the previously attached controller.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or names no live object.
    pub fn attach_controller(
        &mut self,
        id: LocalId,
        controller: ControllerId,
    ) -> Result<Option<ControllerId>> {
        let object = resolve_mut(&mut self.objects, id, "attach_controller")?;
        let previous = object.set_controller(Some(controller));
        self.controllers.sync(object);
        Ok(previous)
    }

    /// Detaches the controller of an object and updates the controller index.
    ///
    /// Returns the detached controller.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is stale or names no live object.
    pub fn detach_controller(&mut self, id: LocalId) -> Result<Option<ControllerId>> {
        let object = resolve_mut(&mut self.objects, id, "detach_controller")?;
        let previous = object.set_controller(None);
        self.controllers.sync(object);
        Ok(previous)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Returns the live object named by `id`.
    #[must_use]
    pub fn get(&self, id: LocalId) -> Option<&ObjectData> {
        self.objects.get(id).ok()
    }

    /// Returns the live object named by `id` mutably.
    ///
    /// Call [`ObjectRegistry::notify_controller_changed`] after changing its
    /// controller.
    #[must_use]
    pub fn get_mut(&mut self, id: LocalId) -> Option<&mut ObjectData> {
        self.objects.get_mut(id).ok()
    }

    /// Returns the object holding `net_id`.
    #[must_use]
    pub fn get_net(&self, net_id: NetId) -> Option<&ObjectData> {
        self.net_ids
            .get(net_id)
            .and_then(|id| self.objects.get(id).ok())
    }

    /// Looks up an object by local id.
    ///
    /// Stale handles resolve to `None` in both modes.
    ///
    /// # Errors
    ///
    /// In [`Lookup::Strict`] mode, returns an error if `id` lies past the end
    /// of the dense table.
    pub fn get_by_local_id(&self, id: LocalId, lookup: Lookup) -> Result<Option<&ObjectData>> {
        let length = self.objects.slot_count();
        if lookup == Lookup::Strict && id.slot() >= length {
            error!(local_id = ?id, length, "strict lookup past the end of the object table");
            return Err(Error::local_id_out_of_range(id.slot(), length));
        }
        Ok(self.get(id))
    }

    /// Looks up an object by net id.
    ///
    /// # Errors
    ///
    /// In [`Lookup::Strict`] mode, returns an error if `net_id` lies past the
    /// end of the net-id table.
    pub fn get_by_net_id(&self, net_id: NetId, lookup: Lookup) -> Result<Option<&ObjectData>> {
        if lookup == Lookup::Strict && !self.net_ids.in_range(net_id) {
            let length = self.net_ids.len();
            error!(net_id = %net_id, length, "strict lookup past the end of the net-id table");
            return Err(Error::net_id_out_of_range(net_id, length));
        }
        Ok(self.get_net(net_id))
    }

    /// Finds the object bound to an application handle.
    ///
    /// Scans the whole dense table.
    #[must_use]
    pub fn find_by_app_handle(&self, handle: ObjectHandle) -> Option<&ObjectData> {
        self.iter()
            .find(|object| object.app_handle() == Some(handle))
    }

    /// Finds the object a controller is attached to.
    ///
    /// Scans the controller index only.
    #[must_use]
    pub fn find_by_controller(&self, controller: ControllerId) -> Option<&ObjectData> {
        self.controller_objects()
            .find(|object| object.controller() == Some(controller))
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Iterates over every dense slot in local-id order; free slots yield
    /// `None`.
    pub fn all_objects(&self) -> impl Iterator<Item = Option<&ObjectData>> + '_ {
        self.objects.slots()
    }

    /// Iterates over live objects in local-id order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectData> + '_ {
        self.objects.iter().map(|(_, object)| object)
    }

    /// Iterates over objects with a controller attached, in no particular
    /// order.
    pub fn controller_objects(&self) -> impl Iterator<Item = &ObjectData> + '_ {
        self.controllers
            .iter()
            .filter_map(|id| self.objects.get(id).ok())
    }

    /// Iterates over the net-id table from net id 0; unheld ids yield `None`.
    pub fn objects_by_net_id(&self) -> impl Iterator<Item = Option<&ObjectData>> + '_ {
        self.net_ids
            .iter()
            .map(|holder| holder.and_then(|id| self.objects.get(id).ok()))
    }

    /// Returns the number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no object is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the dense table length, live or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.objects.slot_count()
    }

    /// Returns the number of local indices waiting for reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.objects.free_list().len()
    }

    /// Verifies that the dense table, the free list, the net-id table, and
    /// the controller index agree with each other.
    ///
    /// # Errors
    ///
    /// Returns an `Inconsistent` error describing the first disagreement.
    pub fn check_consistency(&self) -> Result<()> {
        let free_list = self.objects.free_list();
        let free: HashSet<usize> = free_list.iter().map(|index| *index as usize).collect();
        if free.len() != free_list.len() {
            return Err(Error::inconsistent("free list contains duplicates"));
        }

        let mut with_controller = 0;
        for (index, slot) in self.objects.slots().enumerate() {
            let generation = self.objects.generation(index).unwrap_or_default();
            let Some(object) = slot else {
                if !free.contains(&index) || generation % 2 == 1 {
                    return Err(Error::inconsistent(format!(
                        "slot {index} is empty but not free"
                    )));
                }
                continue;
            };

            let id = object.local_id();
            if free.contains(&index) {
                return Err(Error::inconsistent(format!(
                    "slot {index} is on the free list but holds {id:?}"
                )));
            }
            if id.slot() != index || id.generation != generation {
                return Err(Error::inconsistent(format!(
                    "slot {index} (generation {generation}) holds {id:?}"
                )));
            }
            if let Some(net_id) = object.net_id() {
                if self.net_ids.get(net_id) != Some(id) {
                    return Err(Error::inconsistent(format!(
                        "{id:?} records {net_id:?} but the net-id table disagrees"
                    )));
                }
            }
            let indexed = self.controllers.contains(id);
            if object.controller().is_some() != indexed {
                return Err(Error::inconsistent(format!(
                    "{id:?} controller index membership is {indexed}"
                )));
            }
            if indexed {
                with_controller += 1;
            }
        }

        if with_controller != self.controllers.len() {
            return Err(Error::inconsistent(format!(
                "controller index holds {} entries for {with_controller} objects",
                self.controllers.len()
            )));
        }

        for (slot, holder) in self.net_ids.iter().enumerate() {
            let Some(id) = holder else { continue };
            let recorded = self.objects.get(id).ok().and_then(ObjectData::net_id);
            if recorded.map(NetId::slot) != Some(slot) {
                return Err(Error::inconsistent(format!(
                    "net id {slot} maps to {id:?}, which records {recorded:?}"
                )));
            }
        }

        Ok(())
    }
}
