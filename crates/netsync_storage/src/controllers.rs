//! Index of objects that have a controller attached.
//!
//! Controller-bearing objects are a small fraction of the population and are
//! walked every tick, so they are kept in their own unordered list instead of
//! being filtered out of the dense table.

use netsync_foundation::LocalId;

use crate::object::ObjectData;

/// Unordered set of controller-bearing objects.
#[derive(Debug, Clone, Default)]
pub struct ControllerIndex {
    members: Vec<LocalId>,
}

impl ControllerIndex {
    /// Creates a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings membership of `object` in line with its controller field.
    ///
    /// Returns true if the index changed.
    pub fn sync(&mut self, object: &ObjectData) -> bool {
        let id = object.local_id();
        let position = self.members.iter().position(|member| *member == id);

        match (object.controller().is_some(), position) {
            (true, None) => {
                self.members.push(id);
                true
            }
            (false, Some(position)) => {
                self.members.swap_remove(position);
                true
            }
            _ => false,
        }
    }

    /// Returns true if `id` is in the index.
    #[must_use]
    pub fn contains(&self, id: LocalId) -> bool {
        self.members.contains(&id)
    }

    /// Returns the number of indexed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if no object has a controller.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over indexed ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = LocalId> + '_ {
        self.members.iter().copied()
    }
}
