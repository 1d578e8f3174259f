//! Sparse net-id index.
//!
//! Maps network ids to the local ids of the objects holding them. The table
//! is indexed directly by net id and grows on demand; its length is the
//! high-water mark of every net id ever assigned and never shrinks.

use netsync_foundation::{LocalId, NetId};

/// Sparse table from [`NetId`] to [`LocalId`].
#[derive(Debug, Clone, Default)]
pub struct NetIdTable {
    slots: Vec<Option<LocalId>>,
}

impl NetIdTable {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the holder of `net_id`, if any.
    #[must_use]
    pub fn get(&self, net_id: NetId) -> Option<LocalId> {
        self.slots.get(net_id.slot()).copied().flatten()
    }

    /// Returns true if `net_id` falls inside the table.
    #[must_use]
    pub fn in_range(&self, net_id: NetId) -> bool {
        net_id.slot() < self.slots.len()
    }

    /// Stores `id` at `net_id`, growing the table with empty slots if needed.
    ///
    /// Returns whatever previously occupied the slot.
    ///
    /// # Panics
    ///
    /// Growth allocates `net_id + 1` slots; panics if that exceeds
    /// `isize::MAX` bytes. Ids near `u32::MAX` reserve gigabytes.
    pub fn assign(&mut self, net_id: NetId, id: LocalId) -> Option<LocalId> {
        let slot = net_id.slot();
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot].replace(id)
    }

    /// Clears `net_id` on behalf of its holder `id`.
    ///
    /// Ids past the end of the table are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the slot is held by a different object; the registry never
    /// lets an object record a net id it does not hold.
    pub fn release(&mut self, net_id: NetId, id: LocalId) {
        let Some(slot) = self.slots.get_mut(net_id.slot()) else {
            return;
        };
        let holder = *slot;
        assert!(
            holder.is_none_or(|holder| holder == id),
            "net id {net_id} is held by {holder:?}, not {id:?}"
        );
        *slot = None;
    }

    /// Proposes the lowest free net id without reserving it.
    ///
    /// Returns the table length when every slot is taken.
    ///
    /// # Panics
    ///
    /// Panics if every net id up to `u32::MAX` is taken.
    #[must_use]
    pub fn first_free(&self) -> NetId {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.slots.len());
        NetId(u32::try_from(slot).expect("net id space exhausted"))
    }

    /// Reserves capacity so the table can reach `count` slots without
    /// reallocating. The length is unchanged.
    pub fn reserve(&mut self, count: usize) {
        self.slots.reserve(count.saturating_sub(self.slots.len()));
    }

    /// Returns the table length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no net id was ever assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the allocated capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Iterates over every slot from net id 0; holes yield `None`.
    pub fn iter(&self) -> impl Iterator<Item = Option<LocalId>> + '_ {
        self.slots.iter().copied()
    }
}
