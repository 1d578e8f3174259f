//! Dense slot table with generational indices and a free list.
//!
//! The `SlotTable` owns values addressed by [`LocalId`]. Freed slot indices
//! are pushed onto a free list and handed out again, most recently freed
//! first. The table only grows by appending, so a live id stays valid until
//! its value is removed.

use netsync_foundation::{Error, LocalId, Result};

#[derive(Debug, Clone)]
struct Slot<T> {
    /// Even generations are free, odd generations are alive.
    generation: u32,
    value: Option<T>,
}

/// Arena of values indexed by generational local ids.
#[derive(Debug, Clone)]
pub struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    /// Indices available for reuse, popped from the back.
    free_list: Vec<u32>,
    live_count: usize,
}

impl<T> Default for SlotTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotTable<T> {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Creates an empty table with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Inserts a value built from its freshly assigned id.
    ///
    /// Reuses the most recently freed index when one is available,
    /// otherwise appends a new slot.
    ///
    /// # Panics
    ///
    /// Panics if the table already holds `u32::MAX` slots, or if the free
    /// list names a slot that is still occupied.
    pub fn insert_with(&mut self, build: impl FnOnce(LocalId) -> T) -> LocalId {
        let id = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            assert!(
                slot.value.is_none(),
                "free list names occupied slot {index}"
            );
            // Was even/free, now odd/alive
            slot.generation = slot.generation.wrapping_add(1);
            let id = LocalId::new(index, slot.generation);
            slot.value = Some(build(id));
            id
        } else {
            let index =
                u32::try_from(self.slots.len()).expect("slot table index space exhausted");
            let id = LocalId::new(index, 1);
            self.slots.push(Slot {
                generation: 1,
                value: Some(build(id)),
            });
            id
        };

        self.live_count += 1;
        id
    }

    /// Removes the value stored under `id` and frees its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn remove(&mut self, id: LocalId) -> Result<T> {
        self.validate(id)?;

        let slot = &mut self.slots[id.slot()];
        let value = slot
            .value
            .take()
            .ok_or_else(|| Error::object_not_found(id))?;
        // Was odd/alive, now even/free
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.live_count -= 1;

        Ok(value)
    }

    /// Validates that `id` names a live value.
    ///
    /// # Errors
    ///
    /// Returns `StaleObject` if the slot has been freed or reused since the
    /// id was issued, and `ObjectNotFound` if the slot never existed or is
    /// currently empty.
    pub fn validate(&self, id: LocalId) -> Result<()> {
        let Some(slot) = self.slots.get(id.slot()) else {
            return Err(Error::object_not_found(id));
        };

        if slot.generation != id.generation {
            return Err(Error::stale_object(id));
        }

        if slot.value.is_none() {
            return Err(Error::object_not_found(id));
        }

        Ok(())
    }

    /// Returns the value stored under `id`.
    ///
    /// # Errors
    ///
    /// See [`SlotTable::validate`].
    pub fn get(&self, id: LocalId) -> Result<&T> {
        self.validate(id)?;
        self.slots[id.slot()]
            .value
            .as_ref()
            .ok_or_else(|| Error::object_not_found(id))
    }

    /// Returns the value stored under `id` mutably.
    ///
    /// # Errors
    ///
    /// See [`SlotTable::validate`].
    pub fn get_mut(&mut self, id: LocalId) -> Result<&mut T> {
        self.validate(id)?;
        self.slots[id.slot()]
            .value
            .as_mut()
            .ok_or_else(|| Error::object_not_found(id))
    }

    /// Returns the current generation of slot `index`, if it exists.
    #[must_use]
    pub fn generation(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|slot| slot.generation)
    }

    /// Returns the number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if no slot holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the number of slots, live or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the free list, next index to be reused last.
    #[must_use]
    pub fn free_list(&self) -> &[u32] {
        &self.free_list
    }

    /// Iterates over every slot in index order; free slots yield `None`.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(|slot| slot.value.as_ref())
    }

    /// Iterates over live values with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (LocalId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((LocalId::new(index, slot.generation), value))
        })
    }
}
