//! Object identifiers: generational local ids, network ids, and opaque handles.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Process-local object identifier with a generational index.
///
/// The index addresses a slot in the registry's dense table and is recycled
/// after the object is destroyed. The generation counter changes every time
/// the slot is freed or reused, so a handle kept past its object's lifetime
/// is detected instead of silently resolving to the slot's new occupant.
///
/// # Layout
/// - `index`: 32-bit slot index
/// - `generation`: 32-bit generation counter (odd while the slot is alive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalId {
    /// Index into the dense object table.
    pub index: u32,
    /// Generation counter for stale handle detection.
    pub generation: u32,
}

impl LocalId {
    /// Creates a new local id with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index as a `usize`.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Network-visible object identifier.
///
/// Assigned by the replication layer; "no id" is expressed as
/// `Option<NetId>::None` rather than a sentinel value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetId(pub u32);

impl NetId {
    /// Returns the sparse table index for this id.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NetId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetId({})", self.0)
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to the application-level object an entry represents.
///
/// The registry never dereferences it; the host decides what the value means
/// (an engine object id, a pointer-sized key, ...).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectHandle(pub u64);

/// Opaque reference to a controller delegate attached to an entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerId(pub u64);
