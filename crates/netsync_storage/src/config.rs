//! Configuration for the object registry.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a net id is assigned while another object holds it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionPolicy {
    /// Log a warning, clear the previous holder's net id, and take the slot.
    #[default]
    Overwrite,
    /// Refuse the assignment with a `NetIdConflict` error.
    Reject,
}

/// Configuration for an [`ObjectRegistry`](crate::ObjectRegistry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegistryConfig {
    /// Dense table slots to pre-allocate.
    pub object_capacity: usize,

    /// Sparse net-id table slots to pre-allocate.
    pub net_id_capacity: usize,

    /// Net-id collision handling.
    pub collision_policy: CollisionPolicy,
}

impl RegistryConfig {
    /// Creates a configuration that rejects net-id collisions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            collision_policy: CollisionPolicy::Reject,
            ..Self::default()
        }
    }

    /// Builder method to set the dense table pre-allocation.
    #[must_use]
    pub fn with_object_capacity(mut self, capacity: usize) -> Self {
        self.object_capacity = capacity;
        self
    }

    /// Builder method to set the sparse table pre-allocation.
    #[must_use]
    pub fn with_net_id_capacity(mut self, capacity: usize) -> Self {
        self.net_id_capacity = capacity;
        self
    }

    /// Builder method to set the collision policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}
