//! Synchronizable object registry for netsync.
//!
//! This crate provides:
//! - [`ObjectRegistry`] - The registry tying all views together
//! - [`SlotTable`] - Generational dense storage with a free list
//! - [`NetIdTable`] - Sparse index from network ids to objects
//! - [`ControllerIndex`] - Objects with a controller attached
//! - [`SyncListener`] - Net-id change notifications for the owner

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod controllers;
pub mod listener;
pub mod net_index;
pub mod object;
pub mod registry;
pub mod slots;

pub use config::{CollisionPolicy, RegistryConfig};
pub use controllers::ControllerIndex;
pub use listener::{NoopListener, SyncListener};
pub use net_index::NetIdTable;
pub use object::ObjectData;
pub use registry::{Lookup, ObjectRegistry};
pub use slots::SlotTable;
