//! netsync - Registry of synchronizable objects
//!
//! This crate re-exports all layers of the netsync system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: netsync_storage    — Object registry, net-id index, controller index
//! Layer 0: netsync_foundation — Core types (LocalId, NetId, Error)
//! ```

pub use netsync_foundation as foundation;
pub use netsync_storage as storage;
