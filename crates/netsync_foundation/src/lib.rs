//! Core identifier and error types for netsync.
//!
//! This crate provides:
//! - [`LocalId`] - Generational process-local object identifiers
//! - [`NetId`] - Network-visible object identifiers
//! - [`ObjectHandle`] / [`ControllerId`] - Opaque references to external objects
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{ControllerId, LocalId, NetId, ObjectHandle};
