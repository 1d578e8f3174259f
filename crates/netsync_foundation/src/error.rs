//! Error types for the netsync registry.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::id::{LocalId, NetId};

/// Result alias used throughout netsync.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for registry operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an object not found error.
    #[must_use]
    pub fn object_not_found(id: LocalId) -> Self {
        Self::new(ErrorKind::ObjectNotFound(id))
    }

    /// Creates a stale handle error.
    #[must_use]
    pub fn stale_object(id: LocalId) -> Self {
        Self::new(ErrorKind::StaleObject(id))
    }

    /// Creates a local id out of range error.
    #[must_use]
    pub fn local_id_out_of_range(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::LocalIdOutOfRange { index, length })
    }

    /// Creates a net id out of range error.
    #[must_use]
    pub fn net_id_out_of_range(net_id: NetId, length: usize) -> Self {
        Self::new(ErrorKind::NetIdOutOfRange { net_id, length })
    }

    /// Creates a net id conflict error.
    #[must_use]
    pub fn net_id_conflict(net_id: NetId, existing: LocalId, incoming: LocalId) -> Self {
        Self::new(ErrorKind::NetIdConflict {
            net_id,
            existing,
            incoming,
        })
    }

    /// Creates an inconsistency error.
    #[must_use]
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Inconsistent(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// No live object occupies the handle's slot.
    #[error("object not found: {0:?}")]
    ObjectNotFound(LocalId),

    /// Handle is stale (generation mismatch).
    #[error("stale object handle: {0:?}")]
    StaleObject(LocalId),

    /// Strict lookup past the end of the dense table.
    #[error("local id out of range: {index} (length {length})")]
    LocalIdOutOfRange {
        /// The slot index that was requested.
        index: usize,
        /// The dense table length.
        length: usize,
    },

    /// Strict lookup past the end of the sparse table.
    #[error("net id out of range: {net_id} (length {length})")]
    NetIdOutOfRange {
        /// The net id that was requested.
        net_id: NetId,
        /// The sparse table length.
        length: usize,
    },

    /// A net id is already held by another live object.
    #[error("net id {net_id} already held by {existing}, refused for {incoming}")]
    NetIdConflict {
        /// The contested net id.
        net_id: NetId,
        /// The object currently holding the id.
        existing: LocalId,
        /// The object the id was requested for.
        incoming: LocalId,
    },

    /// The registry views disagree with each other.
    #[error("registry inconsistency: {0}")]
    Inconsistent(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The registry operation that failed.
    pub operation: Option<&'static str>,
    /// Display name of the object involved.
    pub object: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the object display name.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>) -> Self {
        self.object = Some(name.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(object) = &self.object {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "for `{object}`")?;
        }
        Ok(())
    }
}
