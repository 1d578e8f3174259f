//! Registry entries.

use netsync_foundation::{ControllerId, LocalId, NetId, ObjectHandle};

/// One registered synchronizable object.
///
/// The registry owns every `ObjectData` and is the only writer of its two
/// identities. Owners may change the app handle, the display name, and the
/// controller through [`ObjectRegistry::get_mut`]; a controller change must be
/// followed by [`ObjectRegistry::notify_controller_changed`].
///
/// [`ObjectRegistry::get_mut`]: crate::ObjectRegistry::get_mut
/// [`ObjectRegistry::notify_controller_changed`]: crate::ObjectRegistry::notify_controller_changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectData {
    pub(crate) local_id: LocalId,
    pub(crate) net_id: Option<NetId>,
    app_handle: Option<ObjectHandle>,
    controller: Option<ControllerId>,
    name: String,
}

impl ObjectData {
    pub(crate) fn new(local_id: LocalId) -> Self {
        Self {
            local_id,
            net_id: None,
            app_handle: None,
            controller: None,
            name: String::new(),
        }
    }

    /// Returns the process-local id.
    #[must_use]
    pub fn local_id(&self) -> LocalId {
        self.local_id
    }

    /// Returns the network id, if one is assigned.
    #[must_use]
    pub fn net_id(&self) -> Option<NetId> {
        self.net_id
    }

    /// Returns the application object this entry represents.
    #[must_use]
    pub fn app_handle(&self) -> Option<ObjectHandle> {
        self.app_handle
    }

    /// Sets the application object this entry represents.
    pub fn set_app_handle(&mut self, handle: Option<ObjectHandle>) {
        self.app_handle = handle;
    }

    /// Returns the attached controller, if any.
    #[must_use]
    pub fn controller(&self) -> Option<ControllerId> {
        self.controller
    }

    /// Replaces the attached controller and returns the previous one.
    ///
    /// The controller index is not updated until the registry is notified.
    pub fn set_controller(&mut self, controller: Option<ControllerId>) -> Option<ControllerId> {
        std::mem::replace(&mut self.controller, controller)
    }

    /// Diagnostic label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the diagnostic label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
