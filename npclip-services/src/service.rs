// SPDX-License-Identifier: LGPL-3.0-only
//! Transport-independent clipboard coordinator.
//!
//! [`ClipboardService`] is the single owner of the object store. Each
//! mutating call locks the store, applies the change, snapshots the result
//! and publishes exactly one [`ClipboardEvent`] before the lock is released,
//! so subscribers see events in the same order the mutations happened.

use npclip_core::{ClipboardObjectStore, ClipboardResult, ObjectSummary, TypeRegistry};
use tokio::sync::Mutex;

use crate::events::{ClipboardEvent, ClipboardEventReceiver, ClipboardEventSender};
use crate::settings::SettingsRegistry;

/// Owner of the clipboard object store.
pub struct ClipboardService {
    store: Mutex<ClipboardObjectStore>,
    events: ClipboardEventSender,
}

impl ClipboardService {
    /// Create a service around an existing store.
    pub fn new(store: ClipboardObjectStore) -> Self {
        Self {
            store: Mutex::new(store),
            events: ClipboardEventSender::new(),
        }
    }

    /// Create an empty service configured from settings.
    pub fn from_settings(settings: &SettingsRegistry) -> Self {
        let registry = TypeRegistry::new(settings.preview_chars());
        Self::new(ClipboardObjectStore::with_registry(registry))
    }

    /// Subscribe to clipboard events.
    ///
    /// Only events published after this call are received. Events queue up
    /// until read, so a subscriber sees every one of them.
    pub fn subscribe(&self) -> ClipboardEventReceiver {
        self.events.subscribe()
    }

    pub async fn add_object(&self, object_id: &str, name: &str) -> ClipboardResult<()> {
        let mut store = self.store.lock().await;
        store.create(object_id, name)?;
        self.publish(ClipboardEvent::ObjectAdded {
            object_id: object_id.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    pub async fn add_object_format(
        &self,
        object_id: &str,
        format_type: &str,
        data: Vec<u8>,
        on_disk: bool,
    ) -> ClipboardResult<()> {
        let mut store = self.store.lock().await;
        store.add_format(object_id, format_type, data, on_disk)?;
        let values = store.get_summary(object_id)?.state();
        self.publish(ClipboardEvent::ObjectStateChanged {
            object_id: object_id.to_string(),
            values,
        });
        Ok(())
    }

    pub async fn delete_object(&self, object_id: &str) -> ClipboardResult<()> {
        let mut store = self.store.lock().await;
        store.delete(object_id)?;
        self.publish(ClipboardEvent::ObjectDeleted {
            object_id: object_id.to_string(),
        });
        Ok(())
    }

    pub async fn set_object_percent(&self, object_id: &str, percent: i32) -> ClipboardResult<()> {
        let mut store = self.store.lock().await;
        store.set_percent(object_id, percent)?;
        let values = store.get_summary(object_id)?.state();
        self.publish(ClipboardEvent::ObjectStateChanged {
            object_id: object_id.to_string(),
            values,
        });
        Ok(())
    }

    pub async fn get_object(&self, object_id: &str) -> ClipboardResult<ObjectSummary> {
        self.store.lock().await.get_summary(object_id)
    }

    /// Raw stored value of a format; a path for on-disk formats.
    pub async fn get_object_data(
        &self,
        object_id: &str,
        format_type: &str,
    ) -> ClipboardResult<Vec<u8>> {
        self.store
            .lock()
            .await
            .get_format_data(object_id, format_type)
    }

    /// Ids of all registered objects.
    pub async fn object_ids(&self) -> Vec<String> {
        self.store.lock().await.object_ids()
    }

    // Callers must hold the store lock.
    fn publish(&self, event: ClipboardEvent) {
        log::trace!("Publishing {:?}", event);
        if self.events.send(event) == 0 {
            log::trace!("No subscribers for clipboard event");
        }
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::from_settings(&SettingsRegistry::with_defaults())
    }
}
