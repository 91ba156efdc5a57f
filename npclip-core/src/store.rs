// SPDX-License-Identifier: LGPL-3.0-only
//! Keyed registry of clipboard objects.

use std::collections::HashMap;

use crate::error::{ClipboardError, ClipboardResult};
use crate::object::{clamp_percent, ClipboardObject, DisplayInfo, Format, ObjectSummary};
use crate::type_registry::TypeRegistry;

/// Registry owning every clipboard object and its formats.
///
/// The store is not synchronised. Its owner is expected to serialise access,
/// and every operation either applies fully or returns an error without
/// touching state.
pub struct ClipboardObjectStore {
    objects: HashMap<String, ClipboardObject>,
    registry: TypeRegistry,
}

impl ClipboardObjectStore {
    /// Create an empty store with the default display policy.
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::default())
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            objects: HashMap::new(),
            registry,
        }
    }

    /// Register a new, empty object.
    ///
    /// Fails with [`ClipboardError::DuplicateKey`] if the id is taken; the
    /// existing object is left untouched.
    pub fn create(&mut self, object_id: &str, name: &str) -> ClipboardResult<()> {
        if self.objects.contains_key(object_id) {
            return Err(ClipboardError::DuplicateKey {
                object_id: object_id.to_string(),
            });
        }

        let display = self.registry.describe(std::iter::empty::<&Format>());
        self.objects.insert(
            object_id.to_string(),
            ClipboardObject::new(object_id.to_string(), name.to_string(), display),
        );
        log::debug!("Added object {} with name {}", object_id, name);
        Ok(())
    }

    /// Attach a format to an object.
    ///
    /// A format of the same type already present is replaced (last wins) and
    /// keeps its position in the format list. Display attributes are
    /// recomputed from the resulting format set.
    pub fn add_format(
        &mut self,
        object_id: &str,
        format_type: &str,
        data: Vec<u8>,
        on_disk: bool,
    ) -> ClipboardResult<()> {
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or_else(|| ClipboardError::not_found(object_id))?;

        let path = on_disk.then(|| String::from_utf8_lossy(&data).into_owned());
        if object.insert_format(Format::new(format_type, data, on_disk)) {
            log::debug!("Replaced format {} on object {}", format_type, object_id);
        }

        let display = self.registry.describe(object.formats());
        object.set_display(display);

        match path {
            Some(path) => log::debug!("Added format of type {} with path at {}", format_type, path),
            None => log::debug!("Added in-memory format of type {}", format_type),
        }
        Ok(())
    }

    /// Replace an object's progress, clamped to 0..=100.
    ///
    /// Returns the value actually stored.
    pub fn set_percent(&mut self, object_id: &str, percent: i32) -> ClipboardResult<u8> {
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or_else(|| ClipboardError::not_found(object_id))?;

        let stored = clamp_percent(percent);
        if i32::from(stored) != percent {
            log::warn!(
                "Clamped percent {} to {} for object {}",
                percent,
                stored,
                object_id
            );
        }
        object.set_percent(stored);
        log::debug!("Changed object {} to percent {}", object_id, stored);
        Ok(stored)
    }

    /// Override the derived display attributes of an object.
    ///
    /// The override lasts until the next format is added.
    pub fn set_display(&mut self, object_id: &str, display: DisplayInfo) -> ClipboardResult<()> {
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or_else(|| ClipboardError::not_found(object_id))?;
        object.set_display(display);
        Ok(())
    }

    /// Remove an object and all of its formats.
    ///
    /// Files referenced by on-disk formats are left in place.
    pub fn delete(&mut self, object_id: &str) -> ClipboardResult<ClipboardObject> {
        let object = self
            .objects
            .remove(object_id)
            .ok_or_else(|| ClipboardError::not_found(object_id))?;
        log::debug!("Deleted object with object_id {}", object_id);
        Ok(object)
    }

    /// Snapshot of an object.
    pub fn get_summary(&self, object_id: &str) -> ClipboardResult<ObjectSummary> {
        self.get(object_id).map(ClipboardObject::summary)
    }

    /// The full format record of an object.
    pub fn get_format(&self, object_id: &str, format_type: &str) -> ClipboardResult<&Format> {
        self.get(object_id)?
            .format(format_type)
            .ok_or_else(|| ClipboardError::FormatNotFound {
                object_id: object_id.to_string(),
                format_type: format_type.to_string(),
            })
    }

    /// Raw stored value of a format.
    ///
    /// For on-disk formats this is the path, not the file contents.
    pub fn get_format_data(&self, object_id: &str, format_type: &str) -> ClipboardResult<Vec<u8>> {
        self.get_format(object_id, format_type)
            .map(|format| format.data().to_vec())
    }

    pub fn get(&self, object_id: &str) -> ClipboardResult<&ClipboardObject> {
        self.objects
            .get(object_id)
            .ok_or_else(|| ClipboardError::not_found(object_id))
    }

    pub fn contains(&self, object_id: &str) -> bool {
        self.objects.contains_key(object_id)
    }

    /// Ids of all registered objects, sorted.
    pub fn object_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.objects.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ClipboardObjectStore {
    fn default() -> Self {
        Self::new()
    }
}
