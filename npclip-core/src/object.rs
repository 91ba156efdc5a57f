// SPDX-License-Identifier: LGPL-3.0-only
//! Clipboard objects, their formats and the snapshots handed out by the store.

use indexmap::IndexMap;
use std::path::PathBuf;

/// One concrete encoding of a clipboard object's payload.
///
/// When `on_disk` is set, `data` holds a filesystem path rather than the
/// payload itself. The store never reads or deletes that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    format_type: String,
    data: Vec<u8>,
    on_disk: bool,
}

impl Format {
    /// Create a new format.
    pub fn new(format_type: impl Into<String>, data: Vec<u8>, on_disk: bool) -> Self {
        Self {
            format_type: format_type.into(),
            data,
            on_disk,
        }
    }

    /// The format identifier, usually a MIME type.
    pub fn format_type(&self) -> &str {
        &self.format_type
    }

    /// The raw stored value: inline payload, or path bytes for on-disk formats.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether `data` is a path reference.
    pub fn is_on_disk(&self) -> bool {
        self.on_disk
    }

    /// The referenced path, for on-disk formats.
    pub fn path(&self) -> Option<PathBuf> {
        if self.on_disk {
            Some(PathBuf::from(String::from_utf8_lossy(&self.data).into_owned()))
        } else {
            None
        }
    }
}

/// Display attributes derived from an object's formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Icon name (freedesktop naming).
    pub icon: String,
    /// Short textual preview of the content.
    pub preview: String,
    /// Activity/bundle id able to open the content.
    pub activity: String,
}

/// State carried by `object_state_changed` notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectState {
    pub name: String,
    pub percent: u8,
    pub icon: String,
    pub preview: String,
    pub activity: String,
}

/// Point-in-time snapshot of an object, as returned by queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub name: String,
    pub percent: u8,
    pub icon: String,
    pub preview: String,
    pub activity: String,
    /// Format types in first-insertion order.
    pub format_types: Vec<String>,
}

impl ObjectSummary {
    /// The summary without its format list.
    pub fn state(&self) -> ObjectState {
        ObjectState {
            name: self.name.clone(),
            percent: self.percent,
            icon: self.icon.clone(),
            preview: self.preview.clone(),
            activity: self.activity.clone(),
        }
    }
}

/// A clipboard object owned by the store.
#[derive(Debug, Clone)]
pub struct ClipboardObject {
    id: String,
    name: String,
    percent: u8,
    formats: IndexMap<String, Format>,
    display: DisplayInfo,
}

impl ClipboardObject {
    pub(crate) fn new(id: String, name: String, display: DisplayInfo) -> Self {
        Self {
            id,
            name,
            percent: 0,
            formats: IndexMap::new(),
            display,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn display(&self) -> &DisplayInfo {
        &self.display
    }

    /// Look up a format by type.
    pub fn format(&self, format_type: &str) -> Option<&Format> {
        self.formats.get(format_type)
    }

    /// Iterate formats in first-insertion order.
    pub fn formats(&self) -> indexmap::map::Values<'_, String, Format> {
        self.formats.values()
    }

    pub fn format_types(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    pub fn summary(&self) -> ObjectSummary {
        ObjectSummary {
            name: self.name.clone(),
            percent: self.percent,
            icon: self.display.icon.clone(),
            preview: self.display.preview.clone(),
            activity: self.display.activity.clone(),
            format_types: self.format_types(),
        }
    }

    /// Replaces any format of the same type in place; returns whether one was replaced.
    pub(crate) fn insert_format(&mut self, format: Format) -> bool {
        self.formats
            .insert(format.format_type.clone(), format)
            .is_some()
    }

    pub(crate) fn set_percent(&mut self, percent: u8) {
        self.percent = percent;
    }

    pub(crate) fn set_display(&mut self, display: DisplayInfo) {
        self.display = display;
    }
}

/// Clamp a requested progress value into 0..=100.
pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}
