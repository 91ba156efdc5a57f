// SPDX-License-Identifier: LGPL-3.0-only
//! Error types for the clipboard object store.

use thiserror::Error;

/// Errors that can occur when operating on the clipboard object store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No object is registered under the given id.
    #[error("Clipboard object '{object_id}' not found")]
    NotFound {
        /// The id that was looked up.
        object_id: String,
    },

    /// The object exists but carries no format of the given type.
    #[error("Format '{format_type}' not found on clipboard object '{object_id}'")]
    FormatNotFound {
        /// The object that was queried.
        object_id: String,
        /// The missing format type.
        format_type: String,
    },

    /// An object with the given id is already registered.
    #[error("Clipboard object '{object_id}' already exists")]
    DuplicateKey {
        /// The id that collided.
        object_id: String,
    },
}

impl ClipboardError {
    pub(crate) fn not_found(object_id: &str) -> Self {
        Self::NotFound {
            object_id: object_id.to_string(),
        }
    }

    /// The object id this error refers to.
    pub fn object_id(&self) -> &str {
        match self {
            Self::NotFound { object_id }
            | Self::FormatNotFound { object_id, .. }
            | Self::DuplicateKey { object_id } => object_id,
        }
    }
}

/// Result alias for store operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;
