// SPDX-License-Identifier: LGPL-3.0-only
//! Clipboard object store.
//!
//! Holds clipboard objects (named, multi-format pieces of shared content
//! that producers fill in progressively) together with the display policy
//! that derives their icon, preview and activity.

pub mod error;
pub mod object;
pub mod store;
pub mod type_registry;

pub use error::{ClipboardError, ClipboardResult};
pub use object::{ClipboardObject, DisplayInfo, Format, ObjectState, ObjectSummary};
pub use store::ClipboardObjectStore;
pub use type_registry::{FileCategory, TypeRegistry};
