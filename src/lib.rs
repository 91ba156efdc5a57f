// SPDX-License-Identifier: LGPL-3.0-only
#![warn(missing_docs)]

//! Clipboard coordination service for the desktop session bus.
//!
//! Producers register clipboard objects, attach payload formats and report
//! transfer progress; consumers query them and follow changes through bus
//! signals. The store lives in [`core`], the service and its D-Bus face in
//! [`services`].

pub use npclip_core as core;
pub use npclip_services as services;

/// A "prelude" for users of npclip.
///
/// ```rust
/// use npclip::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ClipboardError, ClipboardObjectStore, DisplayInfo, Format, ObjectState, ObjectSummary,
        TypeRegistry,
    };
    pub use crate::services::bus::{ClipboardProxy, ClipboardProxyBlocking};
    pub use crate::services::{
        ClipboardBusService, ClipboardEvent, ClipboardService, ServiceError, SettingsRegistry,
    };
}
