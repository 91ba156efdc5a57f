// SPDX-License-Identifier: LGPL-3.0-only
//! Faults returned to remote callers.

use npclip_core::ClipboardError;
use zbus::DBusError;

/// D-Bus error replies of the clipboard interface.
///
/// Error names are `org.laptop.Clipboard.Error.<Variant>` and the message
/// names the offending object id and format type.
#[derive(Debug, DBusError)]
#[zbus(prefix = "org.laptop.Clipboard.Error")]
pub enum ClipboardFault {
    #[zbus(error)]
    ZBus(zbus::Error),
    NotFound(String),
    FormatNotFound(String),
    DuplicateKey(String),
}

impl From<ClipboardError> for ClipboardFault {
    fn from(err: ClipboardError) -> Self {
        let message = err.to_string();
        match err {
            ClipboardError::NotFound { .. } => ClipboardFault::NotFound(message),
            ClipboardError::FormatNotFound { .. } => ClipboardFault::FormatNotFound(message),
            ClipboardError::DuplicateKey { .. } => ClipboardFault::DuplicateKey(message),
        }
    }
}

impl From<zbus::zvariant::Error> for ClipboardFault {
    fn from(err: zbus::zvariant::Error) -> Self {
        ClipboardFault::ZBus(zbus::Error::Variant(err))
    }
}
