// SPDX-License-Identifier: LGPL-3.0-only
//! Error types for the clipboard service.

use npclip_core::ClipboardError;
use thiserror::Error;

use crate::bus::wire::WireError;

/// Errors that can occur while running or talking to the clipboard service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Another process already owns the well-known name.
    #[error("Clipboard service '{0}' is already running")]
    AlreadyRunning(String),

    /// The configured bus name or object path is malformed.
    #[error("Invalid bus address: {0}")]
    InvalidAddress(String),

    /// D-Bus transport error.
    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// A reply or signal did not have the expected shape.
    #[error("Malformed wire data: {0}")]
    Wire(#[from] WireError),

    /// A store operation failed.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// The task forwarding events to the bus ended unexpectedly.
    #[error("Signal forwarder stopped: {0}")]
    ForwarderStopped(String),
}
