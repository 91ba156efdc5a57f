// SPDX-License-Identifier: LGPL-3.0-only
//! D-Bus clipboard service.
//!
//! This module provides the `org.laptop.Clipboard` interface on the session
//! bus, backed by a [`ClipboardService`](crate::service::ClipboardService),
//! and a typed proxy for talking to it from other processes.

mod fault;
mod interface;
mod proxy;
mod server;
pub mod wire;

pub use fault::ClipboardFault;
pub use interface::ClipboardBus;
pub use proxy::{fault_name, fetch_summary, ClipboardProxy, ClipboardProxyBlocking};
pub use server::{ClipboardBusService, CLIPBOARD_BUS_NAME, CLIPBOARD_OBJECT_PATH};
