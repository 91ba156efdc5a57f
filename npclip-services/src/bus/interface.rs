// SPDX-License-Identifier: LGPL-3.0-only
//! `org.laptop.Clipboard` interface implementation.

use std::collections::HashMap;
use std::sync::Arc;
use zbus::interface;
use zbus::object_server::SignalEmitter;
use zbus::zvariant::OwnedValue;

use super::fault::ClipboardFault;
use super::wire::summary_to_wire;
use crate::service::ClipboardService;

/// D-Bus face of a [`ClipboardService`].
///
/// Methods only translate arguments and faults. Signals are not emitted
/// here but by the forwarder started in [`super::ClipboardBusService`], which
/// relays the service's events in publication order.
pub struct ClipboardBus {
    service: Arc<ClipboardService>,
}

impl ClipboardBus {
    pub fn new(service: Arc<ClipboardService>) -> Self {
        Self { service }
    }
}

fn fault(method: &str, object_id: &str, err: impl Into<ClipboardFault>) -> ClipboardFault {
    let fault = err.into();
    log::debug!("Clipboard.{} object_id={} failed: {:?}", method, object_id, fault);
    fault
}

#[interface(name = "org.laptop.Clipboard")]
impl ClipboardBus {
    #[zbus(name = "add_object")]
    async fn add_object(&self, object_id: &str, name: &str) -> Result<(), ClipboardFault> {
        log::debug!("Clipboard.add_object object_id={} name={}", object_id, name);
        self.service
            .add_object(object_id, name)
            .await
            .map_err(|err| fault("add_object", object_id, err))
    }

    #[zbus(name = "add_object_format")]
    async fn add_object_format(
        &self,
        object_id: &str,
        format_type: &str,
        data: Vec<u8>,
        on_disk: bool,
    ) -> Result<(), ClipboardFault> {
        log::debug!(
            "Clipboard.add_object_format object_id={} format_type={} bytes={} on_disk={}",
            object_id,
            format_type,
            data.len(),
            on_disk
        );
        self.service
            .add_object_format(object_id, format_type, data, on_disk)
            .await
            .map_err(|err| fault("add_object_format", object_id, err))
    }

    #[zbus(name = "delete_object")]
    async fn delete_object(&self, object_id: &str) -> Result<(), ClipboardFault> {
        log::debug!("Clipboard.delete_object object_id={}", object_id);
        self.service
            .delete_object(object_id)
            .await
            .map_err(|err| fault("delete_object", object_id, err))
    }

    #[zbus(name = "set_object_percent")]
    async fn set_object_percent(
        &self,
        object_id: &str,
        percent: i32,
    ) -> Result<(), ClipboardFault> {
        log::debug!(
            "Clipboard.set_object_percent object_id={} percent={}",
            object_id,
            percent
        );
        self.service
            .set_object_percent(object_id, percent)
            .await
            .map_err(|err| fault("set_object_percent", object_id, err))
    }

    #[zbus(name = "get_object")]
    async fn get_object(
        &self,
        object_id: &str,
    ) -> Result<HashMap<String, OwnedValue>, ClipboardFault> {
        let summary = self
            .service
            .get_object(object_id)
            .await
            .map_err(|err| fault("get_object", object_id, err))?;
        Ok(summary_to_wire(&summary)?)
    }

    #[zbus(name = "get_object_data")]
    async fn get_object_data(
        &self,
        object_id: &str,
        format_type: &str,
    ) -> Result<Vec<u8>, ClipboardFault> {
        self.service
            .get_object_data(object_id, format_type)
            .await
            .map_err(|err| fault("get_object_data", object_id, err))
    }

    #[zbus(signal)]
    #[zbus(name = "object_added")]
    pub async fn object_added(
        emitter: &SignalEmitter<'_>,
        object_id: &str,
        name: &str,
    ) -> zbus::Result<()>;

    #[zbus(signal)]
    #[zbus(name = "object_deleted")]
    pub async fn object_deleted(emitter: &SignalEmitter<'_>, object_id: &str) -> zbus::Result<()>;

    #[zbus(signal)]
    #[zbus(name = "object_state_changed")]
    pub async fn object_state_changed(
        emitter: &SignalEmitter<'_>,
        object_id: &str,
        values: HashMap<String, OwnedValue>,
    ) -> zbus::Result<()>;
}
