// SPDX-License-Identifier: LGPL-3.0-only
//! Session bus registration and signal forwarding.

use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use zbus::connection::{Builder as ConnectionBuilder, Connection};
use zbus::names::WellKnownName;
use zbus::object_server::{InterfaceRef, SignalEmitter};
use zbus::zvariant::ObjectPath;

use super::interface::ClipboardBus;
use super::wire::state_to_wire;
use crate::error::ServiceError;
use crate::events::{ClipboardEvent, ClipboardEventReceiver};
use crate::service::ClipboardService;
use crate::settings::SettingsRegistry;

/// Default well-known name of the clipboard service.
pub const CLIPBOARD_BUS_NAME: &str = "org.laptop.Clipboard";
/// Default object path of the clipboard service.
pub const CLIPBOARD_OBJECT_PATH: &str = "/org/laptop/Clipboard";

/// A clipboard service published on a D-Bus connection.
///
/// Owns the connection (and with it the well-known name, if any) and the
/// task relaying service events as D-Bus signals. Dropping it releases the
/// name.
pub struct ClipboardBusService {
    connection: Connection,
    service: Arc<ClipboardService>,
    bus_name: Option<String>,
    forwarder: JoinHandle<Result<(), ServiceError>>,
}

impl ClipboardBusService {
    /// Publish `service` on the session bus using the configured name and path.
    pub async fn start_with_settings(
        service: Arc<ClipboardService>,
        settings: &SettingsRegistry,
    ) -> Result<Self, ServiceError> {
        Self::start(service, settings.bus_name(), settings.object_path()).await
    }

    /// Publish `service` on the session bus.
    ///
    /// Fails with [`ServiceError::AlreadyRunning`] if another connection owns
    /// `bus_name`. The name is requested without queueing and without
    /// replacement in either direction, so a second instance can neither
    /// wait for the name nor take it over.
    pub async fn start(
        service: Arc<ClipboardService>,
        bus_name: &str,
        object_path: &str,
    ) -> Result<Self, ServiceError> {
        let name = WellKnownName::try_from(bus_name)
            .map_err(|e| ServiceError::InvalidAddress(format!("{bus_name}: {e}")))?;

        let builder = ConnectionBuilder::session()?
            .name(name)?
            .allow_name_replacements(false)
            .replace_existing_names(false);

        match Self::serve(builder, service, object_path).await {
            Ok(mut bus) => {
                log::info!("Clipboard DBus service '{}', object '{}'", bus_name, object_path);
                bus.bus_name = Some(bus_name.to_string());
                Ok(bus)
            },
            Err(ServiceError::Bus(zbus::Error::NameTaken)) => {
                Err(ServiceError::AlreadyRunning(bus_name.to_string()))
            },
            Err(err) => Err(err),
        }
    }

    /// Publish `service` at `object_path` on the connection `builder` creates.
    ///
    /// [`Self::start`] goes through here with a session bus builder; a
    /// peer-to-peer builder works the same way.
    pub async fn serve<'a>(
        builder: ConnectionBuilder<'a>,
        service: Arc<ClipboardService>,
        object_path: &'a str,
    ) -> Result<Self, ServiceError> {
        let path = ObjectPath::try_from(object_path)
            .map_err(|e| ServiceError::InvalidAddress(format!("{object_path}: {e}")))?;

        // Subscribe before serving so no event can slip past the forwarder.
        let events = service.subscribe();

        let connection = builder
            .serve_at(path.clone(), ClipboardBus::new(service.clone()))?
            .build()
            .await?;

        let iface_ref = connection
            .object_server()
            .interface::<_, ClipboardBus>(path)
            .await?;
        let forwarder = tokio::spawn(forward_events(events, iface_ref));

        Ok(Self {
            connection,
            service,
            bus_name: None,
            forwarder,
        })
    }

    pub fn service(&self) -> &Arc<ClipboardService> {
        &self.service
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The well-known name owned by this service, if it claimed one.
    pub fn bus_name(&self) -> Option<&str> {
        self.bus_name.as_deref()
    }

    /// Serve until `shutdown` resolves or the bus connection is lost.
    ///
    /// Returns an error only when the service cannot go on, i.e. the
    /// forwarder stopped because the transport failed.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<(), ServiceError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                let name = self.bus_name().unwrap_or("<unnamed>");
                log::info!("Shutting down clipboard service '{}'", name);
                self.forwarder.abort();
                Ok(())
            },
            result = &mut self.forwarder => match result {
                Ok(Ok(())) => Err(ServiceError::ForwarderStopped("event channel closed".into())),
                Ok(Err(err)) => Err(err),
                Err(err) => Err(ServiceError::ForwarderStopped(err.to_string())),
            },
        }
    }
}

impl Drop for ClipboardBusService {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Relay service events as signals, in the order they were published.
async fn forward_events(
    mut events: ClipboardEventReceiver,
    iface_ref: InterfaceRef<ClipboardBus>,
) -> Result<(), ServiceError> {
    while let Some(event) = events.recv().await {
        match emit(iface_ref.signal_emitter(), &event).await {
            Ok(()) => {},
            Err(zbus::Error::InputOutput(err)) => {
                log::error!("Lost bus connection while emitting signal: {err}");
                return Err(ServiceError::Bus(zbus::Error::InputOutput(err)));
            },
            Err(err) => {
                log::warn!("Failed to emit signal for object {}: {err}", event.object_id());
            },
        }
    }
    Ok(())
}

async fn emit(emitter: &SignalEmitter<'_>, event: &ClipboardEvent) -> zbus::Result<()> {
    match event {
        ClipboardEvent::ObjectAdded { object_id, name } => {
            ClipboardBus::object_added(emitter, object_id, name).await
        },
        ClipboardEvent::ObjectDeleted { object_id } => {
            ClipboardBus::object_deleted(emitter, object_id).await
        },
        ClipboardEvent::ObjectStateChanged { object_id, values } => {
            let values = state_to_wire(values)?;
            ClipboardBus::object_state_changed(emitter, object_id, values).await
        },
    }
}
