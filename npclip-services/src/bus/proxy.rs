// SPDX-License-Identifier: LGPL-3.0-only
//! Client side of the clipboard interface.

use std::collections::HashMap;
use zbus::proxy;
use zbus::zvariant::OwnedValue;

use npclip_core::ObjectSummary;

use super::wire::summary_from_wire;
use crate::error::ServiceError;

/// Proxy for `org.laptop.Clipboard`.
///
/// `ClipboardProxy` (async) and `ClipboardProxyBlocking` are generated from
/// this trait.
#[proxy(
    interface = "org.laptop.Clipboard",
    default_service = "org.laptop.Clipboard",
    default_path = "/org/laptop/Clipboard"
)]
pub trait Clipboard {
    #[zbus(name = "add_object")]
    fn add_object(&self, object_id: &str, name: &str) -> zbus::Result<()>;

    #[zbus(name = "add_object_format")]
    fn add_object_format(
        &self,
        object_id: &str,
        format_type: &str,
        data: &[u8],
        on_disk: bool,
    ) -> zbus::Result<()>;

    #[zbus(name = "delete_object")]
    fn delete_object(&self, object_id: &str) -> zbus::Result<()>;

    #[zbus(name = "set_object_percent")]
    fn set_object_percent(&self, object_id: &str, percent: i32) -> zbus::Result<()>;

    #[zbus(name = "get_object")]
    fn get_object(&self, object_id: &str) -> zbus::Result<HashMap<String, OwnedValue>>;

    #[zbus(name = "get_object_data")]
    fn get_object_data(&self, object_id: &str, format_type: &str) -> zbus::Result<Vec<u8>>;

    #[zbus(signal)]
    #[zbus(name = "object_added")]
    fn object_added(&self, object_id: String, name: String) -> zbus::Result<()>;

    #[zbus(signal)]
    #[zbus(name = "object_deleted")]
    fn object_deleted(&self, object_id: String) -> zbus::Result<()>;

    #[zbus(signal)]
    #[zbus(name = "object_state_changed")]
    fn object_state_changed(
        &self,
        object_id: String,
        values: HashMap<String, OwnedValue>,
    ) -> zbus::Result<()>;
}

/// Fetch and decode an object summary.
pub async fn fetch_summary(
    proxy: &ClipboardProxy<'_>,
    object_id: &str,
) -> Result<ObjectSummary, ServiceError> {
    let map = proxy.get_object(object_id).await?;
    Ok(summary_from_wire(&map)?)
}

/// Remote error name carried by a failed call, if any.
pub fn fault_name(err: &zbus::Error) -> Option<&str> {
    match err {
        zbus::Error::MethodError(name, _, _) => Some(name.as_str()),
        _ => None,
    }
}
