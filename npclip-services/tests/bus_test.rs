// SPDX-License-Identifier: LGPL-3.0-only
//! These tests need a running session bus and are ignored by default.
//! Run them with `cargo test -- --ignored`.

use futures::StreamExt;
use npclip_services::bus::wire::state_from_wire;
use npclip_services::bus::{fault_name, fetch_summary, ClipboardProxy};
use npclip_services::{ClipboardBusService, ClipboardService, ServiceError};
use std::sync::Arc;
use zbus::Connection;

const OBJECT_PATH: &str = "/org/laptop/Clipboard";

fn test_bus_name(tag: &str) -> String {
    format!("org.laptop.ClipboardTest.{}_p{}", tag, std::process::id())
}

async fn proxy<'a>(connection: &Connection, bus_name: &'a str) -> ClipboardProxy<'a> {
    ClipboardProxy::builder(connection)
        .destination(bus_name)
        .unwrap()
        .path(OBJECT_PATH)
        .unwrap()
        .build()
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_remote_calls_and_faults() {
    let bus_name = test_bus_name("calls");
    let service = Arc::new(ClipboardService::default());
    let _bus = ClipboardBusService::start(service, &bus_name, OBJECT_PATH)
        .await
        .unwrap();

    let connection = Connection::session().await.unwrap();
    let clipboard = proxy(&connection, &bus_name).await;
    let mut added = clipboard.receive_object_added().await.unwrap();
    let mut changed = clipboard.receive_object_state_changed().await.unwrap();
    let mut deleted = clipboard.receive_object_deleted().await.unwrap();

    clipboard.add_object("o1", "Clip").await.unwrap();
    clipboard
        .add_object_format("o1", "text/plain", b"hello", false)
        .await
        .unwrap();
    clipboard.set_object_percent("o1", 50).await.unwrap();

    let summary = fetch_summary(&clipboard, "o1").await.unwrap();
    assert_eq!(summary.name, "Clip");
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.format_types, vec!["text/plain".to_string()]);
    assert_eq!(
        clipboard.get_object_data("o1", "text/plain").await.unwrap(),
        b"hello".to_vec()
    );

    let err = clipboard.get_object_data("o1", "image/png").await.unwrap_err();
    assert_eq!(fault_name(&err), Some("org.laptop.Clipboard.Error.FormatNotFound"));
    let err = clipboard.add_object("o1", "Again").await.unwrap_err();
    assert_eq!(fault_name(&err), Some("org.laptop.Clipboard.Error.DuplicateKey"));

    clipboard.delete_object("o1").await.unwrap();
    let err = clipboard.get_object("o1").await.unwrap_err();
    assert_eq!(fault_name(&err), Some("org.laptop.Clipboard.Error.NotFound"));

    let signal = added.next().await.unwrap();
    let args = signal.args().unwrap();
    assert_eq!(args.object_id, "o1");
    assert_eq!(args.name, "Clip");

    let first = changed.next().await.unwrap();
    let second = changed.next().await.unwrap();
    assert_eq!(first.args().unwrap().object_id, "o1");
    let values = state_from_wire(&second.args().unwrap().values).unwrap();
    assert_eq!(values.percent, 50);

    let signal = deleted.next().await.unwrap();
    assert_eq!(signal.args().unwrap().object_id, "o1");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore]
async fn test_second_instance_fails_fast() {
    let bus_name = test_bus_name("single");
    let first_service = Arc::new(ClipboardService::default());
    let first = ClipboardBusService::start(first_service.clone(), &bus_name, OBJECT_PATH)
        .await
        .unwrap();
    assert_eq!(first.bus_name(), Some(bus_name.as_str()));

    let other = Arc::new(ClipboardService::default());
    let second = ClipboardBusService::start(other, &bus_name, OBJECT_PATH).await;
    assert!(matches!(second, Err(ServiceError::AlreadyRunning(name)) if name == bus_name));

    // The first instance keeps the name and still answers calls.
    let connection = Connection::session().await.unwrap();
    let clipboard = proxy(&connection, &bus_name).await;
    clipboard.add_object("o1", "Clip").await.unwrap();
    assert!(first_service.get_object("o1").await.is_ok());
}
