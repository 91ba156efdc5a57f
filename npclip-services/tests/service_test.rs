// SPDX-License-Identifier: LGPL-3.0-only
use npclip_core::ClipboardError;
use npclip_services::events::ClipboardEventReceiver;
use npclip_services::{ClipboardEvent, ClipboardService};
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;

fn drain(rx: &mut ClipboardEventReceiver) -> Vec<ClipboardEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    events
}

#[tokio::test]
async fn test_service_scenario() {
    let service = ClipboardService::default();

    service.add_object("o1", "Clip").await.unwrap();
    service
        .add_object_format("o1", "text/plain", b"hello".to_vec(), false)
        .await
        .unwrap();
    service.set_object_percent("o1", 50).await.unwrap();

    let summary = service.get_object("o1").await.unwrap();
    assert_eq!(summary.name, "Clip");
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.format_types, vec!["text/plain".to_string()]);

    let data = service.get_object_data("o1", "text/plain").await.unwrap();
    assert_eq!(data, b"hello".to_vec());

    service.delete_object("o1").await.unwrap();
    assert!(matches!(
        service.get_object("o1").await,
        Err(ClipboardError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_one_event_per_mutation_in_causal_order() {
    let service = ClipboardService::default();
    let mut rx = service.subscribe();

    service.add_object("o1", "Clip").await.unwrap();
    service
        .add_object_format("o1", "text/plain", b"hello".to_vec(), false)
        .await
        .unwrap();
    service.set_object_percent("o1", 50).await.unwrap();
    service.delete_object("o1").await.unwrap();

    let events = drain(&mut rx);
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        ClipboardEvent::ObjectAdded {
            object_id: "o1".into(),
            name: "Clip".into()
        }
    );

    match &events[1] {
        ClipboardEvent::ObjectStateChanged { object_id, values } => {
            assert_eq!(object_id, "o1");
            assert_eq!(values.percent, 0);
            assert_eq!(values.icon, "text-x-generic");
            assert_eq!(values.preview, "hello");
        },
        other => panic!("unexpected event {other:?}"),
    }
    match &events[2] {
        ClipboardEvent::ObjectStateChanged { values, .. } => {
            assert_eq!(values.percent, 50);
            assert_eq!(values.name, "Clip");
        },
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        events[3],
        ClipboardEvent::ObjectDeleted {
            object_id: "o1".into()
        }
    );
}

#[tokio::test]
async fn test_failed_calls_publish_nothing() {
    let service = ClipboardService::default();
    service.add_object("o1", "Clip").await.unwrap();
    let mut rx = service.subscribe();

    assert!(matches!(
        service.add_object("o1", "Again").await,
        Err(ClipboardError::DuplicateKey { .. })
    ));
    assert!(service
        .add_object_format("ghost", "text/plain", vec![], false)
        .await
        .is_err());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_late_subscriber_gets_no_history() {
    let service = ClipboardService::default();
    service.add_object("o1", "Clip").await.unwrap();

    let mut rx = service.subscribe();
    assert!(drain(&mut rx).is_empty());

    service.delete_object("o1").await.unwrap();
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutations_serialize() {
    for round in 0..50 {
        let service = Arc::new(ClipboardService::default());
        let id = format!("o{round}");
        service.add_object(&id, "Clip").await.unwrap();
        let mut rx = service.subscribe();

        let a = {
            let service = service.clone();
            let id = id.clone();
            tokio::spawn(async move {
                service
                    .add_object_format(&id, "text/plain", b"hello".to_vec(), false)
                    .await
            })
        };
        let b = {
            let service = service.clone();
            let id = id.clone();
            tokio::spawn(async move { service.set_object_percent(&id, 50).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        match events.last() {
            Some(ClipboardEvent::ObjectStateChanged { values, .. }) => {
                assert_eq!(values.percent, 50);
                assert_eq!(values.icon, "text-x-generic");
            },
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_events_without_subscribers_are_dropped() {
    let service = ClipboardService::default();
    service.add_object("o1", "Clip").await.unwrap();
    service.set_object_percent("o1", 150).await.unwrap();
    assert_eq!(service.get_object("o1").await.unwrap().percent, 100);
    assert_eq!(service.object_ids().await, vec!["o1".to_string()]);
}

#[tokio::test]
async fn test_burst_of_updates_loses_no_event() {
    let service = ClipboardService::default();
    let mut rx = service.subscribe();

    service.add_object("o1", "Clip").await.unwrap();
    for percent in 0..2_000 {
        service.set_object_percent("o1", percent % 101).await.unwrap();
    }
    service.delete_object("o1").await.unwrap();

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2_002);
    assert!(matches!(events[0], ClipboardEvent::ObjectAdded { .. }));
    for (i, event) in events[1..2_001].iter().enumerate() {
        match event {
            ClipboardEvent::ObjectStateChanged { values, .. } => {
                assert_eq!(i32::from(values.percent), i as i32 % 101);
            },
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert!(matches!(events[2_001], ClipboardEvent::ObjectDeleted { .. }));
}

#[tokio::test]
async fn test_slow_subscriber_reads_everything_later() {
    let service = Arc::new(ClipboardService::default());
    let mut rx = service.subscribe();

    let producer = {
        let service = service.clone();
        tokio::spawn(async move {
            for i in 0..500 {
                let id = format!("o{i}");
                service.add_object(&id, "Clip").await.unwrap();
                service.delete_object(&id).await.unwrap();
            }
        })
    };
    producer.await.unwrap();

    let mut seen = 0;
    while let Ok(event) = rx.try_recv() {
        let expected = format!("o{}", seen / 2);
        assert_eq!(event.object_id(), expected);
        seen += 1;
    }
    assert_eq!(seen, 1_000);
}
