use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use lanwarden_common::ScanError;
use lanwarden_common::sinks::{NotificationSink, PersistenceSink, UnapprovedDevice};
use lanwarden_core::sinks::{HttpPersistence, WebhookNotifier};

use super::api;

fn device() -> UnapprovedDevice {
    let seen_at = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    UnapprovedDevice {
        mac_address: "02:AA:BB:CC:DD:EE".to_string(),
        ip_address: "10.0.0.5".to_string(),
        description: Some("randomized MAC".to_string()),
        vendor: "Random".to_string(),
        first_seen: seen_at,
        last_seen: seen_at,
    }
}

#[tokio::test]
async fn posts_device_to_add_unapproved() {
    let api = api::spawn(StatusCode::CREATED).await;
    let sink = HttpPersistence::new(&format!("{}/", api.base_url)).unwrap();

    sink.add_unapproved_device(&device()).await.unwrap();

    let posted = api.requests.lock().unwrap().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].path, "/addUnapproved");
    let body = &posted[0].body;
    assert_eq!(body["mac_address"], "02:AA:BB:CC:DD:EE");
    assert_eq!(body["ip_address"], "10.0.0.5");
    assert_eq!(body["vendor"], "Random");
    assert_eq!(body["description"], "randomized MAC");
    assert_eq!(body["first_seen"], "2026-10-18T12:00:00Z");
}

#[tokio::test]
async fn non_success_status_is_a_persistence_error() {
    let api = api::spawn(StatusCode::INTERNAL_SERVER_ERROR).await;
    let sink = HttpPersistence::new(&api.base_url).unwrap();

    match sink.add_unapproved_device(&device()).await {
        Err(ScanError::Persistence { mac, reason }) => {
            assert_eq!(mac, "02:AA:BB:CC:DD:EE");
            assert!(reason.contains("500"));
        }
        other => panic!("expected a persistence error, got {other:?}"),
    }
    assert_eq!(api.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn webhook_receives_the_event() {
    let hook = api::spawn(StatusCode::OK).await;
    let notifier = WebhookNotifier::new(&format!("{}/hook", hook.base_url)).unwrap();

    notifier.notify_unapproved_devices_found().await.unwrap();

    let notified = hook.requests.lock().unwrap().clone();
    assert_eq!(notified.len(), 1);
    assert_eq!(notified[0].path, "/hook");
    assert_eq!(notified[0].body["event"], "unapproved_devices_found");
    assert!(notified[0].body["message"].is_string());
}

#[tokio::test]
async fn webhook_failure_is_a_notification_error() {
    let hook = api::spawn(StatusCode::NOT_FOUND).await;
    let notifier = WebhookNotifier::new(&hook.base_url).unwrap();

    let result = notifier.notify_unapproved_devices_found().await;
    assert!(matches!(result, Err(ScanError::Notification(_))));
}

#[tokio::test]
async fn unreachable_api_is_a_persistence_error() {
    let sink = HttpPersistence::new("http://127.0.0.1:1").unwrap();

    let result = sink.add_unapproved_device(&device()).await;
    assert!(matches!(result, Err(ScanError::Persistence { .. })));
}
