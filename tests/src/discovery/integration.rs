use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use axum::http::StatusCode;
use lanwarden_common::ScanError;
use lanwarden_common::network::record::RawResponse;
use lanwarden_common::network::target::Target;
use lanwarden_common::scanning::Prober;
use lanwarden_core::discovery::ScanOrchestrator;
use lanwarden_core::sinks::{HttpPersistence, WebhookNotifier};
use lanwarden_core::vendors::{MacOuiSource, VendorResolver};
use pnet::util::MacAddr;

use super::api;
use super::stubs::{
    CapturingDisplay, CapturingNotifier, CapturingPersistence, Events, LanStub, MapDb,
    NoPrivileges,
};

const PHONE: MacAddr = MacAddr(0x02, 0xaa, 0xbb, 0xcc, 0xdd, 0xee);
const DELL: MacAddr = MacAddr(0x08, 0x00, 0x27, 0x11, 0x22, 0x33);
const PRINTER: MacAddr = MacAddr(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);

fn lan() -> Vec<RawResponse> {
    vec![
        RawResponse::new(Ipv4Addr::new(10, 0, 0, 6), DELL),
        RawResponse::new(Ipv4Addr::new(10, 0, 0, 5), PHONE),
        RawResponse::new(Ipv4Addr::new(10, 0, 0, 40), PRINTER),
    ]
}

fn resolver() -> VendorResolver {
    let mut vendors = HashMap::new();
    vendors.insert(DELL, "Dell".to_string());
    VendorResolver::with_database(Arc::new(MapDb(vendors)))
}

fn capturing(prober: Arc<dyn Prober>) -> (ScanOrchestrator, Events) {
    let events: Events = Arc::default();
    let orchestrator = ScanOrchestrator::new(
        prober,
        resolver(),
        Box::new(CapturingDisplay(events.clone())),
        Box::new(CapturingPersistence(events.clone())),
        Box::new(CapturingNotifier(events.clone())),
    );
    (orchestrator, events)
}

#[tokio::test]
async fn abbreviated_range_finds_the_hosts_inside_it() {
    let (orchestrator, events) = capturing(Arc::new(LanStub::new(lan())));
    let target: Target = "10.0.0.1-10".parse().unwrap();

    let report = orchestrator.run_scan(&target).await.unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "display [10.0.0.5, 10.0.0.6]",
            "persist 10.0.0.5 Random",
            "persist 10.0.0.6 Dell",
            "notify",
        ]
    );
}

#[tokio::test]
async fn unknown_vendors_are_reported_as_unknown() {
    let (orchestrator, _events) = capturing(Arc::new(LanStub::new(lan())));
    let target: Target = "10.0.0.40".parse().unwrap();

    let report = orchestrator.run_scan(&target).await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].vendor(), "Unknown");
    assert!(!report.records[0].is_randomized());
}

#[tokio::test]
async fn comma_separated_targets_are_merged() {
    let (orchestrator, _events) = capturing(Arc::new(LanStub::new(lan())));
    let target: Target = "10.0.0.5, 10.0.0.32/27".parse().unwrap();

    let report = orchestrator.run_scan(&target).await.unwrap();

    let ips: Vec<Ipv4Addr> = report.records.iter().map(|r| r.ip_address()).collect();
    assert_eq!(ips, vec![Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 0, 40)]);
}

#[tokio::test]
async fn malformed_target_never_reaches_the_probe() {
    let stub = Arc::new(LanStub::new(lan()));
    let (orchestrator, events) = capturing(stub.clone());
    let target = Target::Multi { targets: vec![] };

    let result = orchestrator.run_scan(&target).await;

    assert!(matches!(result, Err(ScanError::Configuration(_))));
    assert_eq!(stub.probes(), 0);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_privileges_abort_before_any_sink() {
    let (orchestrator, events) = capturing(Arc::new(NoPrivileges));
    let target: Target = "10.0.0.0/24".parse().unwrap();

    let err = orchestrator.run_scan(&target).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn devices_are_posted_to_the_approval_api_and_webhook() {
    let api = api::spawn(StatusCode::CREATED).await;
    let hook = api::spawn(StatusCode::OK).await;
    let events: Events = Arc::default();

    let orchestrator = ScanOrchestrator::new(
        Arc::new(LanStub::new(lan())),
        resolver(),
        Box::new(CapturingDisplay(events.clone())),
        Box::new(HttpPersistence::new(&api.base_url).unwrap()),
        Box::new(WebhookNotifier::new(&format!("{}/events", hook.base_url)).unwrap()),
    );
    let target: Target = "10.0.0.0/24".parse().unwrap();

    let report = orchestrator.run_scan(&target).await.unwrap();
    assert!(report.is_clean());

    let posted = api.requests.lock().unwrap().clone();
    assert_eq!(posted.len(), 3);
    assert!(posted.iter().all(|r| r.path == "/addUnapproved"));
    assert_eq!(posted[0].body["mac_address"], "02:AA:BB:CC:DD:EE");
    assert_eq!(posted[0].body["description"], "randomized MAC");
    assert_eq!(posted[1].body["vendor"], "Dell");
    assert!(posted[1].body["description"].is_null());
    assert_eq!(posted[0].body["first_seen"], posted[0].body["last_seen"]);

    let notified = hook.requests.lock().unwrap().clone();
    assert_eq!(notified.len(), 1);
    assert_eq!(notified[0].path, "/events");
    assert_eq!(notified[0].body["event"], "unapproved_devices_found");
}

#[tokio::test]
async fn rejected_devices_are_listed_in_the_report() {
    let api = api::spawn(StatusCode::SERVICE_UNAVAILABLE).await;
    let events: Events = Arc::default();

    let orchestrator = ScanOrchestrator::new(
        Arc::new(LanStub::new(lan())),
        resolver(),
        Box::new(CapturingDisplay(events.clone())),
        Box::new(HttpPersistence::new(&api.base_url).unwrap()),
        Box::new(CapturingNotifier(events.clone())),
    );
    let target: Target = "10.0.0.0/24".parse().unwrap();

    let report = orchestrator.run_scan(&target).await.unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.persistence_failures.len(), 3);
    assert_eq!(events.lock().unwrap().last().unwrap(), "notify");
}

#[test]
fn bundled_vendor_database_is_used_when_no_cache_exists() {
    let resolver = VendorResolver::new(&MacOuiSource::new(None));

    assert!(resolver.is_loaded());
    assert!(resolver.resolve("00:00:0C:12:34:56").contains("Cisco"));
    assert_eq!(resolver.resolve("02:00:00:00:00:01"), "Random");
}
