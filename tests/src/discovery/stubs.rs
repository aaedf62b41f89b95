use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lanwarden_common::network::range::IpCollection;
use lanwarden_common::network::record::{DiscoveryRecord, RawResponse};
use lanwarden_common::scanning::Prober;
use lanwarden_common::sinks::{DisplaySink, NotificationSink, PersistenceSink, UnapprovedDevice};
use lanwarden_common::vendors::VendorDatabase;
use lanwarden_common::{Result, ScanError};
use pnet::util::MacAddr;

pub type Events = Arc<Mutex<Vec<String>>>;

/// Answers for every target it knows about, ignoring the rest.
pub struct LanStub {
    hosts: Vec<RawResponse>,
    probes: Mutex<usize>,
}

impl LanStub {
    pub fn new(hosts: Vec<RawResponse>) -> Self {
        Self {
            hosts,
            probes: Mutex::new(0),
        }
    }

    pub fn probes(&self) -> usize {
        *self.probes.lock().unwrap()
    }
}

impl Prober for LanStub {
    fn probe(&self, targets: &IpCollection, _timeout: Duration) -> Result<Vec<RawResponse>> {
        *self.probes.lock().unwrap() += 1;
        Ok(self
            .hosts
            .iter()
            .filter(|host| targets.contains(host.ip))
            .copied()
            .collect())
    }
}

pub struct NoPrivileges;

impl Prober for NoPrivileges {
    fn probe(&self, _targets: &IpCollection, _timeout: Duration) -> Result<Vec<RawResponse>> {
        Err(ScanError::Permission("raw sockets need root".to_string()))
    }
}

pub struct MapDb(pub HashMap<MacAddr, String>);

impl VendorDatabase for MapDb {
    fn lookup(&self, mac: MacAddr) -> Result<Option<String>> {
        Ok(self.0.get(&mac).cloned())
    }
}

pub struct CapturingDisplay(pub Events);

impl DisplaySink for CapturingDisplay {
    fn display(&self, records: &[DiscoveryRecord]) {
        let ips: Vec<String> = records.iter().map(|r| r.ip_address().to_string()).collect();
        self.0.lock().unwrap().push(format!("display [{}]", ips.join(", ")));
    }
}

pub struct CapturingPersistence(pub Events);

#[async_trait]
impl PersistenceSink for CapturingPersistence {
    async fn add_unapproved_device(&self, device: &UnapprovedDevice) -> Result<()> {
        self.0
            .lock()
            .unwrap()
            .push(format!("persist {} {}", device.ip_address, device.vendor));
        Ok(())
    }
}

pub struct CapturingNotifier(pub Events);

#[async_trait]
impl NotificationSink for CapturingNotifier {
    async fn notify_unapproved_devices_found(&self) -> Result<()> {
        self.0.lock().unwrap().push("notify".to_string());
        Ok(())
    }
}
