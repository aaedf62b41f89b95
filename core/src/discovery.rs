//! # Discovery pass
//!
//! Turns a target expression into classified records and hands them to the
//! display, persistence and notification collaborators.
//!
//! A pass either stops early on a fatal error (bad target, no privileges, no
//! usable channel) before any sink is touched, or runs to the end and returns
//! a [`ScanReport`] listing whatever the sinks rejected.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lanwarden_common::network::mac;
use lanwarden_common::network::range::IpCollection;
use lanwarden_common::network::record::{DiscoveryRecord, RawResponse};
use lanwarden_common::network::target::Target;
use lanwarden_common::report::{PersistenceFailure, ScanReport};
use lanwarden_common::scanning::Prober;
use lanwarden_common::sinks::{DisplaySink, NotificationSink, PersistenceSink, UnapprovedDevice};
use lanwarden_common::{Result, ScanError, error, info, success};

use crate::vendors::VendorResolver;

/// How long replies are awaited after the last request went out.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

pub struct ScanOrchestrator {
    prober: Arc<dyn Prober>,
    resolver: VendorResolver,
    display: Box<dyn DisplaySink>,
    persistence: Box<dyn PersistenceSink>,
    notifier: Box<dyn NotificationSink>,
}

impl ScanOrchestrator {
    pub fn new(
        prober: Arc<dyn Prober>,
        resolver: VendorResolver,
        display: Box<dyn DisplaySink>,
        persistence: Box<dyn PersistenceSink>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            prober,
            resolver,
            display,
            persistence,
            notifier,
        }
    }

    /// Runs one discovery pass against `target`.
    pub async fn run_scan(&self, target: &Target) -> Result<ScanReport> {
        let collection: IpCollection = target.to_collection()?;
        let responses: Vec<RawResponse> = self.probe(collection).await?;
        let scanned_at: DateTime<Utc> = Utc::now();

        let records: Vec<DiscoveryRecord> = self.classify(responses);
        self.display.display(&records);

        let persistence_failures = self.persist(&records, scanned_at).await;
        let notification_error = match records.is_empty() {
            true => None,
            false => self.notify().await,
        };

        Ok(ScanReport {
            records,
            persistence_failures,
            notification_error,
        })
    }

    async fn probe(&self, collection: IpCollection) -> Result<Vec<RawResponse>> {
        let prober = Arc::clone(&self.prober);
        tokio::task::spawn_blocking(move || prober.probe(&collection, PROBE_TIMEOUT))
            .await
            .map_err(|e| ScanError::Channel(format!("probe task failed: {e}")))?
    }

    /// One record per distinct MAC, ordered by IPv4 address.
    fn classify(&self, responses: Vec<RawResponse>) -> Vec<DiscoveryRecord> {
        let mut seen = HashSet::new();
        let mut records: Vec<DiscoveryRecord> = responses
            .into_iter()
            .filter(|response| seen.insert(response.mac))
            .map(|response| {
                DiscoveryRecord::new(
                    response.ip,
                    response.mac,
                    self.resolver.resolve_addr(response.mac),
                    mac::is_locally_administered(response.mac),
                )
            })
            .collect();

        records.sort_by_key(DiscoveryRecord::ip_address);
        records
    }

    async fn persist(
        &self,
        records: &[DiscoveryRecord],
        scanned_at: DateTime<Utc>,
    ) -> Vec<PersistenceFailure> {
        let mut failures = Vec::new();

        for record in records {
            let device = UnapprovedDevice::from_record(record, scanned_at);
            if let Err(e) = self.persistence.add_unapproved_device(&device).await {
                error!("{e}");
                failures.push(PersistenceFailure {
                    mac_address: device.mac_address,
                    reason: e.to_string(),
                });
            }
        }

        if failures.is_empty() && !records.is_empty() {
            success!("Stored {} unapproved device(s)", records.len());
        }
        failures
    }

    async fn notify(&self) -> Option<String> {
        match self.notifier.notify_unapproved_devices_found().await {
            Ok(()) => {
                info!("Notification sent");
                None
            }
            Err(e) => {
                error!("{e}");
                Some(e.to_string())
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
