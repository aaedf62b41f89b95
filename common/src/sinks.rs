//! Collaborators a scan hands its results to.
//!
//! The orchestrator only knows these traits. Concrete adapters (HTTP API,
//! webhook, terminal) live in `lanwarden-core` and `lanwarden-cli`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::network::record::DiscoveryRecord;

const RANDOMIZED_DESCRIPTION: &str = "randomized MAC";

/// Payload for the approval workflow's "add unapproved device" operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnapprovedDevice {
    pub mac_address: String,
    pub ip_address: String,
    pub description: Option<String>,
    pub vendor: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl UnapprovedDevice {
    /// A freshly discovered device has been seen exactly once, at `seen_at`.
    pub fn from_record(record: &DiscoveryRecord, seen_at: DateTime<Utc>) -> Self {
        Self {
            mac_address: record.mac_string(),
            ip_address: record.ip_address().to_string(),
            description: record
                .is_randomized()
                .then(|| RANDOMIZED_DESCRIPTION.to_string()),
            vendor: record.vendor().to_string(),
            first_seen: seen_at,
            last_seen: seen_at,
        }
    }
}

#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn add_unapproved_device(&self, device: &UnapprovedDevice) -> Result<()>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_unapproved_devices_found(&self) -> Result<()>;
}

/// Renders the records of one scan for a human. Never influences control flow.
pub trait DisplaySink: Send + Sync {
    fn display(&self, records: &[DiscoveryRecord]);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
