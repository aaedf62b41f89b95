use async_trait::async_trait;
use lanwarden_common::sinks::{NotificationSink, PersistenceSink, UnapprovedDevice};
use lanwarden_common::{Result, info, warn};

/// Dry-run persistence: every device is logged and nothing is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPersistence;

#[async_trait]
impl PersistenceSink for LogPersistence {
    async fn add_unapproved_device(&self, device: &UnapprovedDevice) -> Result<()> {
        info!(
            "Unapproved device {} at {} ({})",
            device.mac_address, device.ip_address, device.vendor
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify_unapproved_devices_found(&self) -> Result<()> {
        warn!("Unapproved devices found on the network");
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn log_sinks_always_succeed() {
        let now = Utc::now();
        let device = UnapprovedDevice {
            mac_address: "08:00:27:11:22:33".to_string(),
            ip_address: "10.0.0.6".to_string(),
            description: None,
            vendor: "Dell".to_string(),
            first_seen: now,
            last_seen: now,
        };

        assert!(LogPersistence.add_unapproved_device(&device).await.is_ok());
        assert!(LogNotifier.notify_unapproved_devices_found().await.is_ok());
    }
}
