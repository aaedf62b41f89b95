use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lanwarden_common::sinks::{NotificationSink, PersistenceSink, UnapprovedDevice};
use lanwarden_common::{Result, ScanError};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ADD_UNAPPROVED_PATH: &str = "addUnapproved";
const UNAPPROVED_EVENT: &str = "unapproved_devices_found";
const UNAPPROVED_MESSAGE: &str = "Unapproved devices were found on the network";

fn build_client() -> anyhow::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to create HTTP client")
}

/// Stores devices through the approval API (`POST {base}/addUnapproved`).
pub struct HttpPersistence {
    client: Client,
    endpoint: String,
}

impl HttpPersistence {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let endpoint = format!("{}/{ADD_UNAPPROVED_PATH}", base_url.trim_end_matches('/'));
        Ok(Self {
            client: build_client()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PersistenceSink for HttpPersistence {
    async fn add_unapproved_device(&self, device: &UnapprovedDevice) -> Result<()> {
        let failed = |reason: String| ScanError::Persistence {
            mac: device.mac_address.clone(),
            reason,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(device)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("{} answered {status}", self.endpoint)));
        }

        debug!("stored {} via {}", device.mac_address, self.endpoint);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookEvent<'a> {
    event: &'a str,
    message: &'a str,
}

/// Posts a single `unapproved_devices_found` event to a webhook.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client()?,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn notify_unapproved_devices_found(&self) -> Result<()> {
        let event = WebhookEvent {
            event: UNAPPROVED_EVENT,
            message: UNAPPROVED_MESSAGE,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&event)
            .send()
            .await
            .map_err(|e| ScanError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Notification(format!(
                "{} answered {status}",
                self.url
            )));
        }
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
