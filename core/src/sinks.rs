//! Adapters for the persistence and notification collaborators.
//!
//! The HTTP adapters talk to the device-approval API and a webhook; the log
//! adapters stand in for them when no endpoint is configured.

pub mod http;
pub mod log;

pub use http::{HttpPersistence, WebhookNotifier};
pub use log::{LogNotifier, LogPersistence};
