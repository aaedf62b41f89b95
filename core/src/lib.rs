//! # lanwarden core
//!
//! The scan-and-classify pipeline.
//!
//! * [`scanner`]: ARP probing over a raw datalink channel.
//! * [`vendors`]: OUI vendor resolution with load/update fallback.
//! * [`discovery`]: the orchestrator that turns replies into records and
//!   feeds the sinks.
//! * [`sinks`]: HTTP and log-only adapters for persistence and notification.

pub mod discovery;
pub mod network;
pub mod scanner;
pub mod sinks;
pub mod vendors;
