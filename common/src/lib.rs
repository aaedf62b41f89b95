//! Shared building blocks for lanwarden.
//!
//! Holds the domain types that travel through a scan ([`network::target::Target`],
//! [`network::record::DiscoveryRecord`]), the MAC classifier, the error taxonomy and
//! the traits behind which the probe, the vendor database and the sinks live.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod report;
pub mod scanning;
pub mod sinks;
pub mod vendors;

pub use error::{Result, ScanError};

#[doc(hidden)]
pub use tracing;
