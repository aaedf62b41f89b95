use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Base URL of the device approval API. Records are only logged when unset.
    pub api_url: Option<String>,
    /// Webhook that receives the end-of-scan notification.
    pub notify_url: Option<String>,
    /// Cached OUI database (Wireshark `manuf` style CSV).
    pub vendor_db: Option<PathBuf>,
    /// Forces the probe onto a specific interface.
    pub interface: Option<String>,
    pub quiet: u8,
    /// Emit records as JSON instead of the table.
    pub json: bool,
}
