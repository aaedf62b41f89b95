use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

/// Everything that can go wrong during a discovery pass.
///
/// `Configuration`, `Permission` and `Channel` stop a scan before any sink is
/// touched. The remaining kinds are scoped to a single record (or to the final
/// notification) and are reported without aborting the batch.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("insufficient privileges: {0}")]
    Permission(String),

    #[error("invalid hardware address '{0}'")]
    InvalidAddress(String),

    #[error("vendor lookup failed: {0}")]
    VendorLookup(String),

    #[error("failed to persist {mac}: {reason}")]
    Persistence { mac: String, reason: String },

    #[error("notification failed: {0}")]
    Notification(String),

    #[error("datalink channel error: {0}")]
    Channel(String),
}

impl ScanError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScanError::Configuration(_) | ScanError::Permission(_) | ScanError::Channel(_)
        )
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
