//! MAC → vendor resolution on top of the `mac_oui` database.

use std::path::PathBuf;
use std::sync::Arc;

use lanwarden_common::network::mac;
use lanwarden_common::vendors::{VendorDatabase, VendorSource};
use lanwarden_common::{Result, ScanError, success, warn};
use mac_oui::Oui;
use pnet::util::MacAddr;

/// Vendor reported for locally administered addresses.
pub const RANDOM_VENDOR: &str = "Random";
/// Vendor reported when nothing better is known.
pub const UNKNOWN_VENDOR: &str = "Unknown";

pub struct MacOuiDatabase(Oui);

impl VendorDatabase for MacOuiDatabase {
    fn lookup(&self, mac: MacAddr) -> Result<Option<String>> {
        match self.0.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Ok(Some(entry.company_name.clone())),
            Ok(None) => Ok(None),
            Err(e) => Err(ScanError::VendorLookup(e.to_string())),
        }
    }
}

/// OUI data from a cached Wireshark-style CSV, rebuilt from the database
/// bundled with `mac_oui` when the cache is missing or unreadable.
#[derive(Debug, Clone, Default)]
pub struct MacOuiSource {
    cache: Option<PathBuf>,
}

impl MacOuiSource {
    pub fn new(cache: Option<PathBuf>) -> Self {
        Self { cache }
    }
}

impl VendorSource for MacOuiSource {
    fn load(&self) -> Result<Box<dyn VendorDatabase>> {
        let path = self
            .cache
            .as_ref()
            .ok_or_else(|| ScanError::VendorLookup("no vendor cache configured".to_string()))?;
        let path_str: &str = path.to_str().ok_or_else(|| {
            ScanError::VendorLookup(format!("non UTF-8 cache path {}", path.display()))
        })?;

        let oui = Oui::from_csv_file(path_str)
            .map_err(|e| ScanError::VendorLookup(format!("{}: {e}", path.display())))?;
        Ok(Box::new(MacOuiDatabase(oui)))
    }

    fn update(&self) -> Result<Box<dyn VendorDatabase>> {
        let oui = Oui::default().map_err(|e| ScanError::VendorLookup(e.to_string()))?;
        Ok(Box::new(MacOuiDatabase(oui)))
    }
}

/// Resolves hardware addresses to vendor names.
///
/// The database is fixed at construction and shared between clones.
#[derive(Clone)]
pub struct VendorResolver {
    db: Option<Arc<dyn VendorDatabase>>,
}

impl VendorResolver {
    /// Loads the database from `source`, rebuilding it once if loading fails.
    /// When both fail the resolver still works but knows no vendors.
    pub fn new(source: &dyn VendorSource) -> Self {
        let db = match source.load() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("Vendor database unavailable ({e}), rebuilding");
                match source.update() {
                    Ok(db) => Some(db),
                    Err(e) => {
                        warn!("Vendor database rebuild failed ({e}); vendors will be {UNKNOWN_VENDOR}");
                        None
                    }
                }
            }
        };

        if db.is_some() {
            success!("Vendor database ready");
        }

        Self {
            db: db.map(Arc::from),
        }
    }

    pub fn with_database(db: Arc<dyn VendorDatabase>) -> Self {
        Self { db: Some(db) }
    }

    pub fn is_loaded(&self) -> bool {
        self.db.is_some()
    }

    /// Vendor for a textual MAC. Malformed input resolves to `"Unknown"`.
    pub fn resolve(&self, mac: &str) -> String {
        match mac::parse_mac(mac) {
            Ok(addr) => self.resolve_addr(addr),
            Err(e) => {
                warn!("{e}");
                UNKNOWN_VENDOR.to_string()
            }
        }
    }

    pub fn resolve_addr(&self, mac: MacAddr) -> String {
        if mac::is_locally_administered(mac) {
            return RANDOM_VENDOR.to_string();
        }

        let Some(db) = &self.db else {
            return UNKNOWN_VENDOR.to_string();
        };

        match db.lookup(mac) {
            Ok(Some(vendor)) => vendor,
            Ok(None) => UNKNOWN_VENDOR.to_string(),
            Err(e) => {
                warn!("{e}");
                UNKNOWN_VENDOR.to_string()
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
