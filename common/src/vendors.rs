use pnet::util::MacAddr;

use crate::error::Result;

/// Read-only mapping from an OUI prefix to a manufacturer name.
pub trait VendorDatabase: Send + Sync {
    /// `Ok(None)` when the prefix is not registered.
    fn lookup(&self, mac: MacAddr) -> Result<Option<String>>;
}

/// Where a vendor database comes from.
///
/// `load` reads whatever was cached before; `update` rebuilds the database
/// from scratch and is only tried when `load` fails.
pub trait VendorSource {
    fn load(&self) -> Result<Box<dyn VendorDatabase>>;
    fn update(&self) -> Result<Box<dyn VendorDatabase>>;
}
