//! Network-level domain types: scan targets, hardware addresses and the
//! records a discovery pass produces.

pub mod mac;
pub mod range;
pub mod record;
pub mod target;
