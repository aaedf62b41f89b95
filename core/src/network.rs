//! Link-layer plumbing used by the ARP probe.

pub mod arp;
pub mod channel;
pub mod interface;
