//! Picks the interface an ARP probe goes out on.

use std::net::Ipv4Addr;

use lanwarden_common::network::range::IpCollection;
use lanwarden_common::{Result, ScanError};
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    NoIpv4Address,
}

/// An interface that can carry ARP, plus the addresses requests are sent from.
#[derive(Debug, Clone)]
pub struct ProbeInterface {
    pub interface: NetworkInterface,
    pub src_mac: MacAddr,
    pub src_addr: Ipv4Addr,
}

/// Chooses the interface for `targets`.
///
/// An explicitly requested interface wins. Otherwise the first viable interface
/// whose IPv4 network contains the first target is used, then the first one
/// carrying a private IPv4 network.
pub fn select(
    interfaces: Vec<NetworkInterface>,
    targets: &IpCollection,
    requested: Option<&str>,
) -> Result<ProbeInterface> {
    let first_target: Option<Ipv4Addr> = targets.first();

    if let Some(name) = requested {
        let interface = interfaces
            .into_iter()
            .find(|intf| intf.name == name)
            .ok_or_else(|| ScanError::Configuration(format!("no interface named '{name}'")))?;
        is_viable(&interface).map_err(|reason| {
            ScanError::Configuration(format!("interface {name} cannot carry ARP: {reason:?}"))
        })?;
        return to_probe_interface(interface, first_target);
    }

    let viable: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|intf| is_viable(intf).is_ok())
        .collect();

    let by_subnet = first_target.and_then(|target| {
        viable
            .iter()
            .position(|intf| ipv4_networks(intf).any(|net| net.contains(target)))
    });
    let by_private = || {
        viable
            .iter()
            .position(|intf| ipv4_networks(intf).any(|net| net.ip().is_private()))
    };

    match by_subnet.or_else(by_private) {
        Some(idx) => to_probe_interface(viable[idx].clone(), first_target),
        None => Err(ScanError::Configuration(
            "no interface available for ARP discovery".to_string(),
        )),
    }
}

fn is_viable(interface: &NetworkInterface) -> std::result::Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if ipv4_networks(interface).next().is_none() {
        return Err(ViabilityError::NoIpv4Address);
    }
    Ok(())
}

fn ipv4_networks(interface: &NetworkInterface) -> impl Iterator<Item = Ipv4Network> + '_ {
    interface.ips.iter().filter_map(|net| match net {
        IpNetwork::V4(v4) => Some(*v4),
        IpNetwork::V6(_) => None,
    })
}

fn to_probe_interface(
    interface: NetworkInterface,
    first_target: Option<Ipv4Addr>,
) -> Result<ProbeInterface> {
    let src_mac = interface.mac.ok_or_else(|| {
        ScanError::Configuration(format!("interface {} has no MAC address", interface.name))
    })?;

    let in_subnet = first_target.and_then(|target| {
        ipv4_networks(&interface)
            .find(|net| net.contains(target))
            .map(|net| net.ip())
    });
    let src_addr = in_subnet
        .or_else(|| ipv4_networks(&interface).next().map(|net| net.ip()))
        .ok_or_else(|| {
            ScanError::Configuration(format!("interface {} has no IPv4 address", interface.name))
        })?;

    Ok(ProbeInterface {
        interface,
        src_mac,
        src_addr,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
