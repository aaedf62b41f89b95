//! # Scan Target Model
//!
//! Defines the possible inputs for a discovery pass.
//!
//! A target can be:
//! * A single IPv4 address (host).
//! * An IPv4 range (e.g., `192.168.1.1-100`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * A comma-separated list of the above.
//!
//! Anything that does not parse, or that expands to zero addresses, is a
//! configuration error. A malformed target is never scanned as "nothing".

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::{Result, ScanError};
use crate::network::range::{self, IpCollection, Ipv4Range};
use crate::success;

/// Represents a distinct target to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Probe a single specific host.
    Host { target_addr: Ipv4Addr },
    /// Probe a range of IPv4 addresses.
    Range { ipv4_range: Ipv4Range },
    /// Holds a list of different targets.
    Multi { targets: Vec<Target> },
}

impl FromStr for Target {
    type Err = ScanError;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Host**: Single IPv4 address (e.g., "192.168.1.5").
    /// * **Range**: "Start-End" (e.g., "192.168.1.1-50", "192.168.1.1-192.168.1.50").
    /// * **CIDR**: "Network/Prefix" (e.g., "192.168.1.0/24").
    /// * **List**: any of the above separated by commas.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains(',') {
            return parse_commas(s);
        }

        parse_single(s).map_err(ScanError::Configuration)
    }
}

impl Target {
    /// Expands the target into the concrete addresses it names.
    pub fn to_collection(&self) -> Result<IpCollection> {
        let mut collection = IpCollection::new();
        resolve_target(self, &mut collection);

        if collection.is_empty() {
            return Err(ScanError::Configuration(format!(
                "target {self:?} does not contain any address"
            )));
        }

        let len: usize = collection.len();
        let unit: &str = if len == 1 { "IP address has been" } else { "IP addresses have been" };
        success!("{len} {unit} parsed successfully");

        Ok(collection)
    }
}

fn resolve_target(target: &Target, collection: &mut IpCollection) {
    match target {
        Target::Host { target_addr } => collection.add_single(*target_addr),
        Target::Range { ipv4_range } => collection.add_range(*ipv4_range),
        Target::Multi { targets } => {
            for target in targets {
                resolve_target(target, collection);
            }
        }
    }
}

/// Parses a comma-separated list of targets (e.g., "192.168.1.5, 10.0.0.1-50").
fn parse_commas(s: &str) -> Result<Target> {
    let mut targets = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let target = parse_single(part).map_err(|e| {
            ScanError::Configuration(format!("failed to parse target '{part}': {e}"))
        })?;
        targets.push(target);
    }

    if targets.is_empty() {
        return Err(ScanError::Configuration(format!("invalid target: '{s}'")));
    }

    Ok(Target::Multi { targets })
}

fn parse_single(s: &str) -> std::result::Result<Target, String> {
    if let Some(target) = parse_host(s)? {
        return Ok(target);
    }

    if let Some(target) = parse_ip_range(s)? {
        return Ok(target);
    }

    if let Some(target) = parse_cidr_range(s)? {
        return Ok(target);
    }

    Err(format!("invalid target: '{s}'"))
}

/// Parses a single IP address. IPv6 parses, but is refused: discovery is ARP only.
fn parse_host(s: &str) -> std::result::Result<Option<Target>, String> {
    match s.parse::<IpAddr>() {
        Ok(IpAddr::V4(target_addr)) => Ok(Some(Target::Host { target_addr })),
        Ok(IpAddr::V6(addr)) => Err(format!("IPv6 targets are not supported: {addr}")),
        Err(_) => Ok(None),
    }
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> std::result::Result<Option<Target>, String> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid start IP in range '{start_str}': {e}"))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr, s)?;

    if end_addr < start_addr {
        return Err(format!("Range end {end_addr} comes before start {start_addr}"));
    }

    let ipv4_range = Ipv4Range::new(start_addr, end_addr);
    Ok(Some(Target::Range { ipv4_range }))
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(
    end_str: &str,
    start_addr: &Ipv4Addr,
    original_s: &str,
) -> std::result::Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    if end_str.is_empty() {
        return Err(format!("End range cannot be empty: {original_s}"));
    }

    let mut end_octets = start_addr.octets();
    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid end range '{end_str}': {e}"))?;

    if partial_octets.len() > 4 {
        return Err(format!("End range has too many octets: {end_str}"));
    }

    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> std::result::Result<Option<Target>, String> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

    let ipv4_range = range::cidr_range(ipv4_addr, prefix)?;

    Ok(Some(Target::Range { ipv4_range }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
