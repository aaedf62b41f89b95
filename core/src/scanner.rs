//! ARP probing of an IPv4 target set.
//!
//! One who-has request goes out per target address, then replies are read off
//! the same Ethernet channel until a single deadline passes. Hosts that stay
//! silent are simply absent from the result; nothing is retried.
//!
//! Opening the channel requires raw socket privileges (root or `CAP_NET_RAW`).

use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use lanwarden_common::network::range::IpCollection;
use lanwarden_common::network::record::RawResponse;
use lanwarden_common::scanning::Prober;
use lanwarden_common::{Result, ScanError, info, success, warn};
use pnet::datalink;
use pnet::util::MacAddr;
use tracing::debug;

use crate::network::arp;
use crate::network::channel::{self, EthernetHandle};
use crate::network::interface::{self, ProbeInterface};

/// Probes targets with ARP on a locally attached segment.
#[derive(Debug, Clone, Default)]
pub struct ArpProbe {
    interface: Option<String>,
}

impl ArpProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always send on `name` instead of picking an interface per scan.
    pub fn on_interface(name: impl Into<String>) -> Self {
        Self {
            interface: Some(name.into()),
        }
    }
}

impl Prober for ArpProbe {
    fn probe(&self, targets: &IpCollection, timeout: Duration) -> Result<Vec<RawResponse>> {
        let ProbeInterface {
            interface,
            src_mac,
            src_addr,
        } = interface::select(datalink::interfaces(), targets, self.interface.as_deref())?;

        info!(
            "Probing {} address(es) on {} ({src_addr})",
            targets.len(),
            interface.name
        );

        let mut handle: EthernetHandle = channel::open(&interface)?;
        run_probe(&mut handle, src_mac, src_addr, targets, timeout)
    }
}

/// Sends the requests and gathers replies over an already open channel.
pub(crate) fn run_probe(
    handle: &mut EthernetHandle,
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    targets: &IpCollection,
    timeout: Duration,
) -> Result<Vec<RawResponse>> {
    let sent: usize = send_requests(handle, src_mac, src_addr, targets);
    debug!("sent {sent} ARP request(s)");

    let replies: Vec<RawResponse> = collect_replies(handle, targets, timeout)?;
    success!("{} host(s) answered", replies.len());
    Ok(replies)
}

fn send_requests(
    handle: &mut EthernetHandle,
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    targets: &IpCollection,
) -> usize {
    let mut sent: usize = 0;

    for dst_addr in targets.addresses() {
        let frame: Vec<u8> = match arp::create_request(src_mac, src_addr, dst_addr) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping {dst_addr}: {e}");
                continue;
            }
        };

        match handle.tx.send_to(&frame, None) {
            Some(Ok(())) => sent += 1,
            Some(Err(e)) => warn!("Failed to send ARP request to {dst_addr}: {e}"),
            None => warn!("Failed to send ARP request to {dst_addr}: send buffer unavailable"),
        }
    }

    sent
}

fn collect_replies(
    handle: &mut EthernetHandle,
    targets: &IpCollection,
    timeout: Duration,
) -> Result<Vec<RawResponse>> {
    let deadline: Instant = Instant::now() + timeout;
    let mut by_mac: HashMap<MacAddr, RawResponse> = HashMap::new();

    while Instant::now() < deadline {
        let frame: &[u8] = match handle.rx.next() {
            Ok(frame) => frame,
            Err(e) if is_transient(&e) => continue,
            Err(e) => return Err(ScanError::Channel(format!("reading ARP replies: {e}"))),
        };

        let reply: RawResponse = match arp::parse_reply(frame) {
            Ok(reply) => reply,
            Err(_) => continue,
        };

        if !targets.contains(reply.ip) {
            debug!("ignoring reply from {} outside the target set", reply.ip);
            continue;
        }

        by_mac.entry(reply.mac).or_insert(reply);
    }

    let mut replies: Vec<RawResponse> = by_mac.into_values().collect();
    replies.sort_by_key(|reply| reply.ip);
    Ok(replies)
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
