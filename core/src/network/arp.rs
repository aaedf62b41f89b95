use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use lanwarden_common::network::record::RawResponse;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;

/// Builds a broadcast "who-has `dst_addr`" frame, padded to the Ethernet minimum.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];

    let mut eth = MutableEthernetPacket::new(&mut buffer[..])
        .context("failed to create mutable Ethernet packet")?;
    eth.set_source(src_mac);
    eth.set_destination(MacAddr::broadcast());
    eth.set_ethertype(EtherTypes::Arp);

    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Request);
    arp_packet.set_sender_hw_addr(src_mac);
    arp_packet.set_target_hw_addr(MacAddr::zero());
    arp_packet.set_sender_proto_addr(src_addr);
    arp_packet.set_target_proto_addr(dst_addr);

    Ok(Vec::from(buffer))
}

/// Extracts the sender of an ARP reply. Any other frame is an error.
pub fn parse_reply(frame: &[u8]) -> anyhow::Result<RawResponse> {
    let eth_frame = EthernetPacket::new(frame).context("truncated Ethernet frame")?;
    ensure!(
        eth_frame.get_ethertype() == EtherTypes::Arp,
        "not an ARP frame (ethertype {:#06x})",
        eth_frame.get_ethertype().0
    );

    let payload = eth_frame.payload();
    let arp_packet = ArpPacket::new(payload).with_context(|| {
        format!("truncated or invalid ARP packet (payload len {})", payload.len())
    })?;
    ensure!(
        arp_packet.get_operation() == ArpOperations::Reply,
        "ARP operation is not a reply"
    );

    Ok(RawResponse::new(
        arp_packet.get_sender_proto_addr(),
        arp_packet.get_sender_hw_addr(),
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
