use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use serde::{Serialize, Serializer};

use crate::network::mac;

/// One ARP reply as captured off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawResponse {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl RawResponse {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }
}

/// The normalized result for one host observed during a scan.
///
/// Built once per distinct MAC and never mutated afterwards; sinks receive it
/// by reference or take their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiscoveryRecord {
    #[serde(rename = "IP")]
    ip_address: Ipv4Addr,
    #[serde(rename = "MAC", serialize_with = "serialize_mac")]
    mac_address: MacAddr,
    #[serde(rename = "VENDOR")]
    vendor: String,
    #[serde(rename = "RANDOMIZED")]
    randomized: bool,
}

impl DiscoveryRecord {
    pub fn new(ip_address: Ipv4Addr, mac_address: MacAddr, vendor: String, randomized: bool) -> Self {
        Self {
            ip_address,
            mac_address,
            vendor,
            randomized,
        }
    }

    pub fn ip_address(&self) -> Ipv4Addr {
        self.ip_address
    }

    pub fn mac_address(&self) -> MacAddr {
        self.mac_address
    }

    /// Upper-case, colon-delimited MAC.
    pub fn mac_string(&self) -> String {
        mac::format_mac(self.mac_address)
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn is_randomized(&self) -> bool {
        self.randomized
    }
}

fn serialize_mac<S: Serializer>(mac: &MacAddr, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&mac::format_mac(*mac))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_upper_case_keys() {
        let record = DiscoveryRecord::new(
            Ipv4Addr::new(10, 0, 0, 6),
            MacAddr::new(0x08, 0x00, 0x27, 0x11, 0x22, 0x33),
            "Dell".to_string(),
            false,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "IP": "10.0.0.6",
                "MAC": "08:00:27:11:22:33",
                "VENDOR": "Dell",
                "RANDOMIZED": false,
            })
        );
    }
}
