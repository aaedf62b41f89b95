//! Hardware address parsing and classification.
//!
//! The second-least-significant bit of the first octet is the IEEE 802
//! universal/local bit. Operating systems that randomize their MAC for privacy
//! set it, so a set bit means the address says nothing about the manufacturer.

use pnet::util::MacAddr;

use crate::error::{Result, ScanError};

const LOCALLY_ADMINISTERED_BIT: u8 = 0b0000_0010;

/// Parses a colon- or hyphen-delimited MAC address (`aa:bb:cc:dd:ee:ff`,
/// `AA-BB-CC-DD-EE-FF`). Every octet must be exactly two hex digits and the
/// delimiters may not be mixed.
pub fn parse_mac(s: &str) -> Result<MacAddr> {
    let invalid = || ScanError::InvalidAddress(s.to_string());

    let delimiter: char = if s.contains(':') { ':' } else { '-' };
    if delimiter == ':' && s.contains('-') {
        return Err(invalid());
    }

    let octets: Vec<u8> = s
        .split(delimiter)
        .map(|part| match part.len() {
            2 => u8::from_str_radix(part, 16).ok(),
            _ => None,
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    match octets.as_slice() {
        &[a, b, c, d, e, f] => Ok(MacAddr::new(a, b, c, d, e, f)),
        _ => Err(invalid()),
    }
}

/// `true` when the U/L bit of the first octet is set.
pub fn is_locally_administered(mac: MacAddr) -> bool {
    mac.0 & LOCALLY_ADMINISTERED_BIT != 0
}

/// Decides whether `mac` is a randomized (locally administered) address.
pub fn is_randomized(mac: &str) -> Result<bool> {
    parse_mac(mac).map(is_locally_administered)
}

/// Canonical upper-case, colon-delimited rendering used in records and output.
pub fn format_mac(mac: MacAddr) -> String {
    mac.to_string().to_uppercase()
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
    fn classifies_reference_addresses() {
        assert!(is_randomized("02:00:00:00:00:01").unwrap());
        assert!(!is_randomized("00:11:22:33:44:55").unwrap());
    }

    #[test]
    fn only_the_universal_local_bit_matters() {
        for first in 0u8..=255 {
            let mac = format!("{first:02x}:00:00:00:00:00");
            assert_eq!(
                is_randomized(&mac).unwrap(),
                first & 0x02 != 0,
                "wrong classification for first octet {first:#04x}"
            );
        }
    }

    #[test]
    fn accepts_hyphens_and_mixed_case() {
        assert!(is_randomized("DA-a0-00-11-22-33").unwrap());
        assert_eq!(
            parse_mac("08-00-27-11-22-33").unwrap(),
            MacAddr::new(0x08, 0x00, 0x27, 0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        let bad = [
            "",
            "02:00:00:00:00",
            "02:00:00:00:00:01:02",
            "2:00:00:00:00:01",
            "zz:00:00:00:00:01",
            "02:00-00:00:00:01",
            "020000000001",
            "02:00:00:00:00:001",
        ];
        for input in bad {
            match is_randomized(input) {
                Err(ScanError::InvalidAddress(reported)) => assert_eq!(reported, input),
                other => panic!("expected InvalidAddress for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn formats_upper_case() {
        let mac = MacAddr::new(0x02, 0xaa, 0xbb, 0xcc, 0xdd, 0xee);
        assert_eq!(format_mac(mac), "02:AA:BB:CC:DD:EE");
    }
}
