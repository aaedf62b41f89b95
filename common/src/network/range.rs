use std::collections::BTreeSet;
use std::net::Ipv4Addr;

/// Inclusive range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        end.checked_sub(start).map_or(0, |span| span as usize + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.start_addr <= addr && addr <= self.end_addr
    }
}

pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, String> {
    let network = pnet::ipnetwork::Ipv4Network::new(ip, prefix).map_err(|e| e.to_string())?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// The concrete set of addresses a target expands to.
///
/// Ranges are never expanded up front. Counting and iteration work on the
/// merged spans, so a /8 costs as much as a single address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpCollection {
    pub singles: BTreeSet<Ipv4Addr>,
    pub ranges: Vec<Ipv4Range>,
}

impl IpCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_single(&mut self, addr: Ipv4Addr) {
        self.singles.insert(addr);
    }

    pub fn add_range(&mut self, range: Ipv4Range) {
        self.ranges.push(range);
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.singles.contains(&addr) || self.ranges.iter().any(|range| range.contains(addr))
    }

    /// Every distinct address, in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> {
        self.spans()
            .into_iter()
            .flat_map(|(start, end)| (start..=end).map(Ipv4Addr::from))
    }

    pub fn first(&self) -> Option<Ipv4Addr> {
        self.spans().first().map(|&(start, _)| Ipv4Addr::from(start))
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.spans()
            .iter()
            .map(|&(start, end)| u64::from(end - start) + 1)
            .sum::<u64>() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.ranges.iter().all(Ipv4Range::is_empty)
    }

    /// Sorted, disjoint and non-adjacent inclusive spans covering the collection.
    fn spans(&self) -> Vec<(u32, u32)> {
        let mut bounds: Vec<(u32, u32)> = self
            .ranges
            .iter()
            .filter(|range| !range.is_empty())
            .map(|range| (u32::from(range.start_addr), u32::from(range.end_addr)))
            .chain(self.singles.iter().map(|&addr| (u32::from(addr), u32::from(addr))))
            .collect();
        bounds.sort_unstable();

        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(bounds.len());
        for (start, end) in bounds {
            match merged.last_mut() {
                Some(last) if u64::from(start) <= u64::from(last.1) + 1 => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }
        merged
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
