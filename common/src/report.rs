use crate::network::record::DiscoveryRecord;

const HEADERS: [&str; 4] = ["IP", "MAC Address", "Vendor", "Randomized"];
const COLUMN_GAP: usize = 3;

/// A record the persistence sink refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceFailure {
    pub mac_address: String,
    pub reason: String,
}

/// Outcome of one completed scan.
///
/// A report only exists when the scan ran to the end; record-scoped failures
/// are listed here instead of aborting the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub records: Vec<DiscoveryRecord>,
    pub persistence_failures: Vec<PersistenceFailure>,
    pub notification_error: Option<String>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.persistence_failures.is_empty() && self.notification_error.is_none()
    }
}

/// Plain-text table with one row per record, in the order given.
pub fn render_table(records: &[DiscoveryRecord]) -> Vec<String> {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.ip_address().to_string(),
                record.mac_string(),
                record.vendor().to_string(),
                record.is_randomized().to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 4] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| -> String {
        let mut line = String::new();
        for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if idx + 1 == cells.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$}", width = width + COLUMN_GAP));
            }
        }
        line
    };

    let total_width: usize = widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(HEADERS));
    lines.push("-".repeat(total_width));
    for row in &rows {
        lines.push(format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    lines
}

pub fn render_json(records: &[DiscoveryRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
