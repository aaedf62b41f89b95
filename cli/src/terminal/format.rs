//! How discovery records look on the terminal.

use colored::*;
use lanwarden_common::error;
use lanwarden_common::network::record::DiscoveryRecord;
use lanwarden_common::report;
use lanwarden_common::sinks::DisplaySink;

use crate::terminal::{colors, print};

/// Colours the plain table: header, rule, and randomized rows stand out.
pub fn colored_table(records: &[DiscoveryRecord]) -> Vec<String> {
    let lines: Vec<String> = report::render_table(records);
    let mut colored: Vec<String> = Vec::with_capacity(lines.len());

    for (idx, line) in lines.into_iter().enumerate() {
        let line: ColoredString = match idx {
            0 => line.color(colors::PRIMARY).bold(),
            1 => line.color(colors::SEPARATOR),
            _ if records[idx - 2].is_randomized() => line.color(colors::RANDOMIZED),
            _ => line.color(colors::TEXT_DEFAULT),
        };
        colored.push(line.to_string());
    }
    colored
}

/// Prints records as a table.
pub struct TerminalDisplay {
    quiet: u8,
}

impl TerminalDisplay {
    pub fn new(quiet: u8) -> Self {
        Self { quiet }
    }
}

impl DisplaySink for TerminalDisplay {
    fn display(&self, records: &[DiscoveryRecord]) {
        if records.is_empty() {
            print::header("zero hosts detected", self.quiet);
            print::no_results();
            return;
        }

        print::header("network discovery", self.quiet);
        for line in colored_table(records) {
            print::print(&line);
        }
        if self.quiet == 0 {
            print::fat_separator();
        }
    }
}

/// Prints records as a JSON array on stdout.
pub struct JsonDisplay;

impl DisplaySink for JsonDisplay {
    fn display(&self, records: &[DiscoveryRecord]) {
        match report::render_json(records) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Failed to serialize records: {e}"),
        }
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
