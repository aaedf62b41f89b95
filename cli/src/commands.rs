pub mod discover;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use lanwarden_common::config::Config;
use lanwarden_common::network::target::Target;

#[derive(Parser, Debug)]
#[command(name = "lanwarden")]
#[command(version, about = "Finds unapproved devices on the local network.")]
pub struct CommandLine {
    /// Addresses to probe: a host, CIDR block, range (a-b or a-N) or a comma-separated list
    #[arg(short, long)]
    pub target: Target,

    /// Base URL of the device approval API
    #[arg(long, env = "LANWARDEN_API_URL")]
    pub api_url: Option<String>,

    /// Webhook notified when unapproved devices are found
    #[arg(long, env = "LANWARDEN_NOTIFY_URL")]
    pub notify_url: Option<String>,

    /// Cached OUI database (Wireshark manuf CSV)
    #[arg(long, value_name = "CSV")]
    pub vendor_db: Option<PathBuf>,

    /// Send probes on this interface instead of picking one
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,

    /// Less output; repeat for even less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Print the discovered devices as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            notify_url: self.notify_url.clone(),
            vendor_db: self.vendor_db.clone(),
            interface: self.interface.clone(),
            quiet: self.quiet,
            json: self.json,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::net::Ipv4Addr;

    #[test]
    fn target_is_required() {
        let err = CommandLine::try_parse_from(["lanwarden"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn malformed_target_is_rejected() {
        let err = CommandLine::try_parse_from(["lanwarden", "-t", "10.0.0.300"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn flags_end_up_in_the_config() {
        let cli = CommandLine::try_parse_from([
            "lanwarden",
            "--target",
            "10.0.0.5",
            "--api-url",
            "http://api.local:5000",
            "--vendor-db",
            "/var/cache/manuf.csv",
            "-i",
            "eth1",
            "-qq",
            "--json",
        ])
        .unwrap();

        assert_eq!(
            cli.target,
            Target::Host {
                target_addr: Ipv4Addr::new(10, 0, 0, 5)
            }
        );

        let cfg = cli.config();
        assert_eq!(cfg.api_url.as_deref(), Some("http://api.local:5000"));
        assert_eq!(cfg.vendor_db, Some(PathBuf::from("/var/cache/manuf.csv")));
        assert_eq!(cfg.interface.as_deref(), Some("eth1"));
        assert_eq!(cfg.quiet, 2);
        assert!(cfg.json);
    }
}
