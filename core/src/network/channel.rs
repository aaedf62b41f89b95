use std::io;
use std::time::Duration;

use lanwarden_common::{Result, ScanError};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};

const READ_TIMEOUT: Duration = Duration::from_millis(50);

// errno values for EPERM / EACCES
const EPERM: i32 = 1;
const EACCES: i32 = 13;

/// Both halves of an Ethernet channel. Dropping the handle closes the socket.
pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: Box<dyn DataLinkReceiver>,
}

/// Short read timeout so the receive loop can check its deadline.
pub fn probe_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

pub fn open(intf: &NetworkInterface) -> Result<EthernetHandle> {
    open_eth_channel(intf, &probe_config(), datalink::channel)
}

pub(crate) fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<EthernetHandle>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch: Channel = channel_opener(intf, *cfg).map_err(|e| classify_open_error(intf, e))?;
    match ch {
        Channel::Ethernet(tx, rx) => Ok(EthernetHandle { tx, rx }),
        _ => Err(ScanError::Channel(format!(
            "non-ethernet channel for {}",
            intf.name
        ))),
    }
}

fn classify_open_error(intf: &NetworkInterface, err: io::Error) -> ScanError {
    let denied = err.kind() == io::ErrorKind::PermissionDenied
        || matches!(err.raw_os_error(), Some(EPERM) | Some(EACCES));

    if denied {
        ScanError::Permission(format!(
            "opening a raw socket on {} requires root: {err}",
            intf.name
        ))
    } else {
        ScanError::Channel(format!("opening on {}: {err}", intf.name))
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
