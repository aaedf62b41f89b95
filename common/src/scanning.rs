use std::time::Duration;

use crate::error::Result;
use crate::network::range::IpCollection;
use crate::network::record::RawResponse;

/// Sends discovery probes and gathers the replies.
///
/// One call is one bounded wait: hosts that stay silent until `timeout`
/// elapses are simply absent from the result. Implementations collapse
/// repeated replies from the same MAC into a single entry.
pub trait Prober: Send + Sync {
    fn probe(&self, targets: &IpCollection, timeout: Duration) -> Result<Vec<RawResponse>>;
}
