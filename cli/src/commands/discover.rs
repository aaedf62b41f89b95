use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use colored::*;
use is_root::is_root;
use lanwarden_common::config::Config;
use lanwarden_common::network::target::Target;
use lanwarden_common::report::ScanReport;
use lanwarden_common::scanning::Prober;
use lanwarden_common::sinks::{DisplaySink, NotificationSink, PersistenceSink};
use lanwarden_common::{success, warn};
use lanwarden_core::discovery::ScanOrchestrator;
use lanwarden_core::scanner::ArpProbe;
use lanwarden_core::sinks::{HttpPersistence, LogNotifier, LogPersistence, WebhookNotifier};
use lanwarden_core::vendors::{MacOuiSource, VendorResolver};

use crate::terminal::format::{JsonDisplay, TerminalDisplay};
use crate::terminal::{colors, print, spinner};

pub async fn discover(target: Target, cfg: &Config) -> anyhow::Result<()> {
    if !is_root() {
        warn!("Not running as root; opening a raw socket will most likely fail");
    }

    print::print_status("Initializing discovery...");
    let orchestrator: ScanOrchestrator = build_orchestrator(cfg)?;

    if !cfg.json {
        spinner::start("Probing for devices...".to_string());
    }
    let start_time: Instant = Instant::now();
    let outcome = orchestrator.run_scan(&target).await;
    spinner::finish();

    conclude(outcome, start_time, cfg)
}

/// A fatal error is handed back untouched for `main` to report once.
fn conclude(
    outcome: lanwarden_common::Result<ScanReport>,
    start_time: Instant,
    cfg: &Config,
) -> anyhow::Result<()> {
    let report: ScanReport = outcome.context("discovery aborted")?;
    discovery_ends(&report, start_time, cfg);
    Ok(())
}

fn build_orchestrator(cfg: &Config) -> anyhow::Result<ScanOrchestrator> {
    let prober: Arc<dyn Prober> = match &cfg.interface {
        Some(name) => Arc::new(ArpProbe::on_interface(name.as_str())),
        None => Arc::new(ArpProbe::new()),
    };

    let resolver = VendorResolver::new(&MacOuiSource::new(cfg.vendor_db.clone()));

    let display: Box<dyn DisplaySink> = match cfg.json {
        true => Box::new(JsonDisplay),
        false => Box::new(TerminalDisplay::new(cfg.quiet)),
    };

    let persistence: Box<dyn PersistenceSink> = match &cfg.api_url {
        Some(url) => Box::new(HttpPersistence::new(url)?),
        None => {
            warn!("No --api-url given; devices are only logged");
            Box::new(LogPersistence)
        }
    };

    let notifier: Box<dyn NotificationSink> = match &cfg.notify_url {
        Some(url) => Box::new(WebhookNotifier::new(url)?),
        None => Box::new(LogNotifier),
    };

    Ok(ScanOrchestrator::new(
        prober,
        resolver,
        display,
        persistence,
        notifier,
    ))
}

fn discovery_ends(report: &ScanReport, start_time: Instant, cfg: &Config) {
    for failure in &report.persistence_failures {
        warn!("{} was not stored: {}", failure.mac_address, failure.reason);
    }
    if let Some(reason) = &report.notification_error {
        warn!("Notification was not delivered: {reason}");
    }

    if cfg.json {
        return;
    }

    let randomized: usize = report.records.iter().filter(|r| r.is_randomized()).count();
    let hosts: ColoredString = format!("{} devices", report.records.len()).bold().green();
    let random: ColoredString = format!("{randomized} randomized").bold().yellow();
    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64())
        .bold()
        .color(colors::ACCENT);
    let output: String = format!("Discovery complete: {hosts} ({random}) in {elapsed}");

    match cfg.quiet {
        0 => print::centerln(&output),
        _ => success!("{output}"),
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
