use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_millis(1_500);
const TICK: Duration = Duration::from_millis(100);
const TIPS: &[&str] = &[
    "Hosts that stay silent for a second are skipped",
    "Use --json for machine-readable output",
    "Pass --interface to pick the outgoing interface",
];

pub struct SpinnerHandle {
    spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn send_to_queue(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn is_active(&self) -> bool {
        !self.spinner.is_finished() && !self.spinner.is_hidden()
    }
}

static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// Shows the spinner with `message`. Log lines are printed above it until
/// [`finish`] is called.
pub fn start(message: String) -> &'static SpinnerHandle {
    let handle = SPINNER.get_or_init(init_spinner);
    handle.send_to_queue(message);
    handle
}

pub fn finish() {
    if let Some(handle) = SPINNER.get() {
        handle.spinner.finish_and_clear();
    }
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(TICK);

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    // Status messages take priority; tips fill the silence in between.
    thread::spawn(move || {
        let mut tip_index: usize = 0;
        let mut status: Option<String> = None;

        while !pb_clone.is_finished() {
            match rx.recv_timeout(TIP_DURATION) {
                Ok(msg) => {
                    pb_clone.set_message(msg.clone());
                    status = Some(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    let tip = TIPS[tip_index % TIPS.len()];
                    tip_index += 1;
                    let line = match &status {
                        Some(status) => format!("{status} {}", tip.italic().bright_black()),
                        None => tip.italic().to_string(),
                    };
                    pb_clone.set_message(line);
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });

    SpinnerHandle { spinner: pb, tx }
}

/// Log sink that keeps output above a running spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match SPINNER.get() {
            Some(handle) if handle.is_active() => {
                let msg = String::from_utf8_lossy(buf);
                handle.println(msg.trim_end());
                Ok(buf.len())
            }
            _ => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
