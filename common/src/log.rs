//! Logging shorthands used across the workspace.
//!
//! Thin wrappers over `tracing` so every crate tags its events the same way.
//! `success!` is an INFO event on its own target so the terminal formatter can
//! highlight completed steps.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "lanwarden::success", $($arg)*)
    };
}
