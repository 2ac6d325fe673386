//! Crate-private logging macros.
//!
//! With the `logging` feature the macros forward to `tracing`; without it
//! every call site expands to an empty block, so library consumers that do
//! not want `tracing` pay nothing. Installing a subscriber is the
//! application's job (the `move-abi` binary does it in `subscriber`).
//!
//! ```rust,ignore
//! use crate::logging::debug;
//!
//! debug!(function = %function_id, args = arguments.len(), "built view payload");
//! ```

/// Name resolution and other per-call detail.
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {{}};
}

/// Payloads built, views executed, validation failures.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{}};
}

/// Transactions submitted and finalized.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{}};
}

/// Transport failures and ABI oddities that are skipped over.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
