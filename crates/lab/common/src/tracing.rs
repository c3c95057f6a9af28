//! Tracing subscriber setup shared by every `lab` command.
//!
//! Diagnostics go to stderr so that stdout only carries command output
//! (plain text or `--json`). The filter is read from `RUST_LOG` and falls
//! back to [`DEFAULT_FILTER`].

use std::io::IsTerminal;
use tracing_subscriber::{
    EnvFilter,
    prelude::*,
};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Transport crates that are noisy at debug level.
const QUIET_TARGETS: &[&str] = &["alloy_rpc_client=warn", "alloy_transport=warn", "hyper=warn"];

/// Builds the env filter used by [`init_tracing`].
pub fn env_filter() -> EnvFilter {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    QUIET_TARGETS.iter().fold(filter, |filter, directive| {
        match directive.parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing() -> Result<(), String> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))
}
