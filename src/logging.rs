//! Diagnostic logging to stderr, so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CONTAS_LOG";

/// Install the global subscriber. The filter comes from `CONTAS_LOG`
/// (e.g. `CONTAS_LOG=debug`), defaulting to warnings only.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
