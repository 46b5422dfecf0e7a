use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `HOLDEM_LOG=holdem_engine=debug`.
pub const LOG_ENV: &str = "HOLDEM_LOG";

/// Installs the stderr subscriber. Defaults to `warn` so logs stay out of
/// the way of the rendered table on stdout.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
