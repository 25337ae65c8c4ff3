//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `info`, or `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
