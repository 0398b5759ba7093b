use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber
///
/// The filter comes from `BOARD_LOG`, then `RUST_LOG`, then `--verbose`
/// (`debug`), defaulting to `warn`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BOARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
