//! Logging init: structured events to stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "info,movies_core=debug";

/// Falls back to a quiet filter (or a chatty one with `--verbose`) when
/// `RUST_LOG` is unset or invalid. Stdout is left for command output.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if initialized.is_err() {
        tracing::debug!("a global subscriber was already installed");
    }
}
