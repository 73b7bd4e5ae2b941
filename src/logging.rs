//! Logging setup for the command line tool.
//!
//! Filter precedence: `--debug` forces `osilabel=debug`, otherwise
//! `RUST_LOG`, otherwise `osilabel=info`. Output goes to stderr so previews
//! can be written to stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "osilabel=info";
const DEBUG_FILTER: &str = "osilabel=debug";

/// Build the filter for the given `--debug` flag.
pub fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(debug_enabled: bool) {
    let result = tracing_subscriber::registry()
        .with(env_filter(debug_enabled))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    if result.is_ok() {
        tracing::debug!(forced = debug_enabled, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_filter() {
        assert_eq!(env_filter(true).to_string(), DEBUG_FILTER);
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
