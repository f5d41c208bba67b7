//! Diagnostic logging setup.
//!
//! Log records go to stderr through a `tracing-subscriber` fmt layer. The
//! level is `info` by default and `debug` with `--verbose`; a `RUST_LOG`
//! value takes precedence over both.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn build_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
        tracing::info!("logging initialised");
    }
}
