//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never interleave with the interactive prompt
//! on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global subscriber.
///
/// `log_level` is an `EnvFilter` directive (`info`, `subdomain_registrar=debug`, ...);
/// an unparsable value falls back to `info`. `log_format` is `text` or `json`.
///
/// Calling this more than once is a no-op.
pub fn init(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("debug", "text");
        init("not a [valid filter", "json");
    }
}
