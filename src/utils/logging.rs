//! Tracing subscriber initialization
//!
//! The worker itself only emits `tracing` events; installing a subscriber
//! is left to the embedding node, with this helper for the common case.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber
///
/// `level` is an `EnvFilter` directive such as `"info"` or
/// `"chainweb_miner=debug"`; `format` selects `"compact"`, `"pretty"`, or
/// `"json"`. Does nothing if a global subscriber is already set.
pub fn init_logging(level: &str, format: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        "json" => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_thread_ids(true))
                .try_init();
        }
        "pretty" => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init();
        }
        _ => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging("info", "compact");
        init_logging("debug", "json");
        init_logging("not a directive !!", "pretty");
    }
}
