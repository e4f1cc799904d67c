//! Process-wide `tracing` subscriber setup

use crate::config::env_var;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Selects line-delimited JSON output instead of the human-readable format
pub const LOG_FORMAT_VAR: &str = "TICKERWATCH_LOG_FORMAT";

pub fn init_tracing() {
    init_tracing_with("info");
}

/// Install the subscriber; `default_filter` applies when `RUST_LOG` is unset
///
/// The interactive client passes `warn` so log lines stay out of the
/// rendered watchlist.
pub fn init_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if wants_json(env_var(LOG_FORMAT_VAR).as_deref()) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}
