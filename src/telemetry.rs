use tracing_subscriber::{EnvFilter, fmt};

/// Set to `json` for one JSON object per log line.
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_FORMAT).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}
