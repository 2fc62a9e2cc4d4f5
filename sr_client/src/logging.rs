//! Structured logging configuration.
//!
//! Log output goes to stderr so it never interleaves with the game screen
//! drawn on stdout. Records emitted through the `log` facade by the
//! sketch_relay library are picked up by the same subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn,hyper_util=warn";

/// Requests slower than this are logged as warnings.
const SLOW_REQUEST_MS: u64 = 1000;

/// Initialize logging, configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use sr_client::logging;
///
/// logging::init();
/// tracing::info!("Client starting");
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Logging initialized");
}

/// Log one round trip to the game authority.
///
/// # Arguments
///
/// * `method` - HTTP method
/// * `path` - Request path
/// * `status_code` - Response status code
/// * `duration_ms` - Request duration in milliseconds
pub fn log_api_request(method: &str, path: &str, status_code: u16, duration_ms: u64) {
    if duration_ms > SLOW_REQUEST_MS {
        tracing::warn!(
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "Slow API request"
        );
    } else {
        tracing::debug!(
            http_method = method,
            http_path = path,
            http_status = status_code,
            duration_ms = duration_ms,
            "API request completed"
        );
    }
}

/// Log a request that never got a response.
pub fn log_api_failure(method: &str, path: &str, duration_ms: u64, error: &str) {
    tracing::debug!(
        http_method = method,
        http_path = path,
        duration_ms = duration_ms,
        error = error,
        "API request failed"
    );
}
