use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "reel_recs=info";

/// Installs a formatted tracing subscriber filtered by `RUST_LOG`
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
