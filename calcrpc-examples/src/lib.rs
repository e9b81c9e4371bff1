//! Shared helpers for the example binaries.

use tracing_subscriber::EnvFilter;

/// Default server URL used by the client example when `CALCRPC_URL` is unset.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Server URL from the `CALCRPC_URL` env var, defaulting to [`DEFAULT_URL`].
pub fn server_url() -> String {
    std::env::var("CALCRPC_URL").unwrap_or_else(|_| DEFAULT_URL.to_string())
}
