use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is not set. GPU backend crates are noisy at trace
/// level, so they are capped at `info`.
const DEFAULT_FILTER: &str = "debug,wgpu_core=info,wgpu_hal=info,naga=info";

/// Installs a fmt subscriber for overlay diagnostics.
pub fn init() {
    if !try_init() {
        tracing::warn!("A global tracing subscriber is already set");
    }
}

/// Like [`init`], but returns `false` instead of complaining when a global
/// subscriber already exists.
pub fn try_init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
