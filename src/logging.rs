use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Defaults to WARN; `RUST_LOG` overrides. Returns false when a subscriber was
/// already installed, so tests and embedding hosts may call it freely.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .is_ok()
}
