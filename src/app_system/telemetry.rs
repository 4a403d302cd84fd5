use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `fallback_filter`.
///
/// ```text
/// RUST_LOG=debug orderdesk
/// RUST_LOG=orderdesk::stores=debug,orderdesk::actor_framework=warn orderdesk
/// ```
pub fn setup_tracing(fallback_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
