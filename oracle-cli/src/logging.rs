use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the `debug` switch.
pub fn init(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
