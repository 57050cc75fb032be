use tracing_subscriber::EnvFilter;

/// Install the stderr fmt subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
pub fn init(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
