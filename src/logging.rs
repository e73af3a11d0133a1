use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Console logging to stdout. `RUST_LOG` wins over `debug_mode` when set.
///
/// Returns an error if a global subscriber is already installed.
pub fn setup_logging(debug_mode: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_level = if debug_mode { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false),
        )
        .try_init()
}
