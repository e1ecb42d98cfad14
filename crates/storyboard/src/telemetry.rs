//! Console tracing setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise the default is `info`, or `debug` for
/// the storyboard crates when `verbose` is on. Logs go to stderr so command
/// output on stdout stays machine readable.
pub fn init_console_telemetry(verbose: bool) {
    let default = if verbose {
        "info,storyboard=debug,storyboard_board=debug,storyboard_models=debug,storyboard_export=debug"
    } else {
        "warn,storyboard=info,storyboard_board=info"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
