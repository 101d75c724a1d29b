//! Logging initialization for the rsg command line tool.
//!
//! Diagnostics go to stderr so stdout stays clean for model output. The
//! filter comes from `RSG_LOG` when set, defaults to `info`, and `verbose`
//! forces `debug`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("RSG_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
