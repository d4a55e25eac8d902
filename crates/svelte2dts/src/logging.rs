//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with the report lines on stdout.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SVELTE2DTS_LOG";

/// Install the global subscriber
///
/// Does nothing unless `SVELTE2DTS_LOG` or `RUST_LOG` is set or `verbose` is
/// requested. `SVELTE2DTS_LOG` takes precedence over `RUST_LOG`.
pub fn init(verbose: bool) {
    let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(directives)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("svelte2dts=debug,svelte2dts_core=debug")
    } else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
