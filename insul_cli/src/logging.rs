//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "INSUL_LOG";

/// Install the stderr subscriber.
///
/// `INSUL_LOG` takes the usual filter syntax (`INSUL_LOG=insul_core=debug`).
/// Without it, only warnings are shown, or everything down to debug with
/// `--verbose`. Logs go to stderr so JSON on stdout stays parseable.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("insul_core={0},insul={0}", default_level)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
