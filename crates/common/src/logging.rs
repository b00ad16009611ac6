//! Logging and tracing initialization.
//!
//! The library crates only emit `tracing` events; hosts that want them
//! printed call one of these functions once at startup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Directive used by [`init_test_logging`] when `RUST_LOG` is unset.
const TEST_DIRECTIVES: &str = "pixcam_camera=debug,pixcam_motion=debug,warn";

/// `RUST_LOG` when set, `directives` otherwise.
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Install the global tracing subscriber described by `config`.
///
/// Returns false when a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter(&config.level))
        .with_target(config.with_target);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().flatten_event(true).finish())
    } else {
        tracing::subscriber::set_global_default(builder.with_file(false).with_line_number(false).finish())
    };
    installed.is_ok()
}

/// Initialize logging with the default configuration.
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}

/// Install a subscriber that writes through the test harness capture.
/// Calling it more than once is harmless.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(TEST_DIRECTIVES))
        .with_test_writer()
        .try_init();
}
