//! Logging configuration and initialization
//!
//! Diagnostics go to stderr; stdout carries only the filtered log.

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use crate::app::config::AppConfig;

/// Filter precedence: `RUST_LOG`, then `-v`, then `log_level` from config, then `warn`
pub fn log_filter(app: &AppConfig, configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = app
        .verbosity_filter()
        .or(configured)
        .unwrap_or("warn");
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize tracing/logging for the application
pub fn init_logging(app: &AppConfig, configured: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(app, configured))
        .with_writer(std::io::stderr)
        .with_target(app.verbose >= 2) // Show target module for -vv and above
        .with_line_number(app.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("logcat-lens started with verbosity level: {}", app.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
