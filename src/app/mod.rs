//! Application module
//!
//! This module contains application-level functionality including:
//! - Command-line configuration
//! - Logging setup
//! - Fatal error reporting
//! - The restart supervisor around the interactive loop

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

// Re-export main application functions
pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::{run_sessions, ChildProcessBackend, LogBackend};
