//! # logcat-lens
//!
//! A terminal companion for `adb logcat`: it reassembles the device log
//! stream into lines, keeps only what an app developer cares about (their
//! own app's output and runtime crashes), and stays responsive to single
//! keystrokes without blocking on the stream.
//!
//! ## Usage
//!
//! ```bash
//! logcat-lens [-v] [--clear] [--device SERIAL] [--config PATH]
//! ```
//!
//! Press `q` to quit, `c` to clear the device log and start over.
//!
//! ## Modules
//!
//! - `app` - Command-line settings, logging setup and the restart supervisor
//! - `classify` - Parsing `S/Owner(pid): message` lines and in-band directives
//! - `config` - `config.toml` loading and environment overrides
//! - `error` - Error type and code registry
//! - `filter` - Process identity, allow/deny policy and test-run aggregation
//! - `interactive` - The cooperative loop over the stream and the keyboard
//! - `render` - Terminal output
//! - `session` - Per-connection state tying the pipeline together
//! - `stream` - The log source process and line reassembly
pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod interactive;
pub mod render;
pub mod session;
pub mod stream;

pub use error::{LensError, LensResult};
