//! The cooperative read loop over the log stream and the keyboard

pub mod event_loop;
pub mod keyboard;
pub mod throttle;

pub use event_loop::{InteractiveLoop, LoopExit, Tick};
pub use keyboard::{Key, KeySource, NoKeys, RawModeGuard, ScriptedKeys, TerminalKeys};
pub use throttle::PollThrottle;
