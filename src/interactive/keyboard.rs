use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{ErrorCode, LensError, LensResult};

/// A key the loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C, which raw mode delivers as a key instead of a signal
    Interrupt,
}

/// Non-blocking source of at most one key per call
pub trait KeySource {
    fn poll_key(&mut self) -> LensResult<Option<Key>>;

    /// False when no operator can press keys (stdin is not a terminal)
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Raw, no-echo terminal mode for as long as the guard lives
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> LensResult<Self> {
        enable_raw_mode().map_err(|e| {
            LensError::terminal_with_code(ErrorCode::TERMINAL_RAW_MODE, "cannot enter raw mode")
                .with_source(e)
        })?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {e}");
        }
    }
}

/// Reads single keystrokes from the controlling terminal.
///
/// Raw mode is held only for the duration of one poll, so log output is
/// written with the terminal in its normal mode.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> LensResult<Option<Key>> {
        let _raw = RawModeGuard::acquire()?;

        let ready = event::poll(Duration::ZERO).map_err(read_error)?;
        if !ready {
            return Ok(None);
        }
        let event = event::read().map_err(read_error)?;
        Ok(key_from_event(&event))
    }
}

fn read_error(err: std::io::Error) -> LensError {
    LensError::terminal_with_code(ErrorCode::TERMINAL_READ_FAILED, "cannot read key").with_source(err)
}

fn key_from_event(event: &Event) -> Option<Key> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && c.eq_ignore_ascii_case(&'c') {
                Some(Key::Interrupt)
            } else {
                Some(Key::Char(*c))
            }
        }
        _ => None,
    }
}

/// Used when stdin is not a terminal: never yields a key
#[derive(Debug, Default)]
pub struct NoKeys;

impl KeySource for NoKeys {
    fn poll_key(&mut self) -> LensResult<Option<Key>> {
        Ok(None)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Replays a fixed sequence of poll results, then reports no key
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<Key>>,
    polls: usize,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, c: char) -> Self {
        self.script.push_back(Some(Key::Char(c)));
        self
    }

    pub fn interrupt(mut self) -> Self {
        self.script.push_back(Some(Key::Interrupt));
        self
    }

    pub fn nothing(mut self) -> Self {
        self.script.push_back(None);
        self
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> LensResult<Option<Key>> {
        self.polls += 1;
        Ok(self.script.pop_front().flatten())
    }
}
