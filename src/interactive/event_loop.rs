use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use super::keyboard::{Key, KeySource};
use super::throttle::PollThrottle;
use crate::config::{Config, KeyConfig};
use crate::error::LensResult;
use crate::render::Renderer;
use crate::session::Session;
use crate::stream::{LogSource, ReadOutcome};

/// Why a loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Operator asked to quit
    Quit,
    /// Operator asked to clear the log and start over
    Restart,
    /// The stream ended and nobody is at the keyboard
    SourceEnded,
}

/// What one scheduler tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Bytes were read; this many lines completed
    Streamed(usize),
    /// A key was read and handled without leaving the loop
    KeyHandled,
    /// Neither the stream nor the keyboard had anything
    Idle,
    Exit(LoopExit),
}

/// Single-threaded scheduler over the log stream and the keyboard.
///
/// Each tick reads the stream first; the keyboard is polled only when the
/// stream had nothing, and at most once per poll interval.
pub struct InteractiveLoop<'a, S: LogSource, K: KeySource, W: Write> {
    session: Session,
    source: S,
    keys: &'a mut K,
    renderer: &'a mut Renderer<W>,
    throttle: PollThrottle,
    bindings: KeyConfig,
    buf: Vec<u8>,
    source_ended: bool,
}

impl<'a, S: LogSource, K: KeySource, W: Write> InteractiveLoop<'a, S, K, W> {
    pub fn new(
        config: &Config,
        session: Session,
        source: S,
        keys: &'a mut K,
        renderer: &'a mut Renderer<W>,
    ) -> Self {
        Self {
            session,
            source,
            keys,
            renderer,
            throttle: PollThrottle::new(config.keys.poll_interval()),
            bindings: config.keys.clone(),
            buf: vec![0; config.source.chunk_size.max(1)],
            source_ended: false,
        }
    }

    /// Tick until an exit, pausing briefly whenever a tick was idle
    pub fn run(&mut self) -> LensResult<LoopExit> {
        let pause = self.bindings.idle_pause();
        loop {
            match self.tick(Instant::now())? {
                Tick::Exit(exit) => return Ok(exit),
                Tick::Idle if pause > Duration::ZERO => thread::sleep(pause),
                _ => {}
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> LensResult<Tick> {
        if !self.source_ended {
            match self.source.try_read(&mut self.buf)? {
                ReadOutcome::Data(n) => {
                    let outcomes = self.session.ingest(&self.buf[..n], self.renderer)?;
                    return Ok(Tick::Streamed(outcomes.len()));
                }
                ReadOutcome::Closed => {
                    self.source_ended = true;
                    tracing::warn!(
                        pending = self.session.pending().len(),
                        "Log source ended"
                    );
                    if !self.keys.is_interactive() {
                        return Ok(Tick::Exit(LoopExit::SourceEnded));
                    }
                    self.renderer.line(&format!(
                        "...log source ended; press '{}' to restart or '{}' to quit",
                        self.bindings.restart, self.bindings.quit
                    ))?;
                }
                ReadOutcome::WouldBlock => {}
            }
        }

        if !self.throttle.ready(now) {
            return Ok(Tick::Idle);
        }
        match self.keys.poll_key()? {
            Some(key) => self.dispatch(key),
            None => Ok(Tick::Idle),
        }
    }

    fn dispatch(&mut self, key: Key) -> LensResult<Tick> {
        // The keystroke may have been echoed; keep it off the next log line
        self.renderer.line("")?;

        match key {
            Key::Interrupt => self.quit(),
            Key::Char(c) if c == self.bindings.quit => self.quit(),
            Key::Char(c) if c == self.bindings.restart => {
                tracing::info!("Restart requested");
                self.session.reset();
                Ok(Tick::Exit(LoopExit::Restart))
            }
            Key::Char(c) => {
                self.renderer.line(&format!("...(ignoring '{c}')"))?;
                Ok(Tick::KeyHandled)
            }
        }
    }

    fn quit(&mut self) -> LensResult<Tick> {
        self.renderer.line("...goodbye")?;
        Ok(Tick::Exit(LoopExit::Quit))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_ended(&self) -> bool {
        self.source_ended
    }
}
