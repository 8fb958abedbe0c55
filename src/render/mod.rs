//! Writing filtered lines to the terminal

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

use crate::error::LensResult;

pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Marker in front of lines whose shape wasn't recognised
pub const NO_MATCH_MARKER: &str = "<<<no match!>>> ";

pub fn red(s: &str) -> String {
    format!("{RED}{s}{RESET}")
}

/// Line-oriented output, flushed after every write
pub struct Renderer<W: Write> {
    out: W,
}

impl Renderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: &str) -> LensResult<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn unmatched(&mut self, raw: &str) -> LensResult<()> {
        self.line(&format!("{NO_MATCH_MARKER}{raw}"))
    }

    /// Wipe the screen and scrollback, cursor to top-left
    pub fn clear_screen(&mut self) -> LensResult<()> {
        queue!(
            self.out,
            Clear(ClearType::Purge),
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
