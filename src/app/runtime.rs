//! Top-level run: (re)start the log source and drive the loop until quit

use std::io::Write;

use crate::config::Config;
use crate::error::LensResult;
use crate::interactive::{InteractiveLoop, KeySource, LoopExit};
use crate::render::Renderer;
use crate::session::Session;
use crate::stream::{clear_log, ChildLogSource, LogSource, SourceCommand};

/// Starts and clears the log source
pub trait LogBackend {
    type Source: LogSource;

    fn spawn(&mut self, command: &SourceCommand) -> LensResult<Self::Source>;
    fn clear(&mut self, command: &SourceCommand) -> LensResult<()>;
}

/// Runs the configured commands as child processes
#[derive(Debug, Default)]
pub struct ChildProcessBackend;

impl LogBackend for ChildProcessBackend {
    type Source = ChildLogSource;

    fn spawn(&mut self, command: &SourceCommand) -> LensResult<ChildLogSource> {
        ChildLogSource::spawn(command)
    }

    fn clear(&mut self, command: &SourceCommand) -> LensResult<()> {
        clear_log(command)
    }
}

/// Run loops until the operator quits.
///
/// A restart clears the device log, respawns the source and starts a fresh
/// session. The previous source is dropped (and terminated) first.
pub fn run_sessions<B, K, W>(
    config: &Config,
    clear_first: bool,
    backend: &mut B,
    keys: &mut K,
    renderer: &mut Renderer<W>,
) -> LensResult<LoopExit>
where
    B: LogBackend,
    K: KeySource,
    W: Write,
{
    let stream_command = SourceCommand::stream(&config.source);
    let clear_command = SourceCommand::clear(&config.source);
    let mut clear = clear_first;
    let mut generation = 0u32;

    loop {
        if clear {
            backend.clear(&clear_command)?;
        }
        renderer.clear_screen()?;

        generation += 1;
        tracing::info!(generation, "Starting log session");

        let source = backend.spawn(&stream_command)?;
        let session = Session::new(config)?;
        let exit = InteractiveLoop::new(config, session, source, keys, renderer).run()?;

        match exit {
            LoopExit::Restart => clear = true,
            LoopExit::Quit | LoopExit::SourceEnded => {
                tracing::info!(?exit, generation, "Leaving");
                return Ok(exit);
            }
        }
    }
}
