use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io::{ErrorKind, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::SourceConfig;
use crate::error::{ErrorCode, LensError, LensResult};

/// Grace period between SIGTERM and SIGKILL when stopping the source
const TERMINATE_GRACE: Duration = Duration::from_millis(300);

/// Result of one non-blocking read attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were written into the buffer
    Data(usize),
    /// Nothing available right now
    WouldBlock,
    /// The stream has ended and will produce nothing more
    Closed,
}

/// A byte stream that can be polled without blocking
pub trait LogSource {
    fn try_read(&mut self, buf: &mut [u8]) -> LensResult<ReadOutcome>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn try_read(&mut self, buf: &mut [u8]) -> LensResult<ReadOutcome> {
        (**self).try_read(buf)
    }
}

/// Program and arguments of a log source command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SourceCommand {
    /// The long-running command that streams the log
    pub fn stream(config: &SourceConfig) -> Self {
        Self::for_device(config).args(&config.args).build()
    }

    /// The one-shot command that empties the device log
    pub fn clear(config: &SourceConfig) -> Self {
        Self::for_device(config).args(&config.clear_args).build()
    }

    fn for_device(config: &SourceConfig) -> SourceCommandBuilder {
        let builder = SourceCommandBuilder::new(&config.program);
        match &config.device {
            Some(serial) => builder.arg("-s").arg(serial),
            None => builder,
        }
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    fn spawn_error(&self, err: std::io::Error) -> LensError {
        let code = if err.kind() == ErrorKind::NotFound {
            ErrorCode::SOURCE_COMMAND_NOT_FOUND
        } else {
            ErrorCode::SOURCE_SPAWN_FAILED
        };
        LensError::source_with_code(
            code,
            format!("failed to start '{}'", self.display()),
            Some(self.display()),
        )
        .with_source(err)
    }
}

pub struct SourceCommandBuilder {
    command: SourceCommand,
}

impl SourceCommandBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: SourceCommand {
                program: program.to_string(),
                args: Vec::new(),
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.command
            .args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn build(self) -> SourceCommand {
        self.command
    }
}

/// Run the clear command to completion.
///
/// This blocks, but only ever runs before a loop starts.
pub fn clear_log(command: &SourceCommand) -> LensResult<()> {
    tracing::info!("Clearing device log: {}", command.display());

    let output = command
        .to_command()
        .stdin(Stdio::null())
        .output()
        .map_err(|e| command.spawn_error(e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut err = LensError::source_with_code(
            ErrorCode::SOURCE_SUBPROCESS_FAILED,
            format!("'{}' failed: {}", command.display(), stderr.trim()),
            Some(command.display()),
        );
        if let Some(code) = output.status.code() {
            err = err.with_exit_code(code);
        }
        return Err(err);
    }
    Ok(())
}

/// A spawned log producer whose stdout is read without blocking.
///
/// The child is terminated when this value is dropped.
pub struct ChildLogSource {
    child: Child,
    stdout: ChildStdout,
    command: SourceCommand,
}

impl ChildLogSource {
    pub fn spawn(command: &SourceCommand) -> LensResult<Self> {
        let mut child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| command.spawn_error(e))?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(LensError::source_with_code(
                    ErrorCode::SOURCE_SPAWN_FAILED,
                    "log source has no stdout pipe",
                    Some(command.display()),
                ));
            }
        };

        if let Err(e) = set_nonblocking(&stdout) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(LensError::source_with_code(
                ErrorCode::SOURCE_NONBLOCKING_FAILED,
                "cannot make log source output non-blocking",
                Some(command.display()),
            )
            .with_source(e));
        }

        tracing::info!(pid = child.id(), "Started log source: {}", command.display());

        Ok(Self {
            child,
            stdout,
            command: command.clone(),
        })
    }

    /// SIGTERM, then SIGKILL if the child outlives the grace period
    pub fn terminate(&mut self) {
        if let Ok(Some(status)) = self.child.try_wait() {
            tracing::debug!("Log source already exited: {status}");
            return;
        }

        let pid = Pid::from_raw(self.child.id() as i32);
        if let Err(e) = kill(pid, Signal::SIGTERM) {
            tracing::debug!("SIGTERM to log source failed: {e}");
        }

        let deadline = Instant::now() + TERMINATE_GRACE;
        while Instant::now() < deadline {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    tracing::info!("Stopped log source ({status})");
                    return;
                }
                Ok(None) => thread::sleep(Duration::from_millis(10)),
                Err(_) => break,
            }
        }

        tracing::warn!("Log source ignored SIGTERM, killing it");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl LogSource for ChildLogSource {
    fn try_read(&mut self, buf: &mut [u8]) -> LensResult<ReadOutcome> {
        match self.stdout.read(buf) {
            Ok(0) => Ok(ReadOutcome::Closed),
            Ok(n) => Ok(ReadOutcome::Data(n)),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                Ok(ReadOutcome::WouldBlock)
            }
            Err(e) => Err(LensError::source_with_code(
                ErrorCode::SOURCE_READ_FAILED,
                "reading log source output failed",
                Some(self.command.display()),
            )
            .with_source(e)),
        }
    }
}

impl Drop for ChildLogSource {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn set_nonblocking(stdout: &ChildStdout) -> nix::Result<()> {
    let flags = OFlag::from_bits_truncate(fcntl(stdout, FcntlArg::F_GETFL)?);
    fcntl(stdout, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))?;
    Ok(())
}
