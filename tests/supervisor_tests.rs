//! Tests for the restart supervisor with an in-memory log backend

mod common;

use common::{into_text, CLEAR};
use logcat_lens::app::{run_sessions, LogBackend};
use logcat_lens::config::Config;
use logcat_lens::error::{ErrorCode, LensError, LensResult};
use logcat_lens::interactive::{LoopExit, NoKeys, ScriptedKeys};
use logcat_lens::render::Renderer;
use logcat_lens::stream::{ScriptedSource, SourceCommand};

/// Hands out one scripted source per spawn and records every call
#[derive(Default)]
struct FakeBackend {
    sources: Vec<ScriptedSource>,
    spawned: Vec<SourceCommand>,
    cleared: Vec<SourceCommand>,
}

impl FakeBackend {
    fn with_sources(sources: Vec<ScriptedSource>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }
}

impl LogBackend for FakeBackend {
    type Source = ScriptedSource;

    fn spawn(&mut self, command: &SourceCommand) -> LensResult<ScriptedSource> {
        self.spawned.push(command.clone());
        if self.sources.is_empty() {
            return Err(LensError::source_with_code(
                ErrorCode::SOURCE_SPAWN_FAILED,
                "no more scripted sources",
                None,
            ));
        }
        Ok(self.sources.remove(0))
    }

    fn clear(&mut self, command: &SourceCommand) -> LensResult<()> {
        self.cleared.push(command.clone());
        Ok(())
    }
}

#[test]
fn test_quit_runs_a_single_session() {
    let config = Config::default();
    let mut backend =
        FakeBackend::with_sources(vec![ScriptedSource::new().line("I/System.out(1): hi")]);
    let mut keys = ScriptedKeys::new().key('q');
    let mut renderer = Renderer::new(Vec::new());

    let exit = run_sessions(&config, false, &mut backend, &mut keys, &mut renderer).unwrap();

    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(backend.spawned.len(), 1);
    assert_eq!(backend.spawned[0].display(), "adb logcat");
    assert!(backend.cleared.is_empty());
    assert_eq!(into_text(renderer), format!("{CLEAR}hi\n\n...goodbye\n"));
}

#[test]
fn test_clear_flag_clears_before_first_session() {
    let config = Config::default();
    let mut backend = FakeBackend::with_sources(vec![ScriptedSource::new()]);
    let mut keys = ScriptedKeys::new().key('q');
    let mut renderer = Renderer::new(Vec::new());

    run_sessions(&config, true, &mut backend, &mut keys, &mut renderer).unwrap();

    assert_eq!(backend.cleared.len(), 1);
    assert_eq!(backend.cleared[0].display(), "adb logcat -c");
}

#[test]
fn test_restart_clears_and_starts_fresh() {
    let config = Config::default();
    let mut backend = FakeBackend::with_sources(vec![
        ScriptedSource::new()
            .line("I/System.out(7): !!START!!first run")
            .line("I/TestRunner(7): started: testA"),
        ScriptedSource::new().line("I/System.out(8): second run"),
    ]);
    let mut keys = ScriptedKeys::new().key('c').key('q');
    let mut renderer = Renderer::new(Vec::new());

    let exit = run_sessions(&config, false, &mut backend, &mut keys, &mut renderer).unwrap();

    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(backend.spawned.len(), 2);
    assert_eq!(backend.cleared.len(), 1);

    // pid 8 would be stale under the first session's identity, and its
    // output would be buffered by the open test run
    assert_eq!(
        into_text(renderer),
        format!("{CLEAR}{CLEAR}first run\n\n{CLEAR}second run\n\n...goodbye\n")
    );
}

#[test]
fn test_device_serial_is_passed_to_both_commands() {
    let mut config = Config::default();
    config.source.device = Some("emulator-5554".to_string());
    let mut backend = FakeBackend::with_sources(vec![ScriptedSource::new(), ScriptedSource::new()]);
    let mut keys = ScriptedKeys::new().key('c').key('q');
    let mut renderer = Renderer::new(Vec::new());

    run_sessions(&config, false, &mut backend, &mut keys, &mut renderer).unwrap();

    assert_eq!(backend.spawned[1].display(), "adb -s emulator-5554 logcat");
    assert_eq!(backend.cleared[0].display(), "adb -s emulator-5554 logcat -c");
}

#[test]
fn test_ended_source_without_keyboard_finishes() {
    let config = Config::default();
    let mut backend = FakeBackend::with_sources(vec![ScriptedSource::new()
        .line("E/AndroidRuntime(2): boom")
        .closed()]);
    let mut keys = NoKeys;
    let mut renderer = Renderer::new(Vec::new());

    let exit = run_sessions(&config, false, &mut backend, &mut keys, &mut renderer).unwrap();

    assert_eq!(exit, LoopExit::SourceEnded);
    assert_eq!(into_text(renderer), format!("{CLEAR}\x1b[31mboom\x1b[0m\n"));
}

#[test]
fn test_spawn_failure_is_reported() {
    let config = Config::default();
    let mut backend = FakeBackend::default();
    let mut keys = ScriptedKeys::new();
    let mut renderer = Renderer::new(Vec::new());

    let err = run_sessions(&config, false, &mut backend, &mut keys, &mut renderer).unwrap_err();
    assert_eq!(err.code(), ErrorCode::SOURCE_SPAWN_FAILED);
}
