//! Shared helpers for integration tests

use logcat_lens::config::Config;
use logcat_lens::render::Renderer;
use logcat_lens::session::{LineOutcome, Session};

/// Sequence crossterm emits for `Renderer::clear_screen`
pub const CLEAR: &str = "\x1b[3J\x1b[2J\x1b[1;1H";

/// Push `input` through a fresh default session, returning outcomes and stdout text
#[allow(dead_code)]
pub fn filter(input: &str) -> (Vec<LineOutcome>, String) {
    let mut session = Session::new(&Config::default()).expect("default config is valid");
    let mut renderer = Renderer::new(Vec::new());
    let outcomes = session
        .ingest(input.as_bytes(), &mut renderer)
        .expect("writing to a Vec cannot fail");
    let out = String::from_utf8(renderer.into_inner()).expect("output is UTF-8");
    (outcomes, out)
}

#[allow(dead_code)]
pub fn into_text(renderer: Renderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.into_inner()).expect("output is UTF-8")
}
