//! Relay tests against real child processes (`sh`, `cat`).

#![cfg(unix)]

use crossbeam_channel::bounded;
use scansh::cancel::CancelToken;
use scansh::error::RelayError;
use scansh::relay::{CommandSpec, run_interactive, spawn_line_reader};
use scansh::types::{RelayOpts, RelaySource};
use std::io::Cursor;
use std::time::{Duration, Instant};

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").args(["-c", script])
}

fn sink_lines(sink: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(sink)
        .lines()
        .map(str::to_string)
        .collect()
}

// --- ordering ---

#[test]
fn test_echo_child_preserves_input_order() {
    let input = Cursor::new(b"one\ntwo\nthree\n".to_vec());
    let mut sink = Vec::new();
    let status = run_interactive(
        CommandSpec::new("cat"),
        input,
        &mut sink,
        &RelayOpts::default(),
    )
    .unwrap();
    assert!(status.success());
    assert_eq!(sink_lines(&sink), vec!["one", "two", "three"]);
}

#[test]
fn test_stderr_lines_are_tagged_with_source() {
    let (mut _session, pipes) = sh("echo out; echo err >&2").spawn().unwrap();
    let (line_tx, line_rx) = bounded(16);
    let out = spawn_line_reader(pipes.stdout, RelaySource::Stdout, line_tx.clone());
    let err = spawn_line_reader(pipes.stderr, RelaySource::Stderr, line_tx);
    drop(pipes.stdin);

    let lines: Vec<_> = line_rx.iter().collect();
    out.join().unwrap();
    err.join().unwrap();
    _session.wait().unwrap();

    assert_eq!(lines.len(), 2);
    assert!(
        lines
            .iter()
            .any(|l| l.source == RelaySource::Stdout && l.text == "out")
    );
    assert!(
        lines
            .iter()
            .any(|l| l.source == RelaySource::Stderr && l.text == "err")
    );
}

// --- spawn and exit ---

#[test]
fn test_nonexistent_binary_is_a_spawn_error() {
    let err = CommandSpec::new("/nonexistent-binary").spawn().unwrap_err();
    assert!(matches!(err, RelayError::Spawn { .. }));

    let err = run_interactive(
        CommandSpec::new("/nonexistent-binary"),
        Cursor::new(Vec::new()),
        &mut Vec::<u8>::new(),
        &RelayOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RelayError::Spawn { .. }));
}

#[test]
fn test_child_exit_status_is_propagated() {
    let mut sink = Vec::new();
    let status = run_interactive(
        sh("exit 3"),
        Cursor::new(Vec::new()),
        &mut sink,
        &RelayOpts::default(),
    )
    .unwrap();
    assert_eq!(status.code(), Some(3));
}

#[test]
fn test_input_eof_closes_child_stdin() {
    // `cat` exits only once its stdin is closed; an empty input must close it
    // exactly once so this returns instead of hanging.
    let mut sink = Vec::new();
    let status = run_interactive(
        CommandSpec::new("cat"),
        Cursor::new(Vec::new()),
        &mut sink,
        &RelayOpts::default(),
    )
    .unwrap();
    assert!(status.success());
    assert!(sink.is_empty());
}

// --- boundary cases ---

#[test]
fn test_child_that_never_reads_input_does_not_hang() {
    // Enough input to overflow the pipe buffer; the forwarder must surface the
    // broken pipe and stop instead of blocking forever.
    let big: Vec<u8> = b"spam line\n".repeat(100_000);
    let started = Instant::now();
    let mut sink = Vec::new();
    let status = run_interactive(
        sh("exit 0"),
        Cursor::new(big),
        &mut sink,
        &RelayOpts::default(),
    )
    .unwrap();
    assert!(status.success());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_exit_timeout_surfaces_as_error() {
    // Child closes its output pipes, then lingers past the timeout.
    let err = run_interactive(
        sh("exec >/dev/null 2>&1; sleep 5"),
        Cursor::new(Vec::new()),
        &mut Vec::<u8>::new(),
        &RelayOpts {
            exit_timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, RelayError::ExitTimeout { .. }));
}

#[test]
fn test_cancel_kills_lingering_child() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let started = Instant::now();
    let status = run_interactive(
        sh("exec >/dev/null 2>&1; sleep 30"),
        Cursor::new(Vec::new()),
        &mut Vec::<u8>::new(),
        &RelayOpts {
            cancel,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!status.success());
    assert!(started.elapsed() < Duration::from_secs(10));
}
