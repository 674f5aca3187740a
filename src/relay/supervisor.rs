//! Interactive run orchestration: spawn, relay, drain, wait.

use crossbeam_channel::{RecvTimeoutError, bounded};
use log::debug;
use std::io::{Read, Write};
use std::process::ExitStatus;
use std::thread;
use std::time::Instant;

use crate::error::RelayError;
use crate::types::{RelayLine, RelayOpts, RelaySource};
use crate::utils::config::{ChannelCaps, EXIT_POLL_INTERVAL};

use super::session::{CommandSpec, Session};
use super::stream::{spawn_input_forwarder, spawn_line_reader};

/// Run `spec` interactively: relay the child's stdout and stderr to `sink`
/// line by line as they arrive, forward `input` to the child's stdin until it
/// reaches EOF, then block until the child exits and return its status.
///
/// Lines from the two output streams keep their own order but interleave
/// arbitrarily with each other. The child is never force-terminated unless
/// the cancel token trips during the exit wait.
pub fn run_interactive<I, W>(
    spec: CommandSpec,
    input: I,
    sink: &mut W,
    opts: &RelayOpts,
) -> Result<ExitStatus, RelayError>
where
    I: Read + Send + 'static,
    W: Write,
{
    let (mut session, pipes) = spec.spawn()?;
    debug!("spawned `{}`", session.command());

    let (line_tx, line_rx) = bounded::<RelayLine>(ChannelCaps::RELAY_LINES);
    let out_handle = spawn_line_reader(pipes.stdout, RelaySource::Stdout, line_tx.clone());
    let err_handle = spawn_line_reader(pipes.stderr, RelaySource::Stderr, line_tx);
    let in_handle = spawn_input_forwarder(input, pipes.stdin);

    // Both readers hold a sender clone; the channel closes once the child has
    // closed both output streams and the readers exit. Polling lets a tripped
    // cancel token break out while the child still holds its streams open.
    loop {
        match line_rx.recv_timeout(EXIT_POLL_INTERVAL) {
            Ok(line) => {
                if writeln!(sink, "{}", line.text).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if opts.cancel.is_cancelled() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    // A reader blocked on a full channel must see the receiver go away, or
    // joining it below would never return on the cancel path.
    drop(line_rx);

    let status = wait_for_exit(&mut session, opts)?;

    let _ = out_handle.join();
    let _ = err_handle.join();
    // The forwarder may still be parked on a caller input read after the
    // child has died; it exits on the next read or on a write failure, so it
    // is detached rather than joined.
    drop(in_handle);

    debug!("`{}` exited with {}", session.command(), status);
    Ok(status)
}

/// Block until the child exits, polling so cancellation and the optional
/// timeout can interrupt the wait. With neither set this behaves like a
/// plain `wait`.
fn wait_for_exit(session: &mut Session, opts: &RelayOpts) -> Result<ExitStatus, RelayError> {
    let deadline = opts.exit_timeout.map(|t| (Instant::now() + t, t));
    loop {
        if let Some(status) = session.try_wait()? {
            return Ok(status);
        }
        if opts.cancel.is_cancelled() {
            debug!("cancelled; killing `{}`", session.command());
            return session.kill_and_wait();
        }
        if let Some((at, timeout)) = deadline
            && Instant::now() >= at
        {
            return Err(RelayError::ExitTimeout {
                command: session.command().to_string(),
                timeout,
            });
        }
        thread::sleep(EXIT_POLL_INTERVAL);
    }
}
