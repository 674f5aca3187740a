//! Relay threads: line readers on the child's output streams and a forwarder
//! feeding the caller's input to the child's stdin.

use crossbeam_channel::Sender;
use log::{debug, warn};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::ChildStdin;
use std::thread::{self, JoinHandle};

use crate::types::{RelayLine, RelaySource};

/// Drain one child output stream line by line, tagging each line with its
/// source. Order within the stream is preserved. The thread exits on EOF
/// (child closed its end) or when the consumer drops the receiver.
pub fn spawn_line_reader<R>(
    stream: R,
    source: RelaySource,
    line_tx: Sender<RelayLine>,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            match line {
                Ok(text) => {
                    if line_tx.send(RelayLine { source, text }).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{} read error: {}", source, e);
                    break;
                }
            }
        }
    })
}

/// Forward the caller's input to the child's stdin line by line.
///
/// On input EOF the stdin handle is dropped, closing the child's pipe exactly
/// once so it sees end-of-input. A write failure means the child stopped
/// reading (typically it already exited); the forwarder stops rather than
/// hang on a dead pipe.
pub fn spawn_input_forwarder<R>(input: R, mut stdin: ChildStdin) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(input);
        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("input read error: {}", e);
                    break;
                }
            };
            if let Err(e) = writeln!(stdin, "{}", line).and_then(|_| stdin.flush()) {
                debug!("child stdin closed: {}", e);
                break;
            }
        }
        // Dropping the handle here closes the child's stdin.
    })
}
