//! Channels and shared state for a scan: built once per scan and handed to
//! the worker pool.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::cancel::CancelToken;
use crate::error::ScanError;
use crate::utils::config::ChannelCaps;

/// One unit for the traversal queue: a directory to list, or a shutdown
/// sentinel broadcast once the pending counter reaches zero.
pub(crate) enum Task {
    Dir(PathBuf),
    Done,
}

/// Shared state each worker carries.
#[derive(Clone)]
pub(crate) struct ScanContext {
    pub strict: bool,
    pub cancel: CancelToken,
    /// In-flight directory tasks. Incremented before a subdirectory is
    /// enqueued, decremented after its listing finishes; the path stream may
    /// close only once this reaches zero.
    pub pending: Arc<AtomicUsize>,
    /// Pool size; also the number of shutdown sentinels to broadcast.
    pub workers: usize,
    pub first_error: Arc<Mutex<Option<ScanError>>>,
    pub skipped: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

/// Handles returned by [`spawn_scan`](crate::scanner::spawn_scan): receive
/// paths until the stream closes, then join the pool and apply
/// [`check_scan_errors`](crate::scanner::check_scan_errors).
pub struct ScanHandles {
    pub path_rx: Receiver<PathBuf>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub first_error: Arc<Mutex<Option<ScanError>>>,
    pub skipped: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

pub(crate) struct ScanChannels {
    pub task_tx: Sender<Task>,
    pub task_rx: Receiver<Task>,
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
}

pub(crate) fn create_scan_channels() -> ScanChannels {
    // The task queue is unbounded: with a bounded queue every worker can end
    // up blocked enqueueing subdirectories while none is free to pop them.
    let (task_tx, task_rx) = unbounded::<Task>();
    // The path stream is bounded: a slow consumer throttles the walk.
    let (path_tx, path_rx) = bounded::<PathBuf>(ChannelCaps::PATH_STREAM);
    ScanChannels {
        task_tx,
        task_rx,
        path_tx,
        path_rx,
    }
}
