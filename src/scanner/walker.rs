//! Bounded worker pool driving the traversal queue.
//!
//! Discovery is live: a worker listing a directory enqueues each subdirectory
//! for any worker to pick up, so the set of known directories is never fixed
//! up front. Completion is tracked by the pending counter: incremented before
//! every enqueue, decremented after a listing finishes. The worker that
//! drives it to zero broadcasts one shutdown sentinel per worker; every
//! worker drops its path sender on exit, so the stream closes exactly once,
//! and only after the counter has reached zero.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::ScanError;
use crate::types::ScanOpts;
use crate::utils::config::ScanWorkerLimits;

use super::context::{ScanChannels, ScanContext, ScanHandles, Task, create_scan_channels};
use super::error_handler::check_scan_errors;

/// Start a scan of `root`: validate it, seed the queue, spawn the pool.
///
/// The returned path stream closes when traversal is complete; drain it, then
/// join the handles (or use [`collect_paths`] for both).
pub fn spawn_scan(root: &Path, opts: &ScanOpts) -> Result<ScanHandles, ScanError> {
    let root = root.to_path_buf();
    let meta = std::fs::metadata(&root).map_err(|e| ScanError::io(&root, e))?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }

    let workers = ScanWorkerLimits::current().effective(opts.workers);
    debug!("scan: {} workers on {}", workers, root.display());

    let ScanChannels {
        task_tx,
        task_rx,
        path_tx,
        path_rx,
    } = create_scan_channels();

    let ctx = ScanContext {
        strict: opts.strict,
        cancel: opts.cancel.clone(),
        pending: Arc::new(AtomicUsize::new(1)),
        workers,
        first_error: Arc::new(Mutex::new(None)),
        skipped: Arc::new(Mutex::new(Vec::new())),
    };

    // Root is the first task; the counter starts at 1 to match.
    let _ = task_tx.send(Task::Dir(root));

    let first_error = Arc::clone(&ctx.first_error);
    let skipped = Arc::clone(&ctx.skipped);

    let worker_handles = (0..workers)
        .map(|_| {
            let task_rx = task_rx.clone();
            let task_tx = task_tx.clone();
            let path_tx = path_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || worker_loop(task_rx, task_tx, path_tx, ctx))
        })
        .collect();

    // Workers hold their own clones; dropping ours lets the path stream close
    // once the last worker exits.
    drop(task_tx);
    drop(path_tx);

    Ok(ScanHandles {
        path_rx,
        worker_handles,
        first_error,
        skipped,
    })
}

/// Scan and collect every discovered path: drain the stream, join the pool,
/// then apply the strict/skip error policy.
pub fn collect_paths(root: &Path, opts: &ScanOpts) -> Result<Vec<PathBuf>, ScanError> {
    let handles = spawn_scan(root, opts)?;

    let mut paths = Vec::new();
    while let Ok(path) = handles.path_rx.recv() {
        paths.push(path);
    }
    debug!("scan: stream closed, {} paths", paths.len());

    for h in handles.worker_handles {
        h.join().map_err(|_| ScanError::WorkerPanic)?;
    }

    if opts.cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    check_scan_errors(opts.strict, &handles.first_error, &handles.skipped)?;
    Ok(paths)
}

fn worker_loop(
    task_rx: Receiver<Task>,
    task_tx: Sender<Task>,
    path_tx: Sender<PathBuf>,
    ctx: ScanContext,
) {
    while let Ok(task) = task_rx.recv() {
        let dir = match task {
            Task::Dir(d) => d,
            Task::Done => break,
        };
        if !ctx.cancel.is_cancelled() && !aborted(&ctx) {
            list_dir(&dir, &task_tx, &path_tx, &ctx);
        }
        finish_task(&ctx, &task_tx);
    }
    // path_tx clone drops here; the stream closes with the last worker.
}

/// True once a strict-mode error has been recorded. Remaining queued tasks
/// are drained without listing so the counter still reaches zero.
fn aborted(ctx: &ScanContext) -> bool {
    ctx.strict && ctx.first_error.lock().unwrap().is_some()
}

fn list_dir(dir: &Path, task_tx: &Sender<Task>, path_tx: &Sender<PathBuf>, ctx: &ScanContext) {
    let entries = match std::fs::read_dir(dir) {
        Ok(it) => it,
        Err(e) => {
            record_error(ctx, dir, e);
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(en) => en,
            Err(e) => {
                record_error(ctx, dir, e);
                if ctx.strict {
                    return;
                }
                continue;
            }
        };
        let path = entry.path();
        let ftype = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                record_error(ctx, &path, e);
                if ctx.strict {
                    return;
                }
                continue;
            }
        };
        if ftype.is_dir() {
            // Increment before enqueueing so the counter can never hit zero
            // while this subdirectory is still queued.
            ctx.pending.fetch_add(1, Ordering::SeqCst);
            let _ = task_tx.send(Task::Dir(path));
        } else if path_tx.send(path).is_err() {
            // Consumer dropped the stream; stop producing.
            return;
        }
    }
}

fn record_error(ctx: &ScanContext, path: &Path, e: std::io::Error) {
    if ctx.strict {
        let mut first = ctx.first_error.lock().unwrap();
        if first.is_none() {
            *first = Some(ScanError::io(path, e));
        }
    } else {
        log::warn!("skipping {}: {}", path.display(), e);
        ctx.skipped
            .lock()
            .unwrap()
            .push((path.to_path_buf(), e.to_string()));
    }
}

fn finish_task(ctx: &ScanContext, task_tx: &Sender<Task>) {
    if ctx.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
        // Last in-flight directory: wake every worker so the pool exits.
        for _ in 0..ctx.workers {
            let _ = task_tx.send(Task::Done);
        }
    }
}
