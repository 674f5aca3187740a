//! File descriptor limit detection for capping the scan worker pool (Unix).

/// Descriptors budgeted per walker: one open directory iterator plus headroom
/// for the channels and whatever the consumer opens per path.
pub const FDS_PER_WORKER: usize = 4;

/// Fraction of the process FD limit the pool may use.
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Soft limit for open file descriptors, or `None` if unavailable (e.g.
/// Windows, or an unlimited rlimit).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let cur = unsafe { rlim.assume_init() }.rlim_cur;
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Largest worker count that stays under ~80% of the FD limit, or `None`
/// when no limit is available (caller keeps its default).
pub fn fd_capped_workers() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}
