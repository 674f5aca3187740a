//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::time::Duration;

use crate::utils::fd_limit::fd_capped_workers;

// ---- Scan worker pool ----

/// Limits for sizing the scan worker pool.
/// Use [`ScanWorkerLimits::current()`] to fill `all_threads` from rayon; the
/// rest are const.
#[derive(Clone, Copy, Debug)]
pub struct ScanWorkerLimits {
    /// Available threads (from rayon); set by [`ScanWorkerLimits::current()`].
    pub all_threads: usize,
    /// Minimum pool size when the count is derived (keeps the queue moving
    /// even on one-core machines).
    pub floor: usize,
    /// Cap on the derived pool size; directory listing saturates well before
    /// the core count on wide machines.
    pub max: usize,
}

impl Default for ScanWorkerLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
            max: Self::MAX_THREADS,
        }
    }
}

impl ScanWorkerLimits {
    pub const FLOOR_THREADS: usize = 2;
    pub const MAX_THREADS: usize = 16;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Effective pool size. An explicit request is honored as-is (floored at
    /// 1); a derived count is clamped to `[floor, max]` and capped by the
    /// process FD limit so a wide tree cannot exhaust descriptors.
    pub fn effective(&self, requested: Option<usize>) -> usize {
        if let Some(n) = requested {
            return n.max(1);
        }
        let derived = self.all_threads.clamp(self.floor, self.max);
        match fd_capped_workers() {
            Some(cap) => derived.min(cap.max(1)),
            None => derived,
        }
    }
}

// ---- Channels ----

/// Bounded channel capacities.
pub struct ChannelCaps;

impl ChannelCaps {
    /// Discovered-file stream: small on purpose so a slow consumer throttles
    /// the walk instead of the walk buffering the whole tree.
    pub const PATH_STREAM: usize = 1024;
    /// Relay line channel shared by the stdout and stderr readers.
    pub const RELAY_LINES: usize = 256;
}

// ---- Relay exit wait ----

/// Poll interval for the supervisor's exit wait and the cancel-aware drain.
pub const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_honors_explicit_request() {
        let limits = ScanWorkerLimits {
            all_threads: 8,
            ..Default::default()
        };
        assert_eq!(limits.effective(Some(1)), 1);
        assert_eq!(limits.effective(Some(64)), 64);
        assert_eq!(limits.effective(Some(0)), 1);
    }

    #[test]
    fn test_effective_derived_is_clamped() {
        let limits = ScanWorkerLimits {
            all_threads: 128,
            ..Default::default()
        };
        assert!(limits.effective(None) <= ScanWorkerLimits::MAX_THREADS);

        let limits = ScanWorkerLimits {
            all_threads: 1,
            ..Default::default()
        };
        assert!(limits.effective(None) >= 1);
    }
}
