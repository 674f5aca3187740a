//! Public option and data types for the scanner and relay APIs.

use std::fmt;
use std::time::Duration;

use crate::cancel::CancelToken;

/// Options for a directory scan.
#[derive(Clone, Debug, Default)]
pub struct ScanOpts {
    /// Worker thread count. When None, derived from available threads and the
    /// file-descriptor limit.
    pub workers: Option<usize>,
    /// Strict mode: fail on the first listing error instead of skipping the
    /// unreadable directory.
    pub strict: bool,
    /// Cancellation token, checked by workers between directories.
    pub cancel: CancelToken,
}

/// Which child stream a relayed line came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelaySource {
    Stdout,
    Stderr,
}

impl fmt::Display for RelaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelaySource::Stdout => write!(f, "stdout"),
            RelaySource::Stderr => write!(f, "stderr"),
        }
    }
}

/// One line of child output, tagged with its source stream.
///
/// Lines keep their order within a single stream; stdout and stderr interleave
/// arbitrarily relative to each other (two independent relay threads race).
#[derive(Clone, Debug)]
pub struct RelayLine {
    pub source: RelaySource,
    pub text: String,
}

/// Options for an interactive relay run.
#[derive(Clone, Debug, Default)]
pub struct RelayOpts {
    /// Give up waiting for the child after this long. None: wait forever.
    pub exit_timeout: Option<Duration>,
    /// Cancellation token; when tripped during the exit wait the child is
    /// killed and reaped.
    pub cancel: CancelToken,
}
