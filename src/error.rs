//! Typed errors for the scanner and the process relay.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from the directory scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Scan root is not a directory.
    #[error("Scan root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan was cancelled before it finished.
    #[error("Scan cancelled")]
    Cancelled,

    /// A scan worker thread panicked.
    #[error("Scan worker panicked")]
    WorkerPanic,
}

impl ScanError {
    /// Classify an I/O error by kind, keeping the path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors from the process relay supervisor.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The child process could not be started (missing binary, permissions).
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A standard stream handle was not attached to the child.
    #[error("Missing standard stream pipe on `{command}`")]
    Pipe { command: String },

    /// Waiting on the child failed.
    #[error("Failed to wait on `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child did not exit within the configured timeout.
    #[error("`{command}` did not exit within {timeout:?}")]
    ExitTimeout { command: String, timeout: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io_classifies_kind() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::other("disk on fire"),
        );
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
