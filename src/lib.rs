//! Scansh: concurrent directory scanner and interactive process relay.
//!
//! Two independent subsystems, usable standalone or from the same CLI run:
//!
//! - [`scanner`] enumerates every regular file under a root with a bounded
//!   pool of traversal workers, streaming paths through a channel in no
//!   particular order. Completion is tracked by a pending-work counter so the
//!   stream closes exactly once, only after every directory has been listed.
//! - [`relay`] spawns a subprocess with all three standard streams piped,
//!   relays its stdout/stderr to a caller sink line by line, forwards the
//!   caller's input to the child's stdin, and waits for exit.

pub mod cancel;
pub mod engine;
pub mod error;
pub mod relay;
pub mod scanner;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use cancel::CancelToken;
pub use error::{RelayError, ScanError};
pub use relay::{CommandSpec, run_interactive};
pub use scanner::{collect_paths, spawn_scan};

/// Result alias used by the CLI layer; library entry points return their own
/// typed errors ([`ScanError`], [`RelayError`]).
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
