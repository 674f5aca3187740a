//! Concurrent directory scanner: a bounded worker pool streams every regular
//! file under a root through a channel, in no particular order.

pub mod context;
pub mod error_handler;
pub mod walker;

pub use context::ScanHandles;
pub use error_handler::check_scan_errors;
pub use walker::{collect_paths, spawn_scan};
