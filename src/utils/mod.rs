pub mod config;
pub mod fd_limit;
pub mod logger;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, fd_capped_workers, max_open_fds};
pub use logger::setup_logging;
