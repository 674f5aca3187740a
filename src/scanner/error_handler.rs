//! Post-join policy: surface the first strict-mode error or summarize skips.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::ScanError;

/// Apply the error policy after the pool has been joined: strict mode returns
/// the recorded first error; otherwise skipped directories are summarized.
pub fn check_scan_errors(
    strict: bool,
    first_error: &Arc<Mutex<Option<ScanError>>>,
    skipped: &Arc<Mutex<Vec<(PathBuf, String)>>>,
) -> Result<(), ScanError> {
    if strict && let Some(err) = first_error.lock().unwrap().take() {
        return Err(err);
    }
    let skipped = skipped.lock().unwrap();
    if !skipped.is_empty() {
        log::warn!(
            "Skipped {} paths due to permission errors or access issues",
            skipped.len()
        );
    }
    Ok(())
}
