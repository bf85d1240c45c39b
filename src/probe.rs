//! Process-wide evaluator behind the `init`/`evaluate` pair.
//!
//! The facade starts out uninitialized. A successful [`init`] makes it ready
//! for the rest of the process; a failed one leaves it uninitialized so the
//! caller may try another file. There is no reload.

use std::path::Path;

use log::{info, warn};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use crate::nnue::Architecture;

static EVALUATOR: OnceCell<Evaluator> = OnceCell::new();

/// Serializes `init` so two threads never load at the same time.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Load the `256x2-32-32-1` network at `path` into the process-wide evaluator.
pub fn init<P: AsRef<Path>>(path: P) -> Result<()> {
    init_with(path, &Architecture::default())
}

/// Like [`init`] for a network of shape `arch`.
pub fn init_with<P: AsRef<Path>>(path: P, arch: &Architecture) -> Result<()> {
    let _guard = INIT_LOCK.lock();
    if EVALUATOR.get().is_some() {
        warn!("network already loaded, ignoring {}", path.as_ref().display());
        return Err(Error::AlreadyInitialized);
    }
    let evaluator = Evaluator::load_with(path.as_ref(), arch)?;
    EVALUATOR
        .set(evaluator)
        .map_err(|_| Error::AlreadyInitialized)?;
    info!("evaluator ready");
    Ok(())
}

/// Whether a network has been loaded.
#[must_use]
pub fn is_ready() -> bool {
    EVALUATOR.get().is_some()
}

/// Score `fen` with the process-wide network.
pub fn evaluate(fen: &str) -> Result<i32> {
    EVALUATOR.get().ok_or(Error::NotInitialized)?.evaluate(fen)
}
