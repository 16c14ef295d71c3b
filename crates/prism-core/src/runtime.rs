//! Process-wide runtime lifecycle.
//!
//! The underlying compiler runtime wants exactly one initialization
//! before first use and one teardown after last use. A lone atomic flag
//! guards both so the first caller wins and concurrent repeats observe
//! "already initialized" without serializing on a lock.

use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the translation runtime. Must be called before any compile
/// operation. Safe to call from multiple threads; returns true whether
/// this call performed the initialization or it had already happened.
pub fn initialize() -> bool {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        log::debug!("shader runtime initialized");
    }
    true
}

/// Tear down the translation runtime. A no-op unless initialized; calling
/// it twice is harmless.
pub fn shutdown() {
    if INITIALIZED
        .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        log::debug!("shader runtime shut down");
    }
}

/// Whether [`initialize`] has been called without a matching [`shutdown`].
pub(crate) fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
