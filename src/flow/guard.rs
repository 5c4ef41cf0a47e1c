//! Single-flight guard for submissions.
//!
//! The UI equivalent disables the submit control while a request is
//! pending; here the guard is an explicit atomic flag so non-UI callers get
//! the same protection. The RAII guard releases on every exit path, so no
//! failure can leave the flow stuck "submitting".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub(crate) struct SingleFlight(Arc<AtomicBool>);

impl SingleFlight {
    pub(crate) fn try_acquire(&self) -> Option<FlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| FlightGuard(Arc::clone(&self.0)))
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owns the flag rather than borrowing it, so a held guard does not pin the
/// flow struct itself.
pub(crate) struct FlightGuard(Arc<AtomicBool>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
