//! Monotonic clock facade.
//!
//! Deadline arithmetic throughout the coordinator uses millisecond
//! timestamps from the host's monotonic clock. Safe to call from any
//! context (interrupt, kernel thread, notifier callback). Before the host
//! registers its service table, every accessor returns `0`.

use crate::hostcalls;

/// Returns the monotonic clock value in milliseconds since host boot.
///
/// Returns `0` if host services are not yet registered.
#[inline]
pub fn monotonic_ms() -> u64 {
    hostcalls::monotonic_ms()
}
