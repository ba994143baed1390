//! Host kernel entry points.
//!
//! The coordinator is hosted inside a kernel that owns the clock and the
//! local-interrupt state. Rather than linking against the host directly,
//! the host registers a table of function pointers once during bring-up;
//! every wrapper here degrades to a safe fallback until that happens
//! (time reads as 0, irq save/restore are no-ops).
//!
//! The table is published through a single atomic pointer so readers on
//! the hot path pay one acquire load.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

/// Table of host kernel services the coordinator calls back into.
pub struct HostCalls {
    /// Monotonic milliseconds since host boot.
    pub monotonic_ms: fn() -> u64,
    /// Save local-interrupt state and disable interrupts; returns a token
    /// for [`irq_restore`](HostCalls::irq_restore).
    pub irq_save: fn() -> u64,
    /// Restore local-interrupt state from a saved token.
    pub irq_restore: fn(u64),
}

static HOSTCALLS: AtomicPtr<HostCalls> = AtomicPtr::new(ptr::null_mut());

/// Register the host service table.
///
/// The table must live for the rest of the process (`'static`); the host
/// keeps it in a static and hands out a reference.
pub fn register_hostcalls(calls: &'static HostCalls) {
    HOSTCALLS.store(calls as *const HostCalls as *mut HostCalls, Ordering::Release);
}

/// Drop the registered table; wrappers revert to fallbacks.
pub fn clear_hostcalls() {
    HOSTCALLS.store(ptr::null_mut(), Ordering::Release);
}

#[inline]
fn table() -> Option<&'static HostCalls> {
    let ptr = HOSTCALLS.load(Ordering::Acquire);
    // SAFETY: register_hostcalls only stores references with 'static
    // lifetime; a non-null pointer is always valid to dereference.
    unsafe { ptr.as_ref() }
}

/// Monotonic milliseconds since host boot; 0 before registration.
#[inline]
pub fn monotonic_ms() -> u64 {
    match table() {
        Some(t) => (t.monotonic_ms)(),
        None => 0,
    }
}

/// Save-and-disable local interrupts; returns an opaque token.
#[inline]
pub fn irq_save() -> u64 {
    match table() {
        Some(t) => (t.irq_save)(),
        None => 0,
    }
}

/// Restore local interrupts from a token produced by [`irq_save`].
#[inline]
pub fn irq_restore(token: u64) {
    if let Some(t) = table() {
        (t.irq_restore)(token);
    }
}
