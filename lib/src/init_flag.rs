//! One-shot and resettable boolean flags.

use core::sync::atomic::{AtomicBool, Ordering};

/// A flag that can be set exactly once.
///
/// `init_once()` returns `true` only for the single caller that performed
/// the transition, so racing initializers can agree on a winner without a
/// lock.
pub struct InitFlag {
    flag: AtomicBool,
}

impl InitFlag {
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Attempt the unset→set transition. Returns `true` for the winner.
    #[inline]
    pub fn init_once(&self) -> bool {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for InitFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// A flag that can be raised and lowered.
pub struct StateFlag {
    flag: AtomicBool,
}

impl StateFlag {
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn set_active(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    pub fn set_inactive(&self) {
        self.flag.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for StateFlag {
    fn default() -> Self {
        Self::new()
    }
}
