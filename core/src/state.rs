//! Lock-free boost state.
//!
//! One shared [`BoostState`] instance carries the flag bitmask plus the
//! expiration bookkeeping for the two caller-supplied-duration boost
//! classes. Every mutation goes through atomics; producers on different
//! CPUs (timers, event handlers, notifier callbacks) never take a lock and
//! never observe a torn value.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use slingshot_abi::{BoostClass, BoostFlags};

/// Expiration bookkeeping for one timed boost class.
///
/// `extend` implements longest-deadline-wins merging: of any set of
/// concurrent requests, the one reaching furthest into the future ends up
/// owning both the deadline and the recorded duration. A request that
/// would not outlive the current deadline is rejected outright, which is
/// the sole mechanism preventing a short kick from truncating a longer
/// boost already in flight.
pub struct DeadlineCell {
    expires_at_ms: AtomicU64,
    duration_ms: AtomicU32,
}

impl DeadlineCell {
    pub const fn new() -> Self {
        Self {
            expires_at_ms: AtomicU64::new(0),
            duration_ms: AtomicU32::new(0),
        }
    }

    /// Try to move the deadline to `now_ms + duration_ms`.
    ///
    /// Returns `true` if this request won and the caller should arm the
    /// boost machinery; `false` if an existing boost already extends at
    /// least as far into the future. Lost compare-exchange races retry
    /// from a fresh read, so concurrent winners are totally ordered by
    /// deadline.
    pub fn extend(&self, now_ms: u64, duration_ms: u32) -> bool {
        let new_expires = now_ms + duration_ms as u64;
        let mut curr = self.expires_at_ms.load(Ordering::Acquire);
        loop {
            if new_expires <= curr {
                return false;
            }
            match self.expires_at_ms.compare_exchange(
                curr,
                new_expires,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.duration_ms.store(duration_ms, Ordering::Release);
                    return true;
                }
                Err(actual) => curr = actual,
            }
        }
    }

    /// Duration recorded by the most recent winning [`extend`](Self::extend).
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms.load(Ordering::Acquire)
    }

    /// Absolute deadline of the most recent winning extend.
    #[inline]
    pub fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms.load(Ordering::Acquire)
    }

    /// Forget any recorded deadline. Init/teardown hook.
    pub fn reset(&self) {
        self.expires_at_ms.store(0, Ordering::Release);
        self.duration_ms.store(0, Ordering::Release);
    }
}

impl Default for DeadlineCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The coordinator's shared state word plus per-class deadlines.
pub struct BoostState {
    flags: AtomicU32,
    max_deadline: DeadlineCell,
    general_deadline: DeadlineCell,
}

impl BoostState {
    pub const fn new() -> Self {
        Self {
            flags: AtomicU32::new(0),
            max_deadline: DeadlineCell::new(),
            general_deadline: DeadlineCell::new(),
        }
    }

    /// Atomically OR `bits` into the state word.
    #[inline]
    pub fn set_bits(&self, bits: BoostFlags) {
        self.flags.fetch_or(bits.bits(), Ordering::AcqRel);
    }

    /// Atomically clear `bits` from the state word.
    #[inline]
    pub fn clear_bits(&self, bits: BoostFlags) {
        self.flags.fetch_and(!bits.bits(), Ordering::AcqRel);
    }

    /// Snapshot of the state word.
    #[inline]
    pub fn read(&self) -> BoostFlags {
        BoostFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    /// Deadline bookkeeping for a timed class; `Input` has a fixed
    /// configured duration and carries none.
    pub fn deadline(&self, class: BoostClass) -> Option<&DeadlineCell> {
        match class {
            BoostClass::Input => None,
            BoostClass::Max => Some(&self.max_deadline),
            BoostClass::General => Some(&self.general_deadline),
        }
    }

    /// Reset to the startup state: all bits clear, deadlines forgotten.
    pub fn reset(&self) {
        self.flags.store(0, Ordering::Release);
        self.max_deadline.reset();
        self.general_deadline.reset();
    }
}

impl Default for BoostState {
    fn default() -> Self {
        Self::new()
    }
}
