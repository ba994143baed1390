//! Deferred unboost timers.
//!
//! Each boost class owns at most one pending unboost at a time (that is an
//! invariant of the coordinator, not a capacity compromise), so the timer
//! store is a fixed table with one slot per [`BoostClass`] rather than a
//! general wheel. Expired entries are collected under the table lock and
//! dispatched by the caller **outside** it, so dispatch handlers are free
//! to schedule or cancel without deadlocking.
//!
//! `cancel` reports whether a not-yet-fired entry was actually removed.
//! Callers use that to distinguish "I prevented the unboost" (collapse an
//! unboost-then-reboost pair into a no-op) from "it already ran" (the
//! state bit must be asserted afresh).

use slingshot_abi::{BOOST_CLASS_COUNT, BoostClass};
use slingshot_lib::IrqMutex;

#[derive(Clone, Copy)]
struct TimerEntry {
    deadline_ms: u64,
}

/// Classes whose deadline was reached by an [`advance_to`] call.
///
/// Fixed-capacity: at most one entry per class can fire per advance.
///
/// [`advance_to`]: UnboostTimers::advance_to
#[derive(Clone, Copy, Default)]
pub struct FiredUnboosts {
    classes: [Option<BoostClass>; BOOST_CLASS_COUNT],
    len: usize,
}

impl FiredUnboosts {
    fn push(&mut self, class: BoostClass) {
        if self.len < BOOST_CLASS_COUNT {
            self.classes[self.len] = Some(class);
            self.len += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Fired classes in table order.
    pub fn iter(&self) -> impl Iterator<Item = BoostClass> + '_ {
        self.classes.iter().take(self.len).filter_map(|c| *c)
    }
}

/// One-slot-per-class deferred unboost table.
pub struct UnboostTimers {
    slots: IrqMutex<[Option<TimerEntry>; BOOST_CLASS_COUNT]>,
}

impl UnboostTimers {
    pub const fn new() -> Self {
        Self {
            slots: IrqMutex::new([None; BOOST_CLASS_COUNT]),
        }
    }

    /// Arm (or re-arm) the class's unboost for an absolute deadline.
    ///
    /// A pending entry for the same class is replaced — re-triggering a
    /// boost pushes its unboost out, it never stacks a second one.
    pub fn schedule(&self, class: BoostClass, deadline_ms: u64) {
        let mut slots = self.slots.lock();
        slots[class.index()] = Some(TimerEntry { deadline_ms });
    }

    /// Cancel the class's pending unboost.
    ///
    /// Returns `true` if a not-yet-fired entry was removed, `false` if it
    /// had already fired or was never scheduled. Cancelling an absent
    /// entry is a successful no-op.
    pub fn cancel(&self, class: BoostClass) -> bool {
        let mut slots = self.slots.lock();
        slots[class.index()].take().is_some()
    }

    /// Is an unboost pending for this class?
    pub fn is_pending(&self, class: BoostClass) -> bool {
        let slots = self.slots.lock();
        slots[class.index()].is_some()
    }

    /// Deadline of the class's pending entry, if any.
    pub fn deadline_ms(&self, class: BoostClass) -> Option<u64> {
        let slots = self.slots.lock();
        slots[class.index()].map(|e| e.deadline_ms)
    }

    /// Collect every entry whose deadline has been reached at `now_ms`.
    ///
    /// Expired entries are removed under the lock; the returned set is
    /// dispatched by the caller after the lock is released.
    pub fn advance_to(&self, now_ms: u64) -> FiredUnboosts {
        let mut fired = FiredUnboosts::default();
        let mut slots = self.slots.lock();
        for class in [BoostClass::Input, BoostClass::Max, BoostClass::General] {
            if let Some(entry) = slots[class.index()] {
                if entry.deadline_ms <= now_ms {
                    slots[class.index()] = None;
                    fired.push(class);
                }
            }
        }
        // Lock is released here (drop of IrqMutexGuard).
        fired
    }

    /// Drop every pending entry. Teardown/test hook.
    pub fn reset(&self) {
        let mut slots = self.slots.lock();
        *slots = [None; BOOST_CLASS_COUNT];
    }
}

impl Default for UnboostTimers {
    fn default() -> Self {
        Self::new()
    }
}
