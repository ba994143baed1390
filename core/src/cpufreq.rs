//! Frequency-policy engine boundary.
//!
//! The engine itself (governor, frequency selection) lives in the host;
//! this module carries the two interfaces the coordinator needs from it:
//!
//! - a per-CPU policy record store fed by the host (`install_policy`),
//!   recomputed on demand through a policy-adjust notifier chain;
//! - the "recompute bounds now" operations (`update_policy`,
//!   `update_online_policies`) the coordinator invokes after any state
//!   change that must take effect immediately — the notifier chain only
//!   fires on recomputation, never continuously.
//!
//! Notifier callbacks run **outside** the table locks, sorted by
//! descending priority, against a local copy of the policy record; the
//! adjusted record is stored back afterwards. Callbacks must not block.

use slingshot_abi::{PolicyBounds, RegisterError};
use slingshot_lib::{IrqMutex, MAX_CPUS, for_each_online_cpu};

use slingshot_lib::klog_warn;

/// Maximum number of policy-adjust notifier clients.
pub const MAX_POLICY_NOTIFIERS: usize = 8;

/// A policy-adjust callback: rewrites `min_khz` in place.
pub type PolicyAdjustFn = fn(&mut PolicyBounds);

#[derive(Clone, Copy)]
struct NotifierSlot {
    func: PolicyAdjustFn,
    priority: i32,
}

static NOTIFIERS: IrqMutex<[Option<NotifierSlot>; MAX_POLICY_NOTIFIERS]> =
    IrqMutex::new([None; MAX_POLICY_NOTIFIERS]);

static POLICIES: IrqMutex<[Option<PolicyBounds>; MAX_CPUS]> = IrqMutex::new([None; MAX_CPUS]);

/// Scoped registration of a policy-adjust callback.
///
/// Dropping the handle removes the callback from the chain, which is what
/// makes init-failure unwinding and teardown symmetric.
pub struct PolicyAdjustHandle {
    slot: usize,
}

impl Drop for PolicyAdjustHandle {
    fn drop(&mut self) {
        let mut slots = NOTIFIERS.lock();
        slots[self.slot] = None;
    }
}

/// Add a callback to the policy-adjust chain.
pub fn register_policy_adjust(
    func: PolicyAdjustFn,
    priority: i32,
) -> Result<PolicyAdjustHandle, RegisterError> {
    let mut slots = NOTIFIERS.lock();
    for (i, slot) in slots.iter_mut().enumerate() {
        if slot.is_none() {
            *slot = Some(NotifierSlot { func, priority });
            return Ok(PolicyAdjustHandle { slot: i });
        }
    }
    Err(RegisterError::TableFull)
}

/// Install (or replace) the policy record for a CPU.
///
/// Called by the host when a CPU's policy is created or its limits change;
/// the record's `min_khz` is recomputed immediately.
pub fn install_policy(bounds: PolicyBounds) {
    let cpu = bounds.cpu as usize;
    if cpu >= MAX_CPUS {
        klog_warn!("cpufreq: ignoring policy for out-of-range cpu {}", bounds.cpu);
        return;
    }
    {
        let mut policies = POLICIES.lock();
        policies[cpu] = Some(bounds);
    }
    update_policy(bounds.cpu);
}

/// Drop the policy record for a CPU (policy torn down by the host).
pub fn remove_policy(cpu: u32) {
    if (cpu as usize) < MAX_CPUS {
        let mut policies = POLICIES.lock();
        policies[cpu as usize] = None;
    }
}

/// Snapshot of a CPU's current policy record.
pub fn policy(cpu: u32) -> Option<PolicyBounds> {
    if (cpu as usize) >= MAX_CPUS {
        return None;
    }
    let policies = POLICIES.lock();
    policies[cpu as usize]
}

/// The effective minimum bound last computed for a CPU.
pub fn policy_min_khz(cpu: u32) -> Option<u32> {
    policy(cpu).map(|p| p.min_khz)
}

/// Snapshot the notifier chain sorted by descending priority.
fn notifier_snapshot() -> [Option<NotifierSlot>; MAX_POLICY_NOTIFIERS] {
    let mut local = *NOTIFIERS.lock();
    // Selection sort over the fixed table: tiny, no allocation, and only
    // runs on the recompute path.
    let mut i = 0;
    while i < MAX_POLICY_NOTIFIERS {
        let mut best = i;
        let mut j = i + 1;
        while j < MAX_POLICY_NOTIFIERS {
            let jp = local[j].map(|s| s.priority);
            let bp = local[best].map(|s| s.priority);
            if jp > bp {
                best = j;
            }
            j += 1;
        }
        local.swap(i, best);
        i += 1;
    }
    local
}

/// Recompute the bounds for one CPU.
///
/// The working copy starts from the CPU's absolute minimum, every notifier
/// adjusts it in descending priority order, and the result is clamped to
/// `[cpuinfo_min, max]` before it is stored back.
pub fn update_policy(cpu: u32) {
    let Some(mut work) = policy(cpu) else {
        return;
    };

    work.min_khz = work.cpuinfo_min_khz;

    for slot in notifier_snapshot().iter().flatten() {
        (slot.func)(&mut work);
    }

    work.min_khz = work.min_khz.clamp(work.cpuinfo_min_khz, work.max_khz);

    let mut policies = POLICIES.lock();
    // The record may have been removed while the chain ran; don't revive it.
    if policies[cpu as usize].is_some() {
        policies[cpu as usize] = Some(work);
    }
}

/// Recompute bounds for every online CPU.
///
/// Synchronous: when this returns, every online CPU's record reflects the
/// current boost state.
pub fn update_online_policies() {
    for_each_online_cpu(|cpu| update_policy(cpu as u32));
}

/// Drop every policy record. Teardown/test hook.
pub fn reset_policies() {
    let mut policies = POLICIES.lock();
    *policies = [None; MAX_CPUS];
}
