//! CPU cluster classification.
//!
//! The host configures which CPUs form the low-power cluster once during
//! bring-up; everything else is treated as the performance cluster. Stored
//! as a raw mask so [`cluster_of`] is a single atomic load on the
//! policy-arbitration hot path.

use core::sync::atomic::{AtomicU64, Ordering};

use slingshot_abi::CpuCluster;
use slingshot_lib::CpuMask;

static LP_MASK: AtomicU64 = AtomicU64::new(0);

/// Configure the low-power cluster membership.
pub fn set_lp_cluster(mask: CpuMask) {
    LP_MASK.store(mask.bits(), Ordering::Release);
}

/// Snapshot of the low-power cluster mask.
pub fn lp_cluster() -> CpuMask {
    CpuMask::from_bits(LP_MASK.load(Ordering::Acquire))
}

/// Which cluster a CPU belongs to. CPUs outside the configured low-power
/// mask (including all CPUs when no mask was configured) count as
/// performance CPUs.
#[inline]
pub fn cluster_of(cpu: u32) -> CpuCluster {
    if lp_cluster().contains(cpu as usize) {
        CpuCluster::LowPower
    } else {
        CpuCluster::Performance
    }
}

/// Clear the configured topology. Teardown/test hook.
pub fn reset_topology() {
    LP_MASK.store(0, Ordering::Release);
}
