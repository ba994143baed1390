//! Minimum-frequency arbitration.
//!
//! Pure, synchronous, per-CPU: invoked by the frequency-policy engine every
//! time it is about to apply new bounds. Must never block or sleep — the
//! engine may be holding its own locks — so everything here is bounded
//! arithmetic over already-validated inputs.

use slingshot_abi::{BoostFlags, CpuCluster, PolicyBounds};

use crate::config::BoostTunables;
use crate::topology;

/// Boost frequency for this CPU given the active condition.
///
/// Input boost takes precedence over general boost when both are active;
/// each selects its own per-cluster table.
fn boost_freq_khz(cpu: u32, flags: BoostFlags, tun: &BoostTunables) -> u32 {
    let cluster = topology::cluster_of(cpu);
    if flags.contains(BoostFlags::INPUT_BOOST) {
        return match cluster {
            CpuCluster::LowPower => tun.input_boost_freq_lp_khz,
            CpuCluster::Performance => tun.input_boost_freq_hp_khz,
        };
    }

    match cluster {
        CpuCluster::LowPower => tun.general_boost_freq_lp_khz,
        CpuCluster::Performance => tun.general_boost_freq_hp_khz,
    }
}

/// Configured per-cluster floor applied when no boost is active.
fn removal_floor_khz(cpu: u32, tun: &BoostTunables) -> u32 {
    match topology::cluster_of(cpu) {
        CpuCluster::LowPower => tun.remove_boost_freq_lp_khz,
        CpuCluster::Performance => tun.remove_boost_freq_hp_khz,
    }
}

/// Rewrite `bounds.min_khz` according to the current boost state.
///
/// - Max boost pins the minimum to the maximum.
/// - Input/general boost raise the minimum to the per-cluster boost
///   frequency, clamped to the current maximum.
/// - Otherwise the minimum falls to the configured comfort floor, never
///   below the CPU's absolute minimum.
pub fn adjust(bounds: &mut PolicyBounds, flags: BoostFlags, tun: &BoostTunables) {
    if flags.contains(BoostFlags::MAX_BOOST) {
        bounds.min_khz = bounds.max_khz;
        return;
    }

    if flags.intersects(BoostFlags::INPUT_BOOST.union(BoostFlags::GENERAL_BOOST)) {
        let boost = boost_freq_khz(bounds.cpu, flags, tun);
        bounds.min_khz = bounds.max_khz.min(boost);
    } else {
        let floor = removal_floor_khz(bounds.cpu, tun);
        bounds.min_khz = bounds.cpuinfo_min_khz.max(floor);
    }
}
