//! Shared fixtures for the in-crate test suites.
//!
//! The suites run against the real process-wide registries, so every test
//! starts from [`fresh_environment`]: coordinator torn down, mock clock at
//! zero, a four-CPU topology (0-1 low-power, 2-3 performance) with
//! installed policies, and default tunables.

use core::sync::atomic::{AtomicU64, Ordering};

use slingshot_abi::{BoostInitError, InputDeviceCaps, PolicyBounds, RegisterError};
use slingshot_lib::{CpuMask, HostCalls, mark_cpu_online, register_hostcalls, reset_online_cpus};

use crate::{boost, config, cpufreq, input, topology};

// ---------------------------------------------------------------------------
// Mock clock
// ---------------------------------------------------------------------------

static FAKE_NOW_MS: AtomicU64 = AtomicU64::new(0);

fn fake_monotonic_ms() -> u64 {
    FAKE_NOW_MS.load(Ordering::Acquire)
}

fn fake_irq_save() -> u64 {
    0
}

fn fake_irq_restore(_token: u64) {}

static TEST_HOSTCALLS: HostCalls = HostCalls {
    monotonic_ms: fake_monotonic_ms,
    irq_save: fake_irq_save,
    irq_restore: fake_irq_restore,
};

/// Point the clock facade at the mock and set its reading.
pub fn install_test_hostcalls(now_ms: u64) {
    FAKE_NOW_MS.store(now_ms, Ordering::Release);
    register_hostcalls(&TEST_HOSTCALLS);
}

pub fn set_time_ms(now_ms: u64) {
    FAKE_NOW_MS.store(now_ms, Ordering::Release);
}

pub fn advance_ms(delta_ms: u64) {
    FAKE_NOW_MS.fetch_add(delta_ms, Ordering::AcqRel);
}

pub fn now_ms() -> u64 {
    FAKE_NOW_MS.load(Ordering::Acquire)
}

// ---------------------------------------------------------------------------
// Topology / policy fixture
// ---------------------------------------------------------------------------

/// A low-power CPU in the test topology.
pub const LP_CPU: u32 = 0;
/// A performance CPU in the test topology.
pub const HP_CPU: u32 = 2;

pub const LP_MAX_KHZ: u32 = 1_804_800;
pub const HP_MAX_KHZ: u32 = 2_803_200;
pub const LP_CPUINFO_MIN_KHZ: u32 = 300_000;
pub const HP_CPUINFO_MIN_KHZ: u32 = 825_600;

fn install_test_policies() {
    for cpu in 0..4u32 {
        let (max_khz, cpuinfo_min_khz) = if cpu < 2 {
            (LP_MAX_KHZ, LP_CPUINFO_MIN_KHZ)
        } else {
            (HP_MAX_KHZ, HP_CPUINFO_MIN_KHZ)
        };
        cpufreq::install_policy(PolicyBounds {
            cpu,
            min_khz: cpuinfo_min_khz,
            max_khz,
            cpuinfo_min_khz,
            cpuinfo_max_khz: max_khz,
        });
    }
}

/// Reset every registry the suites touch and rebuild the test topology.
///
/// Leaves the coordinator torn down; tests that need it call
/// [`bring_up`] or `boost_init` themselves.
pub fn fresh_environment() {
    boost::boost_teardown();
    install_test_hostcalls(0);
    config::reset_tunables();
    input::reset_devices();
    cpufreq::reset_policies();
    reset_online_cpus();
    topology::set_lp_cluster(CpuMask::range(0, 2));
    for cpu in 0..4 {
        mark_cpu_online(cpu);
    }
    install_test_policies();
}

/// [`fresh_environment`] plus a running coordinator.
pub fn bring_up() -> Result<(), BoostInitError> {
    fresh_environment();
    boost::boost_init()
}

/// Connect a multi-touch touchscreen to the input registry.
pub fn connect_touchscreen() -> Result<usize, RegisterError> {
    input::connect_device(InputDeviceCaps::touchscreen())
}
